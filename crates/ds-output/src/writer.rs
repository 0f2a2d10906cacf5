//! The `ReportWriter` trait implemented by report backends.

use crate::{CustomerRow, OutputResult};

/// Sink for completed-customer rows.
///
/// Driven by [`ReportObserver`][crate::ReportObserver], which stores errors
/// instead of returning them.
pub trait ReportWriter {
    /// Append one row.
    fn write_customer(&mut self, row: &CustomerRow) -> OutputResult<()>;

    /// Flush and close.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Collects rows in memory.
impl ReportWriter for Vec<CustomerRow> {
    fn write_customer(&mut self, row: &CustomerRow) -> OutputResult<()> {
        self.push(*row);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}
