//! `ReportObserver<W>` — bridges `StoreObserver` to a `ReportWriter`.

use ds_core::SimTime;
use ds_model::{Customer, Lane, StoreObserver};

use crate::writer::ReportWriter;
use crate::{CustomerRow, OutputError, OutputResult};

/// A [`StoreObserver`] that writes one [`CustomerRow`] per completed
/// customer to any [`ReportWriter`] and finishes the writer when the run
/// ends.
///
/// Errors from the writer are stored internally because `StoreObserver`
/// methods have no return value.  After the run, check for errors with
/// [`take_error`][Self::take_error].
pub struct ReportObserver<W: ReportWriter> {
    writer:     W,
    completed:  u64,
    total_time: f64,
    last_error: Option<OutputError>,
}

impl<W: ReportWriter> ReportObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, completed: 0, total_time: 0.0, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Unwrap the inner writer (e.g. to inspect rows after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    pub fn rows_written(&self) -> u64 {
        self.completed
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: ReportWriter> StoreObserver for ReportObserver<W> {
    fn on_customer_completed(&mut self, customer: &Customer, _lane: Lane) {
        self.completed += 1;
        self.total_time += customer.total_time();
        let mean = self.total_time / self.completed as f64;
        let result = self.writer.write_customer(&CustomerRow::new(customer, mean));
        self.store_err(result);
    }

    fn on_simulation_ended(&mut self, _final_time: SimTime) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
