//! CSV report backend.
//!
//! Creates `customer_report.csv` in the configured output directory,
//! replacing any report from an earlier run.

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;
use tracing::debug;

use crate::row::format_minutes;
use crate::writer::ReportWriter;
use crate::{CustomerRow, OutputResult};

/// File name of the report inside the output directory.
pub const REPORT_FILE: &str = "customer_report.csv";

pub const HEADER: [&str; 7] = [
    "customer_id",
    "customer_type",
    "arrival_time",
    "removal_time",
    "total_time",
    "items",
    "mean_service_time(min)",
];

/// Writes one line per completed customer.  Times are `hh:mm:ss` with one
/// simulation time unit read as one minute; the running mean is truncated
/// to whole minutes.
pub struct CsvReport {
    writer:   Writer<File>,
    path:     PathBuf,
    finished: bool,
}

impl CsvReport {
    /// Create (or truncate) the report in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let path = dir.join(REPORT_FILE);
        let mut writer = Writer::from_path(&path)?;
        writer.write_record(HEADER)?;
        debug!(path = %path.display(), "customer report opened");
        Ok(Self { writer, path, finished: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportWriter for CsvReport {
    fn write_customer(&mut self, row: &CustomerRow) -> OutputResult<()> {
        self.writer.write_record(&[
            row.customer_id.to_string(),
            row.customer_type.label().to_string(),
            format_minutes(row.arrival_time),
            format_minutes(row.removal_time),
            format_minutes(row.total_time),
            row.items.to_string(),
            (row.mean_time_in_store as u64).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}
