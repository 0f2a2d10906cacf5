//! `ds-output` — what a run leaves behind.
//!
//! | Item                | Purpose                                                |
//! |---------------------|--------------------------------------------------------|
//! | [`StoreStats`]      | live per-stage statistics, fed by notifications        |
//! | [`ReportObserver`]  | one [`CustomerRow`] per completed customer             |
//! | [`CsvReport`]       | `customer_report.csv` backend for [`ReportWriter`]     |
//!
//! Both observers implement `ds_model::StoreObserver`, so they can be plugged
//! into the model directly or fed from a notification channel.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ds_output::{CsvReport, ReportObserver, StoreStats};
//!
//! let report = ReportObserver::new(CsvReport::new(Path::new("./output"))?);
//! let mut sinks = (StoreStats::new(), report);
//! for note in rx.iter() {
//!     note.dispatch(&mut sinks);
//!     if note.is_terminal() { break; }
//! }
//! sinks.1.take_error().map(|e| eprintln!("report error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod stats;
pub mod writer;


pub use csv::{CsvReport, REPORT_FILE};
pub use error::{OutputError, OutputResult};
pub use observer::ReportObserver;
pub use row::{CustomerRow, format_minutes};
pub use stats::{StageStats, StoreStats};
pub use writer::ReportWriter;
