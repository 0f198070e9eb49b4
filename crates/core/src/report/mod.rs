//! Report materialization and CSV export.

mod csv_writer;
mod table;

pub use csv_writer::{report_path, write_csv, write_csv_to};
pub use table::{ResultTable, HEADER};

use thiserror::Error;

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to create report file {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write report: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to flush report: {0}")]
    Io(#[from] std::io::Error),
}
