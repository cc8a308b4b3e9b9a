//! Output sink trait and error types

use crate::record::BookRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to write output: {0}")]
    Write(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for the final, deduplicated record table
pub trait RecordSink {
    /// Writes `records` under `basename`
    ///
    /// # Arguments
    ///
    /// * `records` - Rows in output order; may be empty
    /// * `basename` - File name shared by every format, without extension
    ///
    /// # Returns
    ///
    /// The paths of the files that were written
    fn write_records(&self, records: &[BookRecord], basename: &str) -> OutputResult<Vec<PathBuf>>;
}
