//! Error types for reporting.

use thiserror::Error;

/// Result type for reporting operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur while persisting or presenting results.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read or write failed.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// Plot rendering failed.
    #[error("Plot error: {0}")]
    Plot(String),
}
