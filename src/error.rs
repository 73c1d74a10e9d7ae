//! Error types for CSV indexing and row reads

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, CsvSeekError>;

/// Errors produced while indexing a CSV file or reading rows from it
#[derive(Debug, Error)]
pub enum CsvSeekError {
    /// File open or read failure at the OS boundary.
    ///
    /// Always fatal to the operation in progress; nothing is retried
    /// internally.
    #[error("Read error: {0}")]
    ReadError(String),

    /// The file contains no indexable content
    #[error("Empty file: {0}")]
    EmptyFile(String),

    /// Requested row index is past the end of the file
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// A row's field count does not match the header's field count
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Operation attempted on a reader that has been closed
    #[error("Invalid state: {0}")]
    InvalidState(String),
}
