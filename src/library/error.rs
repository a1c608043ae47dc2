/// Errors that can occur while reading or writing a spectral library
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// I/O error reading or writing the library file
    #[error("Failed to access library file: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV/TSV parsing or writing error
    #[error("TSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("Missing required library column: {0}")]
    MissingColumn(String),

    /// A numeric cell holds text that is neither a number nor a missing value
    #[error("Invalid value {value:?} in column {column} at row {row}")]
    InvalidValue {
        /// Zero-based data row (header excluded)
        row: usize,
        /// Column name as configured
        column: String,
        /// Raw cell text
        value: String,
    },
}
