/// Errors that can occur during pseudo-iRT selection
#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    /// Selection parameters are out of range
    #[error("Invalid selection parameters: {0}")]
    InvalidParameters(String),

    /// I/O error writing the selection report
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error serializing the selection report
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}
