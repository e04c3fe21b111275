use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataqError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Timeout error after {0}ms")]
    Timeout(u64),

    #[error("Protocol error {code}: {message}")]
    Protocol { code: String, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataqError {
    /// Whether a caller could reasonably retry the failed operation.
    ///
    /// The client itself never retries; this only classifies the error.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DataqError::Connection(_) | DataqError::Timeout(_) | DataqError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DataqError>;
