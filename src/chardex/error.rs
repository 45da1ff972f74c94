use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChardexError {
    /// Aggregated field validation messages. Raised before any mutation.
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    /// The request was intentionally cancelled. A neutral outcome, not a
    /// failure to surface to the user.
    #[error("Request aborted")]
    Aborted,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl ChardexError {
    pub fn is_aborted(&self) -> bool {
        matches!(self, ChardexError::Aborted)
    }
}

pub type Result<T> = std::result::Result<T, ChardexError>;
