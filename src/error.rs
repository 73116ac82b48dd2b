use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Malformed configuration record: {0}")]
    MalformedRecord(String),

    #[error("Invalid version range '{range}': {reason}")]
    InvalidRange { range: String, reason: String },

    #[error("Unknown listing URL: {0}")]
    UnknownListing(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Server error {status} for {url}")]
    Server { status: u16, url: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    /// Transient failures are worth another attempt; a missing document or
    /// a malformed body is not.
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::Server { .. })
    }
}
