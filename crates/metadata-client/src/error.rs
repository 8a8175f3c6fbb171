use thiserror::Error;

/// Errors that can occur when talking to the metadata service.
///
/// These never leave the client: the public lookups log them and return `None`.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Metadata client not configured: {0}")]
    NotConfigured(String),

    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    #[error("Rate limit exceeded")]
    RateLimited,

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl MetadataError {
    /// Transport failures and server-side (5xx) errors are worth one more try.
    pub fn is_retryable(&self) -> bool {
        match self {
            MetadataError::Http(e) => !e.is_decode() && !e.is_builder(),
            MetadataError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

// The API key travels in the query string, so the URL never goes into the error.
impl From<reqwest::Error> for MetadataError {
    fn from(e: reqwest::Error) -> Self {
        MetadataError::Http(e.without_url())
    }
}

pub type Result<T> = std::result::Result<T, MetadataError>;
