//! Catalog fetch errors.

/// Error type for catalog fetches.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogFetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid catalog: {0}")]
    Invalid(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl CatalogFetchError {
    /// HTTP status, for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
