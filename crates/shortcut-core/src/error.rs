use thiserror::Error;

/// Result type for mapping store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

/// Failures raised by a [`MappingStore`](crate::MappingStore) backend.
///
/// An unknown code is never an error; stores report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl StorageError {
    /// Whether the backend could not be reached at all, as opposed to
    /// answering with something unusable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("URL is required")]
    MissingUrl,
    #[error("no free short code after {attempts} attempts")]
    ExhaustedRetries { attempts: u32 },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_and_timeout_are_backend_outages() {
        assert!(StorageError::Unavailable("down".into()).is_unavailable());
        assert!(StorageError::Timeout("slow".into()).is_unavailable());
        assert!(!StorageError::Query("bad filter".into()).is_unavailable());
        assert!(!StorageError::InvalidData("not utf-8".into()).is_unavailable());
    }

    #[test]
    fn storage_error_is_kept_verbatim_by_shortener_error() {
        let err: ShortenerError = StorageError::Unavailable("connection refused".into()).into();
        assert_eq!(err.to_string(), "storage backend unavailable: connection refused");
    }
}
