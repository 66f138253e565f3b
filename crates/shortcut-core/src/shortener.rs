use crate::error::ShortenerError;
use crate::shortcode::ShortCode;
use crate::store::Backend;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShortenerError>;

/// The outcome of shortening a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortened {
    pub code: ShortCode,
    pub long_url: String,
}

/// The two operations the HTTP layer needs from the core.
#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Allocates a short code for `long_url` and stores the mapping.
    async fn shorten(&self, long_url: &str) -> Result<Shortened>;

    /// Resolves a short code to its stored URL.
    /// Returns `None` if the code was never stored.
    async fn resolve(&self, code: &ShortCode) -> Result<Option<String>>;

    /// The backend mappings are stored in.
    fn backend(&self) -> Backend;
}
