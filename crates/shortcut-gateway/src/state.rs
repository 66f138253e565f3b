use std::sync::Arc;

use shortcut_core::{Backend, Shortener};

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    base_url: Option<String>,
}

impl AppState {
    /// `public_base_url` overrides the `http://<Host header>` prefix of
    /// returned short URLs.
    pub fn new(shortener: Arc<dyn Shortener>, public_base_url: Option<String>) -> Self {
        Self {
            shortener,
            base_url: public_base_url.filter(|url| !url.trim().is_empty()),
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn backend(&self) -> Backend {
        self.shortener.backend()
    }
}
