//! URL shortener service implementation.
//!
//! [`ShortenerService`] ties a code [`Generator`](shortcut_generator::Generator)
//! to a [`MappingStore`](shortcut_core::MappingStore) and decides what happens
//! when a freshly drawn code is already taken.

pub mod service;

pub use service::{CollisionPolicy, ShortenerService, DEFAULT_MAX_ATTEMPTS};
pub use shortcut_core::{Shortened, Shortener, ShortenerError};
