//! Core types and traits for the Shortcut URL shortener.
//!
//! This crate holds the pieces every other crate agrees on: the validated
//! [`ShortCode`] key, the [`MappingStore`] contract the storage backends
//! implement, and the [`Shortener`] facade the HTTP layer talks to.

pub mod error;
pub mod shortcode;
pub mod shortener;
pub mod store;

pub use error::{CoreError, ShortenerError, StorageError};
pub use shortcode::ShortCode;
pub use shortener::{Shortened, Shortener};
pub use store::{Backend, Mapping, MappingStore};
