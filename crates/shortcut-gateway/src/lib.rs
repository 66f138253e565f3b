//! HTTP surface of the Shortcut URL shortener.
//!
//! The router exposes `POST /shorten` and `GET /{code}` on top of a
//! [`Shortener`](shortcut_core::Shortener), plus a small HTML form at `/` and
//! a health check.

pub mod app;
pub mod cli;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod model;
pub mod page;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use cli::Cli;
pub use error::AppError;
pub use state::AppState;
