use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{health_handler, home_handler, redirect_handler, shorten_handler};
use crate::state::AppState;

/// Fixed top-level paths a short code must never be.
pub const RESERVED_CODES: &[&str] = &["health", "shorten"];

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(home_handler))
            .route("/health", get(health_handler))
            .route("/shorten", post(shorten_handler))
            .route("/{code}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
