use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use shortcut_core::ShortenerError;
use thiserror::Error;
use tracing::{error, warn};

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("URL is required")]
    MissingUrl,
    #[error("{0}")]
    BadRequest(String),
    #[error("URL not found")]
    NotFound,
    #[error("stored URL cannot be used as a redirect target: {0}")]
    InvalidRedirectTarget(String),
    #[error(transparent)]
    Shortener(ShortenerError),
}

impl From<ShortenerError> for AppError {
    fn from(error: ShortenerError) -> Self {
        match error {
            ShortenerError::MissingUrl => AppError::MissingUrl,
            other => AppError::Shortener(other),
        }
    }
}

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingUrl => json_error(StatusCode::BAD_REQUEST, "URL is required"),
            AppError::BadRequest(message) => json_error(StatusCode::BAD_REQUEST, message),
            AppError::NotFound => (StatusCode::NOT_FOUND, "URL not found").into_response(),
            AppError::InvalidRedirectTarget(url) => {
                error!(url = %url, "stored url is not a valid location header");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "stored URL cannot be used as a redirect target",
                )
            }
            AppError::Shortener(ShortenerError::Storage(source)) if source.is_unavailable() => {
                warn!(error = %source, "storage backend unavailable");
                json_error(StatusCode::SERVICE_UNAVAILABLE, "storage backend unavailable")
            }
            AppError::Shortener(source) => {
                error!(error = %source, "request failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, source.to_string())
            }
        }
    }
}
