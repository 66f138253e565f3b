use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::{Form, Json};

use crate::error::AppError;
use crate::model::ShortenRequest;

/// How the client submitted the URL, which is also how it gets answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Json,
    Form,
}

/// The `url` field of a `POST /shorten` body, from JSON or form data.
///
/// A missing or empty `url` is rejected here, before the shortener runs.
/// Anything else, whitespace included, is passed on verbatim.
#[derive(Debug, Clone)]
pub struct ShortenForm {
    pub url: String,
    pub submission: Submission,
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

impl<S> FromRequest<S> for ShortenForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (submission, body) = if is_json(req.headers()) {
            let Json(body) = Json::<ShortenRequest>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
            (Submission::Json, body)
        } else {
            // Anything that is not a readable form simply carries no `url`.
            let body = Form::<ShortenRequest>::from_request(req, state)
                .await
                .map(|Form(body)| body)
                .unwrap_or_default();
            (Submission::Form, body)
        };

        match body.url {
            Some(url) if !url.is_empty() => Ok(Self { url, submission }),
            _ => Err(AppError::MissingUrl),
        }
    }
}
