use crate::error::{AppError, Result};
use crate::extract::{ShortenForm, Submission};
use crate::model::ShortenResponse;
use crate::page;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::header::{HOST, LOCATION};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use shortcut_core::ShortCode;
use tracing::{debug, info};

/// `http://` plus the authority the client used to reach us.
fn request_base_url(headers: &HeaderMap, uri: &Uri) -> String {
    let host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))
        .unwrap_or("localhost");
    format!("http://{host}")
}

pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    uri: Uri,
    form: ShortenForm,
) -> Result<Response> {
    let shortened = state.shortener().shorten(&form.url).await?;

    let base_url = match state.base_url() {
        Some(base_url) => base_url.to_string(),
        None => request_base_url(&headers, &uri),
    };
    let short_url = shortened.code.to_url(&base_url);
    info!(code = %shortened.code, "shortened url");

    let response = match form.submission {
        Submission::Json => Json(ShortenResponse {
            short_url,
            long_url: shortened.long_url,
        })
        .into_response(),
        Submission::Form => Html(page::shortened(&shortened.long_url, &short_url)).into_response(),
    };
    Ok(response)
}

pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response> {
    // A code that cannot be parsed was never handed out.
    let Ok(code) = ShortCode::new(code) else {
        return Err(AppError::NotFound);
    };

    let Some(long_url) = state.shortener().resolve(&code).await? else {
        debug!(code = %code, "short code not found");
        return Err(AppError::NotFound);
    };

    let location = HeaderValue::try_from(long_url.as_str())
        .map_err(|_| AppError::InvalidRedirectTarget(long_url.clone()))?;
    Ok((StatusCode::FOUND, [(LOCATION, location)]).into_response())
}
