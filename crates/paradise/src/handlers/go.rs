//! Short-link redirect handler.
//!
//! `GET /go/<slug>` resolves the slug against the static table, records a
//! click, and answers with a 302. The click write never delays the
//! redirect.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;

use paradise_core::redirect::ClickRecord;

use crate::{error::AppError, state::AppState};

/// Resolve a short link and record the click (GET /go/{slug}).
pub async fn go(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let slug = slug.trim_end_matches('/');

    let Some(entry) = state.redirects.resolve(slug) else {
        tracing::debug!(slug, "Unknown short link");
        return Err(AppError::NotFound("Link not found"));
    };

    let referrer = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok());
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok());
    let click = ClickRecord::new(slug, entry, referrer, user_agent, Utc::now());

    let location = HeaderValue::from_str(&entry.url)
        .map_err(|err| AppError::Internal(format!("Invalid redirect target: {err}")))?;
    let click_value = HeaderValue::from_str(&click.header_value())
        .map_err(|err| AppError::Internal(format!("Invalid click header: {err}")))?;

    // Hand the record to the sink without delaying the redirect.
    let sink = Arc::clone(&state.clicks);
    tokio::spawn(async move {
        if let Err(err) = sink.record(click).await {
            tracing::warn!(error = %err, "Failed to record click");
        }
    });

    let mut response = StatusCode::FOUND.into_response();
    response.headers_mut().insert(header::LOCATION, location);
    response
        .headers_mut()
        .insert(HeaderName::from_static("x-paradise-click"), click_value);

    Ok(response)
}

/// `GET /go/` with nothing after the prefix. The wildcard route needs at
/// least one character, so the bare prefix answers the unknown-slug
/// response from its own route.
pub async fn empty_slug() -> AppError {
    AppError::NotFound("Link not found")
}
