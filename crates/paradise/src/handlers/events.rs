//! Events feed handler.
//!
//! `GET /api/events?days=N` pulls the town calendar feed, parses it, and
//! serves the upcoming window as JSON. Two cache layers sit in front of
//! the work: one on the assembled response keyed by request URI, one on
//! the raw feed body keyed by the feed URL.

use axum::{
    extract::{OriginalUri, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Serialize;

use paradise_core::cache::{events_response_key, feed_key};
use paradise_core::feed::{clamp_days, iso8601, parse_events, select_upcoming, EventRecord};

use crate::{cache::get_or_store, error::AppError, state::AppState};

/// Assembled events payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventsBody {
    updated_at: String,
    source: String,
    events: Vec<EventRecord>,
}

/// List upcoming events (GET /api/events).
pub async fn events(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response, AppError> {
    let days = clamp_days(days_param(uri.query()).as_deref());

    let Some(ics_url) = state.config.ics_url.clone() else {
        return Err(AppError::Config("Missing ICS_URL env var".to_string()));
    };

    let response_key = events_response_key(&uri.to_string());
    let compute_state = state.clone();
    let body = get_or_store(
        &state.cache,
        &response_key,
        state.config.events_cache_ttl(),
        move || async move { build_events_body(&compute_state, &ics_url, days).await },
    )
    .await?;

    let cache_control = format!("public, max-age={}", state.config.events_cache_ttl_seconds);
    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/json; charset=utf-8".to_string(),
            ),
            (header::CACHE_CONTROL, cache_control),
        ],
        body,
    )
        .into_response())
}

/// Fetch, parse, and window the feed into the response body bytes.
async fn build_events_body(
    state: &AppState,
    ics_url: &str,
    days: i64,
) -> Result<Vec<u8>, AppError> {
    let upstream = state.upstream.clone();
    let url = ics_url.to_string();
    let raw = get_or_store(
        &state.cache,
        &feed_key(ics_url),
        state.config.feed_cache_ttl(),
        move || async move {
            upstream
                .fetch_feed(&url)
                .await
                .map(String::into_bytes)
                .map_err(|err| {
                    tracing::warn!(url = %url, error = %err, "Calendar feed fetch failed");
                    AppError::Upstream("Failed to fetch ICS".to_string())
                })
        },
    )
    .await?;

    let text = String::from_utf8_lossy(&raw);
    let events = parse_events(&text);
    let records = select_upcoming(events, Utc::now(), days);

    tracing::debug!(days, count = records.len(), "Assembled events window");

    let body = EventsBody {
        updated_at: iso8601(Utc::now()),
        source: state.config.events_source.clone(),
        events: records,
    };

    serde_json::to_vec(&body).map_err(|err| AppError::Internal(err.to_string()))
}

/// First `days` value in the query string, if any.
///
/// Parsed by hand so a malformed query degrades to the default window
/// instead of rejecting the request.
fn days_param(query: Option<&str>) -> Option<String> {
    query.and_then(|q| {
        url::form_urlencoded::parse(q.as_bytes())
            .find(|(name, _)| name == "days")
            .map(|(_, value)| value.into_owned())
    })
}
