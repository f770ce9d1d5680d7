//! Weather proxy handler.
//!
//! `GET /api/weather` queries the Tempest station through the forecast
//! API, keeping the token server-side, and serves a small stable payload
//! for the landing page. The raw upstream body is cached briefly; the
//! client-facing response is never cached.

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;
use url::Url;

use paradise_core::{cache::weather_key, feed::iso8601};

use crate::{cache::get_or_store, config::Config, fetch::FetchError, state::AppState};

/// Shaped weather payload served to the page.
#[derive(Debug, Serialize)]
struct WeatherPayload {
    ok: bool,
    station_id: Option<i64>,
    temp_f: Option<f64>,
    condition: Option<String>,
    icon: &'static str,
    updated_iso: Option<String>,
    source: &'static str,
    label: &'static str,
}

/// Current conditions at the house (GET /api/weather).
pub async fn weather(State(state): State<AppState>) -> Response {
    let Some(token) = state.config.tempest_token.clone() else {
        return weather_error(StatusCode::INTERNAL_SERVER_ERROR, "Missing TEMPEST_TOKEN");
    };

    let url = match forecast_url(&state.config, &token) {
        Ok(url) => url,
        Err(err) => {
            tracing::error!(error = %err, "Invalid TEMPEST_API_URL");
            return weather_error(StatusCode::INTERNAL_SERVER_ERROR, "Invalid TEMPEST_API_URL");
        }
    };

    let upstream = state.upstream.clone();
    let fetch_url = url.to_string();
    let result = get_or_store(
        &state.cache,
        &weather_key(url.as_str()),
        state.config.weather_cache_ttl(),
        move || async move { upstream.fetch_weather(&fetch_url).await },
    )
    .await;

    let raw = match result {
        Ok(raw) => raw,
        Err(FetchError::Status(status)) => {
            return weather_error(StatusCode::BAD_GATEWAY, &format!("Upstream HTTP {status}"));
        }
        Err(FetchError::Transport(err)) => {
            tracing::warn!(error = %err, "Weather fetch failed");
            return weather_error(StatusCode::BAD_GATEWAY, "Upstream fetch failed");
        }
    };

    let data: Value = match serde_json::from_slice(&raw) {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!(error = %err, "Weather body was not valid JSON");
            return weather_error(StatusCode::BAD_GATEWAY, "Invalid upstream JSON");
        }
    };

    let payload = shape_payload(&data, &state.config.tempest_station_id);
    no_store_json(StatusCode::OK, payload)
}

/// Build the forecast URL with station, unit, and token parameters.
fn forecast_url(config: &Config, token: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&config.tempest_api_url)?;
    url.query_pairs_mut()
        .append_pair("station_id", &config.tempest_station_id)
        .append_pair("units_temp", "f")
        .append_pair("units_wind", "mph")
        .append_pair("units_pressure", "inhg")
        .append_pair("units_precip", "in")
        .append_pair("units_distance", "mi")
        .append_pair("token", token);
    Ok(url)
}

/// Reduce the upstream forecast body to the fields the page needs.
fn shape_payload(data: &Value, station_id: &str) -> WeatherPayload {
    let empty = Value::Null;
    let cc = data.get("current_conditions").unwrap_or(&empty);

    let temp_f = cc.get("air_temperature").and_then(Value::as_f64);
    let condition = cc
        .get("conditions")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned);
    let icon = pick_icon(condition.as_deref().unwrap_or(""));
    let updated_iso = cc
        .get("time")
        .and_then(Value::as_i64)
        .filter(|ts| *ts != 0)
        .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
        .map(iso8601);

    WeatherPayload {
        ok: true,
        station_id: station_id.parse().ok(),
        temp_f,
        condition,
        icon,
        updated_iso,
        source: "tempest_station",
        label: "Current Weather · At the House",
    }
}

/// Basic icon mapping, first match wins.
fn pick_icon(conditions: &str) -> &'static str {
    let c = conditions.to_lowercase();
    if c.contains("thunder") {
        "⛈️"
    } else if c.contains("snow") {
        "❄️"
    } else if c.contains("rain") || c.contains("drizzle") {
        "🌧️"
    } else if c.contains("fog") || c.contains("mist") {
        "🌫️"
    } else if c.contains("cloud") {
        "⛅"
    } else if c.contains("clear") || c.contains("sun") {
        "☀️"
    } else {
        "⛅"
    }
}

fn weather_error(status: StatusCode, message: &str) -> Response {
    no_store_json(status, serde_json::json!({ "ok": false, "error": message }))
}

/// JSON response with browser caching disabled.
fn no_store_json(status: StatusCode, payload: impl Serialize) -> Response {
    (
        status,
        [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
        Json(payload),
    )
        .into_response()
}
