//! Cross-origin handling for the two endpoint families.
//!
//! The events and redirect routes are public and answer any origin. The
//! weather route only acknowledges origins on an explicit allow-list.
//! Preflight requests are answered straight from middleware, before any
//! routing or handler work.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::state::AppState;

/// Path served by the weather handler, which carries its own CORS policy.
pub const WEATHER_PATH: &str = "/api/weather";

/// Answer preflight requests with an empty acknowledgement.
///
/// Runs outermost so OPTIONS never reaches the router. The header family
/// depends on the path: the weather endpoint echoes the origin only when
/// allow-listed, everything else is wide open.
pub async fn preflight(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if request.method() != Method::OPTIONS {
        return next.run(request).await;
    }

    let mut response = StatusCode::NO_CONTENT.into_response();

    if request.uri().path() == WEATHER_PATH {
        let origin = request
            .headers()
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok());
        weather_cors_headers(
            response.headers_mut(),
            origin,
            &state.config.weather_allowed_origins,
        );
    } else {
        public_cors_headers(response.headers_mut());
    }

    response
}

/// Headers for the public family (events, redirects, health).
pub(crate) fn public_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
}

/// Headers for the weather family. The allow-origin header is only set
/// when the caller's origin is on the allow-list.
pub(crate) fn weather_cors_headers(
    headers: &mut HeaderMap,
    origin: Option<&str>,
    allowed: &[String],
) {
    if let Some(origin) = allowed_origin(origin, allowed) {
        if let Ok(value) = HeaderValue::from_str(origin) {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
    }
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static("86400"),
    );
}

/// Return the origin when it is on the allow-list.
fn allowed_origin<'a>(origin: Option<&'a str>, allowed: &[String]) -> Option<&'a str> {
    origin.filter(|o| allowed.iter().any(|entry| entry == o))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_list() -> Vec<String> {
        vec![
            "https://paradisesurfsidesc.com".to_string(),
            "https://www.paradisesurfsidesc.com".to_string(),
        ]
    }

    #[test]
    fn test_allowed_origin_passes_through() {
        let allowed = allow_list();
        assert_eq!(
            allowed_origin(Some("https://paradisesurfsidesc.com"), &allowed),
            Some("https://paradisesurfsidesc.com")
        );
    }

    #[test]
    fn test_unknown_origin_is_rejected() {
        let allowed = allow_list();
        assert_eq!(allowed_origin(Some("https://evil.example"), &allowed), None);
        assert_eq!(allowed_origin(None, &allowed), None);
    }

    #[test]
    fn test_public_family_headers() {
        let mut headers = HeaderMap::new();
        public_cors_headers(&mut headers);

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET,OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "content-type");
    }

    #[test]
    fn test_weather_family_echoes_allowed_origin() {
        let mut headers = HeaderMap::new();
        weather_cors_headers(
            &mut headers,
            Some("https://www.paradisesurfsidesc.com"),
            &allow_list(),
        );

        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://www.paradisesurfsidesc.com"
        );
        assert_eq!(headers[header::VARY], "Origin");
        assert_eq!(headers[header::ACCESS_CONTROL_MAX_AGE], "86400");
    }

    #[test]
    fn test_weather_family_omits_origin_when_disallowed() {
        let mut headers = HeaderMap::new();
        weather_cors_headers(&mut headers, Some("https://evil.example"), &allow_list());

        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert_eq!(headers[header::VARY], "Origin");
    }
}
