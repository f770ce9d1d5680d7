use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    cors,
    handlers::{
        events::events,
        go::{empty_slug, go},
        health::livez,
        weather::weather,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for the public endpoints
    let public_cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // The weather proxy only answers to the site's own origins
    let weather_origins: Vec<HeaderValue> = state
        .config
        .weather_allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let weather_cors = CorsLayer::new()
        .allow_origin(weather_origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(86_400));

    let public_routes = Router::new()
        // Every path under the events prefix serves the events payload;
        // the response cache keys on the full request URI.
        .route("/api/events", get(events))
        .route("/api/events/", get(events))
        .route("/api/events/{*rest}", get(events))
        .route("/go/{*slug}", get(go))
        .route("/go/", get(empty_slug))
        .route("/livez", get(livez))
        .fallback(not_found)
        .layer(public_cors);

    let weather_routes = Router::new()
        .route("/api/weather", get(weather))
        .layer(weather_cors);

    public_routes
        .merge(weather_routes)
        .layer(middleware::from_fn_with_state(state.clone(), cors::preflight))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .with_state(state)
}

/// Fallback for paths outside the API surface.
async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
