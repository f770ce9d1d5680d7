/// Returns the cache key for an assembled events response, keyed by the
/// request path and query so distinct windows cache separately.
pub fn events_response_key(request_uri: &str) -> String {
    format!("events:response:{}", request_uri)
}

/// Returns the cache key for a raw calendar feed fetch.
pub fn feed_key(feed_url: &str) -> String {
    format!("feed:{}", feed_url)
}

/// Returns the cache key for a weather upstream fetch.
pub fn weather_key(upstream_url: &str) -> String {
    format!("weather:{}", upstream_url)
}
