use std::{env, time::Duration};

/// Default upstream for the Tempest/WeatherFlow forecast API.
pub const DEFAULT_TEMPEST_API_URL: &str = "https://swd.weatherflow.com/swd/rest/better_forecast";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream iCalendar feed URL. `/api/events` reports an error when unset.
    pub ics_url: Option<String>,
    /// Attribution string included in the events payload.
    pub events_source: String,
    /// TTL for assembled `/api/events` responses in seconds (default: 3,600)
    pub events_cache_ttl_seconds: u64,
    /// TTL for raw feed bodies in seconds (default: 3,600)
    pub feed_cache_ttl_seconds: u64,
    /// TTL for upstream weather bodies in seconds (default: 60)
    pub weather_cache_ttl_seconds: u64,
    /// Tempest station to query (default: "204460")
    pub tempest_station_id: String,
    /// Tempest API token. `/api/weather` reports an error when unset.
    pub tempest_token: Option<String>,
    /// Base URL of the Tempest forecast endpoint.
    pub tempest_api_url: String,
    /// Origins allowed to call `/api/weather` from a browser.
    pub weather_allowed_origins: Vec<String>,
    /// Maximum number of cache entries (default: 1,024)
    pub cache_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ICS_URL` - Upstream iCalendar feed URL (no default)
    /// - `EVENTS_SOURCE` - Attribution string for the events payload
    /// - `EVENTS_CACHE_TTL_SECONDS` - Events response TTL (default: 3,600)
    /// - `FEED_CACHE_TTL_SECONDS` - Raw feed TTL (default: 3,600)
    /// - `WEATHER_CACHE_TTL_SECONDS` - Weather body TTL (default: 60)
    /// - `TEMPEST_STATION_ID` - Tempest station id (default: "204460")
    /// - `TEMPEST_TOKEN` - Tempest API token (no default)
    /// - `TEMPEST_API_URL` - Tempest endpoint override
    /// - `WEATHER_ALLOWED_ORIGINS` - Comma-separated origin allow-list
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 1,024)
    pub fn from_env() -> Self {
        Self {
            ics_url: env::var("ICS_URL").ok().filter(|v| !v.is_empty()),
            events_source: env::var("EVENTS_SOURCE")
                .unwrap_or_else(|_| "Town of Surfside Beach (Events)".to_string()),
            events_cache_ttl_seconds: env::var("EVENTS_CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3_600),
            feed_cache_ttl_seconds: env::var("FEED_CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3_600),
            weather_cache_ttl_seconds: env::var("WEATHER_CACHE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            tempest_station_id: env::var("TEMPEST_STATION_ID")
                .unwrap_or_else(|_| "204460".to_string()),
            tempest_token: env::var("TEMPEST_TOKEN").ok().filter(|v| !v.is_empty()),
            tempest_api_url: env::var("TEMPEST_API_URL")
                .unwrap_or_else(|_| DEFAULT_TEMPEST_API_URL.to_string()),
            weather_allowed_origins: env::var("WEATHER_ALLOWED_ORIGINS")
                .ok()
                .map(|v| parse_origins(&v))
                .filter(|v| !v.is_empty())
                .unwrap_or_else(default_origins),
            cache_capacity: env::var("CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1_024),
        }
    }

    /// Get the events response TTL as a Duration.
    pub fn events_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.events_cache_ttl_seconds)
    }

    /// Get the raw feed TTL as a Duration.
    pub fn feed_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.feed_cache_ttl_seconds)
    }

    /// Get the weather body TTL as a Duration.
    pub fn weather_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.weather_cache_ttl_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Split a comma-separated origin list, dropping empty segments.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Origins allowed to call `/api/weather` when no override is configured.
fn default_origins() -> Vec<String> {
    vec![
        "https://davidleetaylor07.github.io".to_string(),
        "https://paradisesurfsidesc.com".to_string(),
        "https://www.paradisesurfsidesc.com".to_string(),
    ]
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for tests, independent of the process environment.
    pub fn for_tests() -> Self {
        Self {
            ics_url: None,
            events_source: "Town of Surfside Beach (Events)".to_string(),
            events_cache_ttl_seconds: 3_600,
            feed_cache_ttl_seconds: 3_600,
            weather_cache_ttl_seconds: 60,
            tempest_station_id: "204460".to_string(),
            tempest_token: None,
            tempest_api_url: DEFAULT_TEMPEST_API_URL.to_string(),
            weather_allowed_origins: default_origins(),
            cache_capacity: 1_024,
        }
    }
}
