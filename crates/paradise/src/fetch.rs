use reqwest::header::{ACCEPT, USER_AGENT};
use thiserror::Error;

/// User agent sent when pulling the town calendar feed.
pub const FEED_USER_AGENT: &str = "ParadiseEventsBot/1.0";

/// Error from an outbound request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The upstream answered with a non-success status
    #[error("upstream returned HTTP {0}")]
    Status(u16),

    /// The request never completed (DNS, connect, timeout, body read)
    #[error("request failed: {0}")]
    Transport(String),
}

/// Outbound HTTP client for the calendar feed and the weather API.
///
/// Wraps a single `reqwest::Client` so connection pools are shared across
/// handlers.
#[derive(Debug, Clone)]
pub struct Upstream {
    http: reqwest::Client,
}

impl Upstream {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Fetch the raw iCalendar feed body as text.
    pub async fn fetch_feed(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .http
            .get(url)
            .header(USER_AGENT, FEED_USER_AGENT)
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        response
            .text()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))
    }

    /// Fetch the raw weather body from the Tempest API.
    pub async fn fetch_weather(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

impl Default for Upstream {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_fetch_feed_sends_user_agent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/feed.ics")
            .match_header("user-agent", FEED_USER_AGENT)
            .with_body("BEGIN:VCALENDAR\nEND:VCALENDAR\n")
            .create_async()
            .await;

        let upstream = Upstream::new();
        let body = upstream
            .fetch_feed(&format!("{}/feed.ics", server.url()))
            .await
            .unwrap();

        assert!(body.starts_with("BEGIN:VCALENDAR"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_feed_non_success_is_status_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/feed.ics")
            .with_status(500)
            .create_async()
            .await;

        let upstream = Upstream::new();
        let err = upstream
            .fetch_feed(&format!("{}/feed.ics", server.url()))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status(500)));
    }

    #[tokio::test]
    async fn test_fetch_weather_sends_accept_json() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/swd/rest/better_forecast")
            .match_header("accept", "application/json")
            .with_body(r#"{"current_conditions":{}}"#)
            .create_async()
            .await;

        let upstream = Upstream::new();
        let body = upstream
            .fetch_weather(&format!("{}/swd/rest/better_forecast", server.url()))
            .await
            .unwrap();

        assert_eq!(body, br#"{"current_conditions":{}}"#.to_vec());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_weather_non_success_is_status_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/swd/rest/better_forecast")
            .with_status(403)
            .create_async()
            .await;

        let upstream = Upstream::new();
        let err = upstream
            .fetch_weather(&format!("{}/swd/rest/better_forecast", server.url()))
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status(403)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let upstream = Upstream::new();
        let err = upstream
            .fetch_feed("http://127.0.0.1:1/feed.ics")
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
    }
}
