//! Application state shared across request handlers.

use std::sync::Arc;

use paradise_core::cache::Cache;
use paradise_core::redirect::{ClickSink, RedirectTable};

use crate::{cache::MemoryCache, clicks::LogClickSink, config::Config, fetch::Upstream};

/// Shared application state.
///
/// This is cloned for each request handler and contains shared resources:
/// configuration, the byte cache, the redirect table, the click sink, and
/// the outbound HTTP client.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Byte cache for response and upstream bodies.
    pub cache: Arc<dyn Cache>,
    /// Slug to destination mapping for `/go/` links.
    pub redirects: Arc<RedirectTable>,
    /// Destination for click records.
    pub clicks: Arc<dyn ClickSink>,
    /// Outbound HTTP client.
    pub upstream: Upstream,
}

impl AppState {
    /// Creates a new AppState from configuration.
    pub fn new(config: Config) -> Self {
        let cache: Arc<dyn Cache> = Arc::new(MemoryCache::new(config.cache_capacity));

        Self {
            config: Arc::new(config),
            cache,
            redirects: Arc::new(RedirectTable::builtin()),
            clicks: Arc::new(LogClickSink),
            upstream: Upstream::new(),
        }
    }
}

// ============================================================================
// Test support
// ============================================================================
