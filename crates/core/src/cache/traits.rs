use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Trait for the byte-oriented payload cache.
///
/// Entries are written with an optional TTL and expire on their own; this
/// service never deletes, so the surface is deliberately just get and set.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Gets a value from the cache by key. Expired entries read as absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache with an optional TTL.
    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;
}
