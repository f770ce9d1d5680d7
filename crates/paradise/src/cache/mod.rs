//! Cache plumbing for the edge handlers.
//!
//! The handlers cache opaque byte payloads (response bodies, upstream
//! bodies) behind the `paradise_core::cache::Cache` trait. `get_or_store`
//! implements the shared read path: cache failures degrade to a miss, and
//! writes happen off the request path.

use std::{future::Future, sync::Arc, time::Duration};

use paradise_core::cache::Cache;

pub mod memory;

pub use memory::MemoryCache;

/// Cache-aside read for `key`, computing and storing the value on a miss.
///
/// A cache read failure is treated as a miss. A failed compute is returned
/// to the caller and never cached. The store happens in a background task
/// so the response is not held up by the write; a failed store only logs.
pub async fn get_or_store<F, Fut, E>(
    cache: &Arc<dyn Cache>,
    key: &str,
    ttl: Duration,
    compute: F,
) -> Result<Vec<u8>, E>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<u8>, E>>,
{
    match cache.get(key).await {
        Ok(Some(bytes)) => {
            tracing::trace!(key, "Cache hit");
            return Ok(bytes);
        }
        Ok(None) => {
            tracing::trace!(key, "Cache miss");
        }
        Err(err) => {
            tracing::warn!(key, error = %err, "Cache read failed");
        }
    }

    let value = compute().await?;

    let cache = Arc::clone(cache);
    let key = key.to_string();
    let bytes = value.clone();
    tokio::spawn(async move {
        if let Err(err) = cache.set(&key, &bytes, Some(ttl)).await {
            tracing::warn!(key, error = %err, "Failed to cache value");
        }
    });

    Ok(value)
}
