mod error;
mod keys;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{events_response_key, feed_key, weather_key};
pub use traits::Cache;
