use async_trait::async_trait;
use thiserror::Error;

use super::click::ClickRecord;

/// Errors a click sink may report.
///
/// Callers are expected to log these and move on; a sink failure must
/// never delay or fail the redirect itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("Click sink write failed: {0}")]
    WriteFailed(String),
}

/// Destination for click records.
///
/// The redirect handler hands records to a sink without awaiting the
/// result, so implementations can write to a log today and a durable
/// store later without the handler changing.
#[async_trait]
pub trait ClickSink: Send + Sync {
    async fn record(&self, click: ClickRecord) -> Result<(), SinkError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_failed_display() {
        let error = SinkError::WriteFailed("disk full".to_string());
        assert_eq!(error.to_string(), "Click sink write failed: disk full");
    }
}
