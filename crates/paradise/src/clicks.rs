use async_trait::async_trait;

use paradise_core::redirect::{ClickRecord, ClickSink, SinkError};

/// Click sink that writes each record to the structured log.
///
/// This is the server-side truth for outbound link tracking.
// TODO: forward click records to an analytics backend (GA4 measurement
// protocol) instead of only logging them.
#[derive(Debug, Default)]
pub struct LogClickSink;

#[async_trait]
impl ClickSink for LogClickSink {
    async fn record(&self, click: ClickRecord) -> Result<(), SinkError> {
        let line = serde_json::to_string(&click)
            .map_err(|err| SinkError::WriteFailed(err.to_string()))?;

        tracing::info!(slug = %click.slug, category = %click.category, record = %line, "Outbound click");
        Ok(())
    }
}
