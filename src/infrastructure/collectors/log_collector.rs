//! Log-only collector for deployments without an analytics endpoint.

use async_trait::async_trait;
use tracing::{debug, info};

use super::service::{AnalyticsCollector, CollectorResult};
use crate::domain::analytics_event::AnalyticsEvent;

/// Writes every event to the log at `info` level.
pub struct LogCollector;

impl LogCollector {
    pub fn new() -> Self {
        debug!("Using LogCollector (no analytics endpoint configured)");
        Self
    }
}

impl Default for LogCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnalyticsCollector for LogCollector {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn collect(&self, event: &AnalyticsEvent) -> CollectorResult<()> {
        info!(
            target: "analytics",
            action = %event.action,
            category = %event.category,
            label = event.label.as_deref().unwrap_or(""),
            value = event.value,
            "analytics event"
        );
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_collector_always_succeeds() {
        let collector = LogCollector::new();

        assert!(collector.collect(&AnalyticsEvent::contact_form_start()).await.is_ok());
        assert!(collector.health_check().await);
        assert_eq!(collector.name(), "log");
    }
}
