use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::analytics_event::AnalyticsEvent;
use crate::infrastructure::collectors::{AnalyticsCollector, CollectorError};

/// Drains the analytics channel and forwards each event to every collector.
///
/// Collectors are called one after another, each bounded by `call_timeout`.
/// A failure or timeout in one collector is logged and does not prevent the
/// next collector from receiving the same event. Returns once every sender
/// has been dropped.
pub async fn run_analytics_worker(
    mut rx: mpsc::Receiver<AnalyticsEvent>,
    collectors: Vec<Arc<dyn AnalyticsCollector>>,
    call_timeout: Duration,
) {
    while let Some(event) = rx.recv().await {
        for collector in &collectors {
            let outcome = tokio::time::timeout(call_timeout, collector.collect(&event))
                .await
                .unwrap_or_else(|_| {
                    Err(CollectorError::Timeout(call_timeout.as_millis() as u64))
                });

            match outcome {
                Ok(()) => {
                    metrics::counter!("analytics_events_delivered_total", "collector" => collector.name())
                        .increment(1);
                }
                Err(e) => {
                    metrics::counter!("analytics_events_failed_total", "collector" => collector.name())
                        .increment(1);
                    warn!(
                        collector = collector.name(),
                        action = %event.action,
                        error = %e,
                        "Failed to deliver analytics event"
                    );
                }
            }
        }
    }
    debug!("Analytics channel closed, worker exiting");
}
