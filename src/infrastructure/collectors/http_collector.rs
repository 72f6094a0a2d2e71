//! HTTP collectors posting JSON to an external analytics endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::debug;

use super::service::{AnalyticsCollector, CollectorError, CollectorResult};
use crate::domain::analytics_event::AnalyticsEvent;

/// Shared POST logic: sends `body`, maps non-2xx to [`CollectorError::Rejected`]
/// and remembers the outcome for health checks.
struct JsonPoster {
    url: String,
    client: Client,
    healthy: AtomicBool,
}

impl JsonPoster {
    fn new(url: impl Into<String>, timeout: Duration) -> CollectorResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            url: url.into(),
            client,
            healthy: AtomicBool::new(true),
        })
    }

    async fn post(&self, body: &Value) -> CollectorResult<()> {
        let result = self.send(body).await;
        self.healthy.store(result.is_ok(), Ordering::Relaxed);
        result
    }

    async fn send(&self, body: &Value) -> CollectorResult<()> {
        let response = self.client.post(&self.url).json(body).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(CollectorError::Rejected {
                status: status.as_u16(),
                body,
            })
        }
    }

    fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::Relaxed)
    }
}

/// Sends `{ name, properties, timestamp }` for every event.
pub struct EventSinkCollector {
    poster: JsonPoster,
}

impl EventSinkCollector {
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> CollectorResult<Self> {
        let url = url.into();
        debug!(%url, "Using event sink collector");
        Ok(Self {
            poster: JsonPoster::new(url, timeout)?,
        })
    }

    pub fn payload(event: &AnalyticsEvent) -> Value {
        json!({
            "name": event.action,
            "properties": event.properties(),
            "timestamp": event.occurred_at.to_rfc3339(),
        })
    }
}

#[async_trait]
impl AnalyticsCollector for EventSinkCollector {
    fn name(&self) -> &'static str {
        "event_sink"
    }

    async fn collect(&self, event: &AnalyticsEvent) -> CollectorResult<()> {
        self.poster.post(&Self::payload(event)).await
    }

    async fn health_check(&self) -> bool {
        self.poster.is_healthy()
    }
}

/// Sends `{ events: [{ name, params }] }` for every event.
pub struct MeasurementCollector {
    poster: JsonPoster,
}

impl MeasurementCollector {
    /// # Errors
    ///
    /// Returns [`CollectorError::Http`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> CollectorResult<Self> {
        let url = url.into();
        debug!(%url, "Using measurement collector");
        Ok(Self {
            poster: JsonPoster::new(url, timeout)?,
        })
    }

    pub fn payload(event: &AnalyticsEvent) -> Value {
        json!({
            "events": [{
                "name": event.action,
                "params": event.measurement_params(),
            }]
        })
    }
}

#[async_trait]
impl AnalyticsCollector for MeasurementCollector {
    fn name(&self) -> &'static str {
        "measurement"
    }

    async fn collect(&self, event: &AnalyticsEvent) -> CollectorResult<()> {
        self.poster.post(&Self::payload(event)).await
    }

    async fn health_check(&self) -> bool {
        self.poster.is_healthy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_sink_payload() {
        let payload = EventSinkCollector::payload(&AnalyticsEvent::social_click("github"));

        assert_eq!(payload["name"], "social_click");
        assert_eq!(payload["properties"]["category"], "engagement");
        assert_eq!(payload["properties"]["label"], "github");
        assert!(payload["properties"].get("value").is_none());
    }

    #[test]
    fn test_measurement_payload() {
        let payload = MeasurementCollector::payload(&AnalyticsEvent::performance("LCP", 1830));
        let event = &payload["events"][0];

        assert_eq!(event["name"], "performance");
        assert_eq!(event["params"]["event_category"], "technical");
        assert_eq!(event["params"]["event_label"], "LCP");
        assert_eq!(event["params"]["value"], 1830);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_marks_unhealthy() {
        let collector =
            EventSinkCollector::new("http://127.0.0.1:9/collect", Duration::from_millis(200))
                .unwrap();

        assert!(collector.health_check().await);
        let result = collector.collect(&AnalyticsEvent::contact_form_start()).await;

        assert!(result.is_err());
        assert!(!collector.health_check().await);
    }
}
