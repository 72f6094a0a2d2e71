//! Collector trait and error types.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::analytics_event::AnalyticsEvent;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("collector request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("collector rejected event with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("collector timed out after {0} ms")]
    Timeout(u64),
}

pub type CollectorResult<T> = Result<T, CollectorError>;

/// A destination for analytics events.
///
/// Collectors are called one event at a time from the analytics worker. A
/// failing collector never affects the others or the request that produced
/// the event.
///
/// # Implementations
///
/// - [`crate::infrastructure::collectors::EventSinkCollector`]
/// - [`crate::infrastructure::collectors::MeasurementCollector`]
/// - [`crate::infrastructure::collectors::LogCollector`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsCollector: Send + Sync {
    /// Short name used in logs and the health report.
    fn name(&self) -> &'static str;

    /// Delivers one event.
    ///
    /// # Errors
    ///
    /// Returns [`CollectorError`] when delivery fails. The worker logs the
    /// error and moves on.
    async fn collect(&self, event: &AnalyticsEvent) -> CollectorResult<()>;

    /// Reports whether the last delivery attempt succeeded.
    async fn health_check(&self) -> bool;
}
