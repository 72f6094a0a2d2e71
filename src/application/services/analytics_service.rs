//! Non-blocking analytics dispatch.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::warn;

use crate::domain::analytics_event::{AnalyticsEvent, EventCategory};
use crate::domain::entities::PortfolioDomain;

/// Queue counters shown on the admin dashboard and the health report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalyticsStats {
    pub queued: u64,
    pub dropped: u64,
    pub capacity: usize,
    pub available: usize,
}

/// Front door for analytics events.
///
/// Events are pushed onto a bounded channel with `try_send`, so tracking never
/// waits and never fails the caller. When the queue is full or the worker has
/// stopped, the event is dropped and counted.
pub struct AnalyticsService {
    tx: mpsc::Sender<AnalyticsEvent>,
    queued: AtomicU64,
    dropped: AtomicU64,
}

impl AnalyticsService {
    pub fn new(tx: mpsc::Sender<AnalyticsEvent>) -> Self {
        Self {
            tx,
            queued: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    pub fn dispatch(&self, event: AnalyticsEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {
                self.queued.fetch_add(1, Ordering::Relaxed);
                metrics::counter!("analytics_events_queued_total").increment(1);
            }
            Err(TrySendError::Full(event)) => {
                self.record_drop(&event, "queue full");
            }
            Err(TrySendError::Closed(event)) => {
                self.record_drop(&event, "worker stopped");
            }
        }
    }

    fn record_drop(&self, event: &AnalyticsEvent, reason: &'static str) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("analytics_events_dropped_total", "reason" => reason).increment(1);
        warn!(action = %event.action, reason, "Analytics event dropped");
    }

    pub fn dispatch_all(&self, events: impl IntoIterator<Item = AnalyticsEvent>) {
        for event in events {
            self.dispatch(event);
        }
    }

    /// Records a free-form event.
    pub fn track_event(
        &self,
        action: &str,
        category: EventCategory,
        label: Option<&str>,
        value: Option<i64>,
    ) {
        self.dispatch(AnalyticsEvent::new(
            action,
            category,
            label.map(str::to_string),
            value,
        ));
    }

    pub fn track_page_view(&self, url: &str) {
        self.dispatch(AnalyticsEvent::page_view(url));
    }

    pub fn track_domain_switch(&self, from: PortfolioDomain, to: PortfolioDomain) {
        self.dispatch(AnalyticsEvent::domain_switch(from, to));
    }

    pub fn track_resume_download(&self, domain: PortfolioDomain) {
        self.dispatch(AnalyticsEvent::resume_download(domain));
    }

    pub fn track_resume_view(&self, domain: PortfolioDomain) {
        self.dispatch(AnalyticsEvent::resume_view(domain));
    }

    pub fn track_contact_form_submit(&self) {
        self.dispatch(AnalyticsEvent::contact_form_submit());
    }

    pub fn track_error(&self, error: &str, page: &str) {
        self.dispatch(AnalyticsEvent::error(error, page));
    }

    pub fn is_running(&self) -> bool {
        !self.tx.is_closed()
    }

    pub fn stats(&self) -> AnalyticsStats {
        AnalyticsStats {
            queued: self.queued.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            capacity: self.tx.max_capacity(),
            available: self.tx.capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dispatch_enqueues() {
        let (tx, mut rx) = mpsc::channel(4);
        let service = AnalyticsService::new(tx);

        service.track_event("custom", EventCategory::Engagement, Some("x"), Some(3));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.action, "custom");
        assert_eq!(event.value, Some(3));
        assert_eq!(service.stats().queued, 1);
    }

    #[tokio::test]
    async fn test_full_queue_drops_without_error() {
        let (tx, _rx) = mpsc::channel(1);
        let service = AnalyticsService::new(tx);

        service.track_contact_form_submit();
        service.track_contact_form_submit();

        let stats = service.stats();
        assert_eq!(stats.queued, 1);
        assert_eq!(stats.dropped, 1);
        assert_eq!(stats.available, 0);
    }

    #[tokio::test]
    async fn test_closed_queue_drops() {
        let (tx, rx) = mpsc::channel(4);
        let service = AnalyticsService::new(tx);
        drop(rx);

        service.track_resume_download(PortfolioDomain::Cs);

        assert!(!service.is_running());
        assert_eq!(service.stats().dropped, 1);
    }
}
