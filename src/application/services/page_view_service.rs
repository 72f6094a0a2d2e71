//! Open page views and beacon ingestion.

use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::services::AnalyticsService;
use crate::domain::entities::PortfolioDomain;
use crate::domain::trackers::{FlushReason, PageSignal, PageTrackers};
use crate::error::AppError;

/// Outcome of one beacon batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub accepted: usize,
    pub ignored: usize,
    pub events: usize,
    pub closed: bool,
}

/// Outcome of one sweeper pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SweepSummary {
    pub flushed: usize,
    pub expired: usize,
}

/// Keeps the trackers of every open page view.
///
/// Events are collected while the map lock is held and dispatched after it is
/// released.
pub struct PageViewService {
    views: Mutex<HashMap<Uuid, PageTrackers>>,
    analytics: Arc<AnalyticsService>,
    idle_timeout: Duration,
    flush_period: Duration,
}

impl PageViewService {
    pub fn new(
        analytics: Arc<AnalyticsService>,
        idle_timeout: Duration,
        flush_period: Duration,
    ) -> Self {
        Self {
            views: Mutex::new(HashMap::new()),
            analytics,
            idle_timeout,
            flush_period,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, PageTrackers>> {
        self.views.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Opens a page view for a rendered page and records the `page_view` event.
    pub fn open(&self, domain: PortfolioDomain, page: &str, url: &str) -> Uuid {
        self.open_at(domain, page, url, Instant::now())
    }

    pub fn open_at(&self, domain: PortfolioDomain, page: &str, url: &str, now: Instant) -> Uuid {
        let id = Uuid::new_v4();
        self.lock().insert(id, PageTrackers::start(domain, page, now, self.flush_period));
        self.analytics.track_page_view(url);
        debug!(page_view = %id, %domain, page, "Page view opened");
        id
    }

    pub fn ingest(&self, id: Uuid, signals: &[PageSignal]) -> Result<IngestSummary, AppError> {
        self.ingest_at(id, signals, Instant::now())
    }

    /// Applies a batch of signals to one page view.
    ///
    /// Signals that a tracker rejects are skipped and counted as ignored. An
    /// `unload` signal closes the view after the batch.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the page view is unknown or closed.
    pub fn ingest_at(
        &self,
        id: Uuid,
        signals: &[PageSignal],
        now: Instant,
    ) -> Result<IngestSummary, AppError> {
        let mut events = Vec::new();
        let mut ignored = 0;
        let mut closed = false;
        {
            let mut views = self.lock();
            let trackers = views.get_mut(&id).ok_or_else(|| {
                AppError::not_found("Page view not found", json!({ "page_view": id }))
            })?;

            for signal in signals {
                match trackers.apply(signal, now) {
                    Ok(produced) => events.extend(produced),
                    Err(e) => {
                        ignored += 1;
                        debug!(page_view = %id, error = %e, "Signal ignored");
                    }
                }
                if matches!(signal, PageSignal::Unload) {
                    closed = true;
                }
            }

            if closed {
                if let Some(mut trackers) = views.remove(&id) {
                    events.extend(trackers.flush_time(FlushReason::Teardown, now));
                }
            }
        }

        if ignored > 0 {
            metrics::counter!("beacon_signals_ignored_total").increment(ignored as u64);
        }
        let summary = IngestSummary {
            accepted: signals.len() - ignored,
            ignored,
            events: events.len(),
            closed,
        };
        self.analytics.dispatch_all(events);
        Ok(summary)
    }

    /// Tears a page view down, emitting its final time measurement.
    pub fn close(&self, id: Uuid) -> bool {
        let removed = self.lock().remove(&id);
        match removed {
            Some(mut trackers) => {
                self.analytics
                    .dispatch_all(trackers.flush_time(FlushReason::Teardown, Instant::now()));
                true
            }
            None => false,
        }
    }

    /// Tears down every open page view, emitting their final measurements.
    pub fn close_all(&self) -> usize {
        let now = Instant::now();
        let drained: Vec<PageTrackers> = self.lock().drain().map(|(_, t)| t).collect();
        let closed = drained.len();
        let events: Vec<_> = drained
            .into_iter()
            .flat_map(|mut t| t.flush_time(FlushReason::Teardown, now))
            .collect();
        self.analytics.dispatch_all(events);
        closed
    }

    pub fn tick(&self) -> SweepSummary {
        self.tick_at(Instant::now())
    }

    /// Periodic pass: teardown for idle views, and an interval flush for each
    /// live view whose own schedule is due.
    pub fn tick_at(&self, now: Instant) -> SweepSummary {
        let mut events = Vec::new();
        let mut summary = SweepSummary::default();
        {
            let mut views = self.lock();
            let idle: Vec<Uuid> = views
                .iter()
                .filter(|(_, t)| t.idle_for(now) >= self.idle_timeout)
                .map(|(id, _)| *id)
                .collect();

            for id in idle {
                if let Some(mut trackers) = views.remove(&id) {
                    events.extend(trackers.flush_time(FlushReason::Teardown, now));
                    summary.expired += 1;
                }
            }
            for trackers in views.values_mut() {
                let produced = trackers.flush_time(FlushReason::Interval, now);
                summary.flushed += produced.len();
                events.extend(produced);
            }
        }
        self.analytics.dispatch_all(events);
        summary
    }

    pub fn open_count(&self) -> usize {
        self.lock().len()
    }

    /// Runs [`Self::tick`] every `period` until the task is aborted.
    ///
    /// `period` only bounds how late an interval flush can be; pick it well
    /// below the flush period.
    pub fn spawn_sweeper(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                let summary = self.tick();
                if summary.expired > 0 || summary.flushed > 0 {
                    info!(
                        flushed = summary.flushed,
                        expired = summary.expired,
                        open = self.open_count(),
                        "Page view sweep"
                    );
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analytics_event::AnalyticsEvent;
    use crate::domain::trackers::{ScrollSample, Visibility};
    use tokio::sync::mpsc;

    fn drain(rx: &mut mpsc::Receiver<AnalyticsEvent>) -> Vec<AnalyticsEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn service(idle: Duration) -> (PageViewService, mpsc::Receiver<AnalyticsEvent>) {
        let (tx, rx) = mpsc::channel(64);
        let analytics = Arc::new(AnalyticsService::new(tx));
        (
            PageViewService::new(analytics, idle, Duration::from_secs(120)),
            rx,
        )
    }

    fn scroll(top: f64, frame: u64) -> PageSignal {
        PageSignal::Scroll(ScrollSample {
            scroll_top: top,
            document_height: 1100.0,
            viewport_height: 100.0,
            frame,
        })
    }

    #[test]
    fn test_open_emits_page_view() {
        let (service, mut rx) = service(Duration::from_secs(60));

        service.open(PortfolioDomain::Cs, "home", "/");

        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, "page_view");
        assert_eq!(service.open_count(), 1);
    }

    #[test]
    fn test_unknown_page_view_is_not_found() {
        let (service, _rx) = service(Duration::from_secs(60));

        let result = service.ingest(Uuid::new_v4(), &[PageSignal::Unload]);

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[test]
    fn test_thresholds_fire_once_across_batches() {
        let (service, mut rx) = service(Duration::from_secs(60));
        let id = service.open(PortfolioDomain::Cs, "home", "/");
        drain(&mut rx);

        service.ingest(id, &[scroll(300.0, 1)]).unwrap();
        service.ingest(id, &[scroll(200.0, 2), scroll(300.0, 3)]).unwrap();
        service.ingest(id, &[scroll(600.0, 4)]).unwrap();

        let labels: Vec<_> = drain(&mut rx).into_iter().filter_map(|e| e.label).collect();
        assert_eq!(labels, vec!["25%", "50%"]);
    }

    #[test]
    fn test_bad_signals_are_ignored_not_fatal() {
        let (service, _rx) = service(Duration::from_secs(60));
        let id = service.open(PortfolioDomain::Cs, "home", "/");
        let bad = PageSignal::Performance {
            entry: crate::domain::trackers::PerformanceEntry {
                entry_type: "paint".into(),
                ..Default::default()
            },
        };

        let summary = service.ingest(id, &[bad, scroll(300.0, 1)]).unwrap();

        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.ignored, 1);
        assert_eq!(summary.events, 1);
    }

    #[test]
    fn test_unload_flushes_and_closes() {
        let (service, mut rx) = service(Duration::from_secs(60));
        let start = Instant::now();
        let id = service.open_at(PortfolioDomain::Mechanical, "home", "/", start);
        drain(&mut rx);

        let summary = service
            .ingest_at(id, &[PageSignal::Unload], start + Duration::from_secs(12))
            .unwrap();

        assert!(summary.closed);
        assert_eq!(service.open_count(), 0);
        let events = drain(&mut rx);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].value, Some(12));
        assert!(service.ingest(id, &[PageSignal::Unload]).is_err());
    }

    #[test]
    fn test_tick_flushes_interval_and_expires_idle() {
        let (service, mut rx) = service(Duration::from_secs(300));
        let start = Instant::now();
        let stale = service.open_at(PortfolioDomain::Cs, "home", "/", start);
        let live = service.open_at(PortfolioDomain::Cs, "home", "/", start);
        service
            .ingest_at(
                live,
                &[PageSignal::Visibility {
                    state: Visibility::Visible,
                }],
                start + Duration::from_secs(250),
            )
            .unwrap();
        drain(&mut rx);

        let summary = service.tick_at(start + Duration::from_secs(310));

        assert_eq!(summary, SweepSummary { flushed: 1, expired: 1 });
        assert_eq!(service.open_count(), 1);
        assert!(service.ingest(stale, &[]).is_err());
        let values: Vec<_> = drain(&mut rx).into_iter().filter_map(|e| e.value).collect();
        assert_eq!(values, vec![310, 310]);
    }

    #[test]
    fn test_interval_flush_follows_each_view() {
        let (service, mut rx) = service(Duration::from_secs(3600));
        let start = Instant::now();
        service.open_at(PortfolioDomain::Cs, "home", "/", start);
        service.open_at(PortfolioDomain::Cs, "home", "/", start + Duration::from_secs(100));
        drain(&mut rx);

        assert_eq!(service.tick_at(start + Duration::from_secs(101)).flushed, 0);
        assert!(drain(&mut rx).is_empty());

        assert_eq!(service.tick_at(start + Duration::from_secs(125)).flushed, 1);
        let first: Vec<_> = drain(&mut rx).into_iter().filter_map(|e| e.value).collect();
        assert_eq!(first, vec![125]);

        assert_eq!(service.tick_at(start + Duration::from_secs(225)).flushed, 1);
        let second: Vec<_> = drain(&mut rx).into_iter().filter_map(|e| e.value).collect();
        assert_eq!(second, vec![125]);
    }

    #[test]
    fn test_close_all_tears_down_every_view() {
        let (service, mut rx) = service(Duration::from_secs(3600));
        let opened = Instant::now()
            .checked_sub(Duration::from_secs(30))
            .unwrap();
        service.open_at(PortfolioDomain::Cs, "home", "/", opened);
        service.open_at(PortfolioDomain::Mechanical, "home", "/", opened);
        drain(&mut rx);

        assert_eq!(service.close_all(), 2);
        assert_eq!(service.open_count(), 0);
        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.action == "time_on_page"));
        assert!(events.iter().all(|e| e.value.is_some_and(|v| v >= 30)));
    }

    #[test]
    fn test_close_reports_final_time() {
        let (service, _rx) = service(Duration::from_secs(60));
        let id = service.open(PortfolioDomain::Cs, "home", "/");

        assert!(service.close(id));
        assert!(!service.close(id));
    }
}
