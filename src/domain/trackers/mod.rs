//! Per-page-load trackers and the signals that drive them.
//!
//! The browser script only measures; all tracking rules live here as plain
//! state machines. [`PageTrackers`] bundles the three trackers for one page
//! load and turns each [`PageSignal`] into zero or more analytics events.

pub mod performance;
pub mod scroll_depth;
pub mod time_on_page;

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::domain::analytics_event::AnalyticsEvent;
use crate::domain::entities::PortfolioDomain;

pub use performance::{PerformanceEntry, PerformanceMetric, PerformanceTracker};
pub use scroll_depth::{ScrollDepthTracker, ScrollSample, THRESHOLDS};
pub use time_on_page::{DEFAULT_FLUSH_PERIOD, FlushReason, TimeOnPageTracker};

#[derive(Debug, Error, PartialEq)]
pub enum TrackerError {
    #[error("unsupported performance entry type '{0}'")]
    UnsupportedEntry(String),

    #[error("performance entry '{entry_type}' is missing '{field}'")]
    MissingField {
        entry_type: String,
        field: &'static str,
    },

    #[error("measurement contains a non-finite number")]
    NonFinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

/// A visitor interaction reported by the page script.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InteractionEvent {
    ProjectView { title: String },
    ProjectDemo { title: String },
    ProjectCode { title: String },
    ContactFormStart,
    SocialClick { platform: String },
    Navigation { section: String },
    SkillHover { skill: String },
    PublicationClick { title: String },
    PatentClick { title: String },
    Error { error: String, page: String },
}

impl InteractionEvent {
    pub fn to_event(&self, domain: PortfolioDomain) -> AnalyticsEvent {
        match self {
            InteractionEvent::ProjectView { title } => AnalyticsEvent::project_view(title, domain),
            InteractionEvent::ProjectDemo { title } => AnalyticsEvent::project_demo(title),
            InteractionEvent::ProjectCode { title } => AnalyticsEvent::project_code(title),
            InteractionEvent::ContactFormStart => AnalyticsEvent::contact_form_start(),
            InteractionEvent::SocialClick { platform } => AnalyticsEvent::social_click(platform),
            InteractionEvent::Navigation { section } => AnalyticsEvent::navigation(section),
            InteractionEvent::SkillHover { skill } => AnalyticsEvent::skill_hover(skill, domain),
            InteractionEvent::PublicationClick { title } => {
                AnalyticsEvent::publication_click(title)
            }
            InteractionEvent::PatentClick { title } => AnalyticsEvent::patent_click(title),
            InteractionEvent::Error { error, page } => AnalyticsEvent::error(error, page),
        }
    }
}

/// One raw signal posted to the beacon endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageSignal {
    Scroll(ScrollSample),
    Visibility { state: Visibility },
    Unload,
    Performance { entry: PerformanceEntry },
    Interaction { event: InteractionEvent },
}

/// The trackers for one page load.
#[derive(Debug)]
pub struct PageTrackers {
    domain: PortfolioDomain,
    page: String,
    scroll: ScrollDepthTracker,
    time: TimeOnPageTracker,
    performance: PerformanceTracker,
    last_activity: Instant,
}

impl PageTrackers {
    /// `flush_period` spaces this page's interval time measurements.
    pub fn start(
        domain: PortfolioDomain,
        page: impl Into<String>,
        now: Instant,
        flush_period: Duration,
    ) -> Self {
        Self {
            domain,
            page: page.into(),
            scroll: ScrollDepthTracker::new(),
            time: TimeOnPageTracker::with_period(now, flush_period),
            performance: PerformanceTracker::new(),
            last_activity: now,
        }
    }

    pub fn domain(&self) -> PortfolioDomain {
        self.domain
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    pub fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_activity)
    }

    /// Applies one signal and returns the events it produced.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError`] for malformed measurements and unsupported
    /// performance entries. Trackers are left unchanged by a failed signal.
    pub fn apply(
        &mut self,
        signal: &PageSignal,
        now: Instant,
    ) -> Result<Vec<AnalyticsEvent>, TrackerError> {
        self.last_activity = now;
        let events = match signal {
            PageSignal::Scroll(sample) => self
                .scroll
                .observe(*sample)?
                .into_iter()
                .map(AnalyticsEvent::scroll_depth)
                .collect(),
            PageSignal::Visibility {
                state: Visibility::Hidden,
            } => self.flush_time(FlushReason::Hidden, now),
            PageSignal::Visibility {
                state: Visibility::Visible,
            } => Vec::new(),
            PageSignal::Unload => self.flush_time(FlushReason::Unload, now),
            PageSignal::Performance { entry } => self
                .performance
                .observe(entry)?
                .map(|m| AnalyticsEvent::performance(m.name, m.value))
                .into_iter()
                .collect(),
            PageSignal::Interaction { event } => vec![event.to_event(self.domain)],
        };
        Ok(events)
    }

    /// Takes a time-on-page measurement outside of a signal.
    pub fn flush_time(&mut self, reason: FlushReason, now: Instant) -> Vec<AnalyticsEvent> {
        self.time
            .flush(reason, now)
            .map(|secs| AnalyticsEvent::time_on_page(secs, &self.page))
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_json_shapes() {
        let scroll: PageSignal = serde_json::from_str(
            r#"{"kind":"scroll","scroll_top":10,"document_height":2000,"viewport_height":800,"frame":3}"#,
        )
        .unwrap();
        assert!(matches!(scroll, PageSignal::Scroll(ScrollSample { frame: 3, .. })));

        let hidden: PageSignal =
            serde_json::from_str(r#"{"kind":"visibility","state":"hidden"}"#).unwrap();
        assert_eq!(
            hidden,
            PageSignal::Visibility {
                state: Visibility::Hidden
            }
        );

        let click: PageSignal = serde_json::from_str(
            r#"{"kind":"interaction","event":{"type":"social_click","platform":"github"}}"#,
        )
        .unwrap();
        assert_eq!(
            click,
            PageSignal::Interaction {
                event: InteractionEvent::SocialClick {
                    platform: "github".into()
                }
            }
        );

        let perf: PageSignal = serde_json::from_str(
            r#"{"kind":"performance","entry":{"entry_type":"largest-contentful-paint","start_time":1200.5}}"#,
        )
        .unwrap();
        assert!(matches!(perf, PageSignal::Performance { .. }));
    }

    #[test]
    fn test_hidden_flushes_time_before_any_interval() {
        let start = Instant::now();
        let mut trackers = PageTrackers::start(PortfolioDomain::Cs, "home", start, DEFAULT_FLUSH_PERIOD);

        let events = trackers
            .apply(
                &PageSignal::Visibility {
                    state: Visibility::Hidden,
                },
                start + Duration::from_secs(30),
            )
            .unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, "time_on_page");
        assert_eq!(events[0].value, Some(30));
        assert_eq!(events[0].label.as_deref(), Some("home"));
    }

    #[test]
    fn test_scroll_signal_produces_threshold_events() {
        let start = Instant::now();
        let mut trackers = PageTrackers::start(PortfolioDomain::Cs, "home", start, DEFAULT_FLUSH_PERIOD);
        let signal = PageSignal::Scroll(ScrollSample {
            scroll_top: 600.0,
            document_height: 1200.0,
            viewport_height: 200.0,
            frame: 1,
        });

        let labels: Vec<_> = trackers
            .apply(&signal, start)
            .unwrap()
            .into_iter()
            .filter_map(|e| e.label)
            .collect();

        assert_eq!(labels, vec!["25%", "50%"]);
    }

    #[test]
    fn test_interaction_uses_page_domain() {
        let start = Instant::now();
        let mut trackers = PageTrackers::start(PortfolioDomain::Mechanical, "home", start, DEFAULT_FLUSH_PERIOD);

        let events = trackers
            .apply(
                &PageSignal::Interaction {
                    event: InteractionEvent::ProjectView {
                        title: "ORC".into(),
                    },
                },
                start,
            )
            .unwrap();

        assert_eq!(events[0].label.as_deref(), Some("mechanical_ORC"));
    }

    #[test]
    fn test_unsupported_performance_entry_is_error() {
        let start = Instant::now();
        let mut trackers = PageTrackers::start(PortfolioDomain::Cs, "home", start, DEFAULT_FLUSH_PERIOD);
        let signal = PageSignal::Performance {
            entry: PerformanceEntry {
                entry_type: "longtask".into(),
                ..Default::default()
            },
        };

        assert!(trackers.apply(&signal, start).is_err());
    }

    #[test]
    fn test_idle_time_resets_on_signal() {
        let start = Instant::now();
        let mut trackers = PageTrackers::start(PortfolioDomain::Cs, "home", start, DEFAULT_FLUSH_PERIOD);

        trackers
            .apply(
                &PageSignal::Visibility {
                    state: Visibility::Visible,
                },
                start + Duration::from_secs(100),
            )
            .unwrap();

        assert_eq!(
            trackers.idle_for(start + Duration::from_secs(130)),
            Duration::from_secs(30)
        );
    }
}
