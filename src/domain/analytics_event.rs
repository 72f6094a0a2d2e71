//! Analytics event model.
//!
//! An [`AnalyticsEvent`] is created by request handlers or the page trackers,
//! pushed onto the analytics channel without waiting, and forwarded by
//! [`crate::domain::analytics_worker::run_analytics_worker`] to every
//! configured collector.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

use crate::domain::entities::PortfolioDomain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Engagement,
    Conversion,
    Technical,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Engagement => "engagement",
            EventCategory::Conversion => "conversion",
            EventCategory::Technical => "technical",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub action: String,
    pub category: EventCategory,
    pub label: Option<String>,
    pub value: Option<i64>,
    pub occurred_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(
        action: impl Into<String>,
        category: EventCategory,
        label: Option<String>,
        value: Option<i64>,
    ) -> Self {
        Self {
            action: action.into(),
            category,
            label,
            value,
            occurred_at: Utc::now(),
        }
    }

    fn engagement(action: &str, label: impl Into<String>) -> Self {
        Self::new(action, EventCategory::Engagement, Some(label.into()), None)
    }

    /// Properties for the event-sink collector.
    ///
    /// `label` and `value` are omitted when absent rather than sent as null.
    pub fn properties(&self) -> Map<String, Value> {
        let mut props = Map::new();
        props.insert("category".into(), json!(self.category.as_str()));
        if let Some(label) = self.label.as_deref().filter(|l| !l.is_empty()) {
            props.insert("label".into(), json!(label));
        }
        if let Some(value) = self.value {
            props.insert("value".into(), json!(value));
        }
        props
    }

    /// Parameters for the measurement collector.
    pub fn measurement_params(&self) -> Map<String, Value> {
        let mut params = Map::new();
        params.insert("event_category".into(), json!(self.category.as_str()));
        if let Some(label) = self.label.as_deref().filter(|l| !l.is_empty()) {
            params.insert("event_label".into(), json!(label));
        }
        if let Some(value) = self.value {
            params.insert("value".into(), json!(value));
        }
        params
    }

    pub fn page_view(url: &str) -> Self {
        Self::engagement("page_view", url)
    }

    pub fn project_view(title: &str, domain: PortfolioDomain) -> Self {
        Self::engagement("project_view", format!("{domain}_{title}"))
    }

    pub fn project_demo(title: &str) -> Self {
        Self::engagement("project_demo_click", title)
    }

    pub fn project_code(title: &str) -> Self {
        Self::engagement("project_code_click", title)
    }

    pub fn contact_form_start() -> Self {
        Self::new("contact_form_start", EventCategory::Engagement, None, None)
    }

    pub fn contact_form_submit() -> Self {
        Self::new("contact_form_submit", EventCategory::Conversion, None, None)
    }

    pub fn resume_download(domain: PortfolioDomain) -> Self {
        Self::new(
            "resume_download",
            EventCategory::Conversion,
            Some(domain.to_string()),
            None,
        )
    }

    pub fn resume_view(domain: PortfolioDomain) -> Self {
        Self::engagement("resume_view", domain.as_str())
    }

    pub fn social_click(platform: &str) -> Self {
        Self::engagement("social_click", platform)
    }

    pub fn domain_switch(from: PortfolioDomain, to: PortfolioDomain) -> Self {
        Self::engagement("domain_switch", format!("{from}_to_{to}"))
    }

    pub fn navigation(section: &str) -> Self {
        Self::engagement("navigation_click", section)
    }

    pub fn scroll_depth(percentage: u8) -> Self {
        Self::new(
            "scroll_depth",
            EventCategory::Engagement,
            Some(format!("{percentage}%")),
            Some(i64::from(percentage)),
        )
    }

    pub fn time_on_page(seconds: u64, page: &str) -> Self {
        Self::new(
            "time_on_page",
            EventCategory::Engagement,
            Some(page.to_string()),
            Some(i64::try_from(seconds).unwrap_or(i64::MAX)),
        )
    }

    pub fn skill_hover(skill: &str, domain: PortfolioDomain) -> Self {
        Self::engagement("skill_hover", format!("{domain}_{skill}"))
    }

    pub fn publication_click(title: &str) -> Self {
        Self::engagement("publication_click", title)
    }

    pub fn patent_click(title: &str) -> Self {
        Self::engagement("patent_click", title)
    }

    pub fn error(error: &str, page: &str) -> Self {
        Self::new(
            "error",
            EventCategory::Technical,
            Some(format!("{page}_{error}")),
            None,
        )
    }

    pub fn performance(metric: &str, value: i64) -> Self {
        Self::new(
            "performance",
            EventCategory::Technical,
            Some(metric.to_string()),
            Some(value),
        )
    }
}
