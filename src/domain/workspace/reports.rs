//! Sample figures for the admin dashboard and analytics screens.
//!
//! Collectors are write-only, so there is no real reporting backend. These
//! figures are fixed samples; the analytics report scales counts to the
//! selected range.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::EditError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum TimeRange {
    #[serde(rename = "24h")]
    Last24h,
    #[default]
    #[serde(rename = "7d")]
    Last7d,
    #[serde(rename = "30d")]
    Last30d,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::Last24h, TimeRange::Last7d, TimeRange::Last30d];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Last24h => "24h",
            TimeRange::Last7d => "7d",
            TimeRange::Last30d => "30d",
        }
    }

    fn scale(&self, weekly: u32) -> u32 {
        match self {
            TimeRange::Last24h => weekly.div_ceil(7),
            TimeRange::Last7d => weekly,
            TimeRange::Last30d => weekly * 30 / 7,
        }
    }
}

impl FromStr for TimeRange {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeRange::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| EditError::Invalid(format!("unknown time range '{s}'")))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageFigure {
    pub page: &'static str,
    pub views: u32,
    pub change: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityItem {
    pub action: &'static str,
    pub time: &'static str,
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOverview {
    pub total_visitors: u32,
    pub total_messages: u32,
    pub conversion_rate: f32,
    pub avg_session_time: &'static str,
    pub top_pages: Vec<PageFigure>,
    pub recent_activity: Vec<ActivityItem>,
    pub device_split: [(&'static str, u8); 3],
    pub domain_split: [(&'static str, u8); 2],
}

impl DashboardOverview {
    pub fn sample() -> Self {
        Self {
            total_visitors: 1247,
            total_messages: 23,
            conversion_rate: 3.2,
            avg_session_time: "2m 34s",
            top_pages: vec![
                PageFigure { page: "/projects", views: 456, change: 12 },
                PageFigure { page: "/about", views: 234, change: -5 },
                PageFigure { page: "/skills", views: 189, change: 8 },
                PageFigure { page: "/contact", views: 167, change: 15 },
            ],
            recent_activity: vec![
                ActivityItem { action: "New contact form submission", time: "2 minutes ago", kind: "info" },
                ActivityItem { action: "Portfolio domain switched to CS", time: "15 minutes ago", kind: "success" },
                ActivityItem { action: "High traffic detected", time: "1 hour ago", kind: "warning" },
                ActivityItem { action: "Resume downloaded (CS version)", time: "2 hours ago", kind: "info" },
                ActivityItem { action: "New visitor from LinkedIn", time: "3 hours ago", kind: "success" },
            ],
            device_split: [("desktop", 65), ("mobile", 28), ("tablet", 7)],
            domain_split: [("cs", 68), ("mechanical", 32)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountRow {
    pub label: &'static str,
    pub count: u32,
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub metric: &'static str,
    pub value: String,
    pub change: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub range: TimeRange,
    pub traffic_sources: Vec<CountRow>,
    pub engagement: Vec<MetricRow>,
    pub conversions: Vec<MetricRow>,
    pub scroll_depth: Vec<CountRow>,
    pub funnel: Vec<CountRow>,
}

impl AnalyticsReport {
    pub fn for_range(range: TimeRange) -> Self {
        let row = |label, weekly: u32, percentage| CountRow {
            label,
            count: range.scale(weekly),
            percentage,
        };
        let metric = |metric, value: String, change| MetricRow { metric, value, change };

        Self {
            range,
            traffic_sources: vec![
                row("Direct", 456, 38),
                row("LinkedIn", 234, 19),
                row("GitHub", 189, 16),
                row("Google", 167, 14),
                row("Twitter", 89, 7),
                row("Other", 65, 6),
            ],
            engagement: vec![
                metric("Avg. Session Duration", "2m 34s".into(), "+15%"),
                metric("Bounce Rate", "34.2%".into(), "-8%"),
                metric("Pages per Session", "3.7".into(), "+12%"),
                metric("Return Visitors", "28%".into(), "+5%"),
            ],
            conversions: vec![
                metric("Contact Form Submissions", range.scale(23).to_string(), "+15%"),
                metric("Resume Downloads", range.scale(89).to_string(), "+8%"),
                metric("Project Demo Clicks", range.scale(156).to_string(), "+22%"),
                metric("Social Media Clicks", range.scale(67).to_string(), "+3%"),
            ],
            scroll_depth: vec![
                row("25%", 892, 89),
                row("50%", 734, 73),
                row("75%", 456, 46),
                row("100%", 234, 23),
            ],
            funnel: vec![
                row("Page Views", 1247, 100),
                row("Engaged Users", 823, 66),
                row("Project Interactions", 456, 37),
                row("Contact Actions", 89, 7),
                row("Form Submissions", 23, 2),
            ],
        }
    }
}
