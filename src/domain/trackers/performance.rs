//! Mapping of browser performance entries to reported metrics.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::TrackerError;

/// A raw performance entry as observed in the browser.
///
/// Only the fields relevant to `entry_type` are expected to be present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PerformanceEntry {
    pub entry_type: String,
    pub start_time: Option<f64>,
    pub processing_start: Option<f64>,
    pub value: Option<f64>,
    pub had_recent_input: Option<bool>,
    pub navigation_start: Option<f64>,
    pub load_event_end: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceMetric {
    pub name: &'static str,
    pub value: i64,
}

/// Converts entries to metrics, reporting each distinct entry once.
#[derive(Debug, Default)]
pub struct PerformanceTracker {
    seen: HashSet<(String, u64, u64)>,
}

fn field(entry: &PerformanceEntry, value: Option<f64>, name: &'static str) -> Result<f64, TrackerError> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(_) => Err(TrackerError::NonFinite),
        None => Err(TrackerError::MissingField {
            entry_type: entry.entry_type.clone(),
            field: name,
        }),
    }
}

impl PerformanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps one entry.
    ///
    /// Returns `Ok(None)` for entries that produce no metric: layout shifts
    /// with recent input, non-positive load times, and entries already seen.
    ///
    /// # Errors
    ///
    /// [`TrackerError::UnsupportedEntry`] for unknown entry types, and
    /// [`TrackerError::MissingField`] / [`TrackerError::NonFinite`] for
    /// malformed entries.
    pub fn observe(
        &mut self,
        entry: &PerformanceEntry,
    ) -> Result<Option<PerformanceMetric>, TrackerError> {
        let metric = match entry.entry_type.as_str() {
            "largest-contentful-paint" => {
                let start = field(entry, entry.start_time, "start_time")?;
                Some(PerformanceMetric {
                    name: "LCP",
                    value: start.round() as i64,
                })
            }
            "first-input" => {
                let start = field(entry, entry.start_time, "start_time")?;
                let processing = field(entry, entry.processing_start, "processing_start")?;
                Some(PerformanceMetric {
                    name: "FID",
                    value: (processing - start).round() as i64,
                })
            }
            "layout-shift" => {
                let value = field(entry, entry.value, "value")?;
                if entry.had_recent_input.unwrap_or(false) {
                    None
                } else {
                    Some(PerformanceMetric {
                        name: "CLS",
                        value: (value * 1000.0).round() as i64,
                    })
                }
            }
            "navigation" => {
                let nav_start = entry.navigation_start.or(entry.start_time).unwrap_or(0.0);
                let load_end = field(entry, entry.load_event_end, "load_event_end")?;
                let load_time = (load_end - nav_start).round() as i64;
                (load_time > 0).then_some(PerformanceMetric {
                    name: "page_load_time",
                    value: load_time,
                })
            }
            other => return Err(TrackerError::UnsupportedEntry(other.to_string())),
        };

        let Some(metric) = metric else {
            return Ok(None);
        };
        // Layout shifts share a start time when the script omits it; the value
        // keeps distinct shifts apart.
        let key = (
            entry.entry_type.clone(),
            entry.start_time.unwrap_or_default().to_bits(),
            entry.value.unwrap_or_default().to_bits(),
        );
        if !self.seen.insert(key) {
            return Ok(None);
        }
        Ok(Some(metric))
    }
}
