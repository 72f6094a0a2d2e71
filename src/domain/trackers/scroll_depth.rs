//! Scroll-depth milestones.

use serde::{Deserialize, Serialize};

use super::TrackerError;

/// Milestones reported as the visitor scrolls, in percent.
pub const THRESHOLDS: [u8; 5] = [25, 50, 75, 90, 100];

/// One scroll position measured by the browser.
///
/// `frame` is the animation-frame counter at measurement time; the page
/// script sends at most one sample per frame, and the tracker ignores any
/// sample whose frame is not newer than the last one it measured.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ScrollSample {
    pub scroll_top: f64,
    pub document_height: f64,
    pub viewport_height: f64,
    pub frame: u64,
}

impl ScrollSample {
    /// Scroll position as a whole percentage, or `None` when the page has no
    /// scrollable height.
    pub fn percent(&self) -> Result<Option<u8>, TrackerError> {
        if !(self.scroll_top.is_finite()
            && self.document_height.is_finite()
            && self.viewport_height.is_finite())
        {
            return Err(TrackerError::NonFinite);
        }
        let scrollable = self.document_height - self.viewport_height;
        if scrollable <= 0.0 {
            return Ok(None);
        }
        let percent = (self.scroll_top / scrollable * 100.0).round().clamp(0.0, 100.0);
        Ok(Some(percent as u8))
    }
}

/// Per-page-load scroll state: the high-water mark and fired thresholds.
#[derive(Debug, Default)]
pub struct ScrollDepthTracker {
    max_percent: u8,
    fired: [bool; THRESHOLDS.len()],
    last_frame: Option<u64>,
}

impl ScrollDepthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_percent(&self) -> u8 {
        self.max_percent
    }

    /// Feeds one sample and returns the thresholds it newly crossed.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NonFinite`] if the sample carries NaN or
    /// infinite values. The tracker state is unchanged in that case.
    pub fn observe(&mut self, sample: ScrollSample) -> Result<Vec<u8>, TrackerError> {
        if self.last_frame.is_some_and(|last| sample.frame <= last) {
            return Ok(Vec::new());
        }
        let percent = sample.percent()?;
        self.last_frame = Some(sample.frame);

        let Some(percent) = percent else {
            return Ok(Vec::new());
        };
        if percent <= self.max_percent {
            return Ok(Vec::new());
        }
        self.max_percent = percent;

        let mut crossed = Vec::new();
        for (idx, threshold) in THRESHOLDS.iter().enumerate() {
            if percent >= *threshold && !self.fired[idx] {
                self.fired[idx] = true;
                crossed.push(*threshold);
            }
        }
        Ok(crossed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(scroll_top: f64, frame: u64) -> ScrollSample {
        ScrollSample {
            scroll_top,
            document_height: 1100.0,
            viewport_height: 100.0,
            frame,
        }
    }

    #[test]
    fn test_crossing_multiple_thresholds_at_once() {
        let mut tracker = ScrollDepthTracker::new();

        assert_eq!(tracker.observe(sample(800.0, 1)).unwrap(), vec![25, 50, 75]);
        assert_eq!(tracker.max_percent(), 80);
    }

    #[test]
    fn test_each_threshold_fires_once() {
        let mut tracker = ScrollDepthTracker::new();

        assert_eq!(tracker.observe(sample(300.0, 1)).unwrap(), vec![25]);
        assert!(tracker.observe(sample(100.0, 2)).unwrap().is_empty());
        assert!(tracker.observe(sample(300.0, 3)).unwrap().is_empty());
        assert_eq!(tracker.observe(sample(1000.0, 4)).unwrap(), vec![50, 75, 90, 100]);
        assert!(tracker.observe(sample(1000.0, 5)).unwrap().is_empty());
    }

    #[test]
    fn test_high_water_mark_is_monotonic() {
        let mut tracker = ScrollDepthTracker::new();

        tracker.observe(sample(600.0, 1)).unwrap();
        tracker.observe(sample(200.0, 2)).unwrap();

        assert_eq!(tracker.max_percent(), 60);
    }

    #[test]
    fn test_same_frame_is_coalesced() {
        let mut tracker = ScrollDepthTracker::new();

        assert_eq!(tracker.observe(sample(300.0, 7)).unwrap(), vec![25]);
        assert!(tracker.observe(sample(1000.0, 7)).unwrap().is_empty());
        assert!(tracker.observe(sample(1000.0, 6)).unwrap().is_empty());
        assert_eq!(tracker.max_percent(), 30);
    }

    #[test]
    fn test_non_scrollable_page_reports_nothing() {
        let mut tracker = ScrollDepthTracker::new();
        let short_page = ScrollSample {
            scroll_top: 0.0,
            document_height: 500.0,
            viewport_height: 800.0,
            frame: 1,
        };

        assert!(tracker.observe(short_page).unwrap().is_empty());
        assert_eq!(tracker.max_percent(), 0);
    }

    #[test]
    fn test_overscroll_is_clamped() {
        let mut tracker = ScrollDepthTracker::new();

        let crossed = tracker.observe(sample(1500.0, 1)).unwrap();

        assert_eq!(crossed, THRESHOLDS.to_vec());
        assert_eq!(tracker.max_percent(), 100);
    }

    #[test]
    fn test_non_finite_sample_is_rejected() {
        let mut tracker = ScrollDepthTracker::new();

        let result = tracker.observe(sample(f64::NAN, 1));

        assert!(matches!(result, Err(TrackerError::NonFinite)));
        assert_eq!(tracker.observe(sample(300.0, 1)).unwrap(), vec![25]);
    }
}
