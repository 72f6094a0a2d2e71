//! DTOs for the page-signal beacon.

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::trackers::PageSignal;

/// A batch of raw browser measurements for one page view.
///
/// ```json
/// {
///   "page_view": "0b6f2a9e-5c1d-4e53-9a7b-2f0c8d1e4a36",
///   "signals": [
///     { "kind": "scroll", "scroll_top": 600, "document_height": 2000, "viewport_height": 800, "frame": 12 },
///     { "kind": "visibility", "state": "hidden" }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct BeaconRequest {
    pub page_view: Uuid,

    /// The script flushes well below this bound.
    #[validate(length(min = 1, max = 200))]
    pub signals: Vec<PageSignal>,
}
