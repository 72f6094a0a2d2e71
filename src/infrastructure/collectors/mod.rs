//! Analytics collectors.
//!
//! Provides an [`AnalyticsCollector`] trait with three implementations:
//! - [`EventSinkCollector`] - Named events with a property map over HTTP
//! - [`MeasurementCollector`] - Measurement-protocol style parameters over HTTP
//! - [`LogCollector`] - Writes events to the log when no endpoint is configured

mod http_collector;
mod log_collector;
mod service;

pub use http_collector::{EventSinkCollector, MeasurementCollector};
pub use log_collector::LogCollector;
pub use service::{AnalyticsCollector, CollectorError, CollectorResult};

#[cfg(test)]
pub use service::MockAnalyticsCollector;
