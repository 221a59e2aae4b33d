//! Metric extraction: read-only passes over classified records.
//!
//! Both passes only read the record slice and may run concurrently.

pub mod interface;
pub mod model;
pub mod performance;

pub use interface::{extract_interface_metrics, KNOWN_STATUS_CODES};
pub use model::{InterfaceMetric, MetricType, PerformanceMetric};
pub use performance::extract_performance_metrics;
