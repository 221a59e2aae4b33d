use std::sync::LazyLock;

use regex::Regex;

use super::model::{round2, MetricType, PerformanceMetric};
use crate::parser::LogRecord;

/// One independent telemetry probe.
struct Probe {
    metric_type: MetricType,
    regex: Regex,
    unit: &'static str,
    label: &'static str,
}

impl Probe {
    fn new(metric_type: MetricType, pattern: &str, unit: &'static str, label: &'static str) -> Self {
        Self {
            metric_type,
            regex: Regex::new(pattern).expect("valid metric probe regex"),
            unit,
            label,
        }
    }

    /// First occurrence only, normalized to the probe's unit.
    fn sample(&self, message: &str) -> Option<f64> {
        let caps = self.regex.captures(message)?;
        let value: f64 = caps.get(1)?.as_str().parse().ok()?;

        let value = match (self.metric_type, caps.get(2)) {
            (MetricType::Memory, Some(unit)) if unit.as_str().eq_ignore_ascii_case("kb") => value / 1024.0,
            _ => value,
        };

        Some(round2(value))
    }
}

/// Probe order is the per-message output order.
static PROBES: LazyLock<[Probe; 4]> = LazyLock::new(|| {
    [
        Probe::new(MetricType::Latency, r"(?i)(\d+(?:\.\d+)?)\s*(ms|milliseconds)", "ms", "Latency"),
        Probe::new(MetricType::Fps, r"(?i)(\d+(?:\.\d+)?)\s*fps", "fps", "Frame Rate"),
        Probe::new(MetricType::Memory, r"(?i)(\d+(?:\.\d+)?)\s*(MB|MiB|KB)", "MB", "Memory"),
        Probe::new(MetricType::Cpu, r"(\d+(?:\.\d+)?)%", "%", "CPU Usage"),
    ]
});

/// Run every probe against one message. Probes never consume text from
/// each other, so one message can yield up to four samples.
pub fn probe_message(message: &str, timestamp: &str) -> Vec<PerformanceMetric> {
    PROBES
        .iter()
        .filter_map(|probe| {
            probe.sample(message).map(|value| PerformanceMetric {
                metric_type: probe.metric_type,
                value,
                unit: probe.unit.to_string(),
                label: probe.label.to_string(),
                timestamp: timestamp.to_string(),
            })
        })
        .collect()
}

/// Scan every record's message for latency, frame-rate, memory and CPU
/// samples, in record order.
pub fn extract_performance_metrics(records: &[LogRecord]) -> Vec<PerformanceMetric> {
    records
        .iter()
        .flat_map(|record| probe_message(&record.message, &record.timestamp))
        .collect()
}
