use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricType {
    Latency,
    Fps,
    Memory,
    Cpu,
}

impl MetricType {
    pub const ALL: [MetricType; 4] = [
        MetricType::Latency,
        MetricType::Fps,
        MetricType::Memory,
        MetricType::Cpu,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Latency => "latency",
            MetricType::Fps => "fps",
            MetricType::Memory => "memory",
            MetricType::Cpu => "cpu",
        }
    }
}

impl std::fmt::Display for MetricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A numeric telemetry sample found in a record's message.
///
/// Holds copies of the owning record's scalars only, so samples can be
/// filtered or kept independently of the records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    /// Normalized magnitude, two decimals (memory always in MB)
    pub value: f64,
    pub unit: String,
    pub label: String,
    pub timestamp: String,
}

/// One HTTP/API call found in a record's message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceMetric {
    pub id: String,
    /// Upper-case verb
    pub method: String,
    /// Path or URL without the query string
    pub url: String,
    /// Status code exactly as captured
    pub status: String,
    /// Milliseconds
    pub duration: f64,
}

impl InterfaceMetric {
    pub fn status_code(&self) -> Option<u16> {
        self.status.parse().ok()
    }

    pub fn is_failure(&self) -> bool {
        self.status_code().is_some_and(|code| code >= 400)
    }
}

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
