use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::service::Analysis;
use crate::metrics::model::round2;
use crate::metrics::{InterfaceMetric, MetricType, PerformanceMetric};
use crate::parser::{LogLevel, LogRecord, LogSource};

/// Aggregate over all samples of one metric type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricStats {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlowestCall {
    pub method: String,
    pub url: String,
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct InterfaceStats {
    pub calls: usize,
    pub avg_duration: f64,
    pub max_duration: f64,
    pub slowest: Option<SlowestCall>,
    /// Calls whose status is 4xx or 5xx
    pub failures: usize,
    pub by_status: BTreeMap<String, usize>,
}

/// Structured digest handed to the report collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    pub file_name_hint: String,
    pub total_records: usize,
    pub levels: BTreeMap<LogLevel, usize>,
    pub sources: BTreeMap<LogSource, usize>,
    pub performance: BTreeMap<MetricType, MetricStats>,
    pub interfaces: InterfaceStats,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisSummary {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        Self::from_parts(
            &analysis.file_name_hint,
            &analysis.records,
            &analysis.performance,
            &analysis.interfaces,
        )
    }

    pub fn from_parts(
        file_name_hint: &str,
        records: &[LogRecord],
        performance: &[PerformanceMetric],
        interfaces: &[InterfaceMetric],
    ) -> Self {
        Self {
            file_name_hint: file_name_hint.to_string(),
            total_records: records.len(),
            levels: level_counts(records),
            sources: source_counts(records),
            performance: metric_stats(performance),
            interfaces: interface_stats(interfaces),
            generated_at: Utc::now(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.levels.get(&LogLevel::Error).copied().unwrap_or(0)
    }
}

/// Every assignable level appears, even at zero.
fn level_counts(records: &[LogRecord]) -> BTreeMap<LogLevel, usize> {
    let mut counts: BTreeMap<LogLevel, usize> = LogLevel::ALL
        .iter()
        .filter(|level| **level != LogLevel::Unknown)
        .map(|level| (*level, 0))
        .collect();
    for record in records {
        *counts.entry(record.level).or_default() += 1;
    }
    counts
}

fn source_counts(records: &[LogRecord]) -> BTreeMap<LogSource, usize> {
    let mut counts: BTreeMap<LogSource, usize> = LogSource::ALL.iter().map(|source| (*source, 0)).collect();
    for record in records {
        *counts.entry(record.source).or_default() += 1;
    }
    counts
}

fn metric_stats(samples: &[PerformanceMetric]) -> BTreeMap<MetricType, MetricStats> {
    let mut stats: BTreeMap<MetricType, MetricStats> = BTreeMap::new();
    let mut sums: BTreeMap<MetricType, f64> = BTreeMap::new();

    for sample in samples {
        *sums.entry(sample.metric_type).or_default() += sample.value;
        stats
            .entry(sample.metric_type)
            .and_modify(|s| {
                s.count += 1;
                s.min = s.min.min(sample.value);
                s.max = s.max.max(sample.value);
            })
            .or_insert_with(|| MetricStats {
                count: 1,
                min: sample.value,
                max: sample.value,
                avg: 0.0,
                unit: sample.unit.clone(),
            });
    }

    for (metric_type, s) in stats.iter_mut() {
        s.avg = round2(sums[metric_type] / s.count as f64);
    }
    stats
}

fn interface_stats(calls: &[InterfaceMetric]) -> InterfaceStats {
    if calls.is_empty() {
        return InterfaceStats::default();
    }

    let mut by_status = BTreeMap::new();
    for call in calls {
        *by_status.entry(call.status.clone()).or_default() += 1;
    }

    let total: f64 = calls.iter().map(|c| c.duration).sum();
    // First call wins on ties
    let slowest = calls
        .iter()
        .fold(&calls[0], |slow, c| if c.duration > slow.duration { c } else { slow });

    InterfaceStats {
        calls: calls.len(),
        avg_duration: round2(total / calls.len() as f64),
        max_duration: slowest.duration,
        slowest: Some(SlowestCall {
            method: slowest.method.clone(),
            url: slowest.url.clone(),
            duration: slowest.duration,
        }),
        failures: calls.iter().filter(|c| c.is_failure()).count(),
        by_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(id: usize, url: &str, status: &str, duration: f64) -> InterfaceMetric {
        InterfaceMetric {
            id: format!("api-{}", id),
            method: "GET".into(),
            url: url.into(),
            status: status.into(),
            duration,
        }
    }

    fn sample(metric_type: MetricType, value: f64) -> PerformanceMetric {
        PerformanceMetric {
            metric_type,
            value,
            unit: "ms".into(),
            label: "Latency".into(),
            timestamp: "N/A".into(),
        }
    }

    #[test]
    fn test_empty_analysis() {
        let summary = AnalysisSummary::from_parts("", &[], &[], &[]);
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.levels.len(), 4);
        assert!(summary.levels.values().all(|n| *n == 0));
        assert!(!summary.levels.contains_key(&LogLevel::Unknown));
        assert_eq!(summary.sources.len(), 4);
        assert!(summary.performance.is_empty());
        assert_eq!(summary.interfaces.calls, 0);
        assert!(summary.interfaces.slowest.is_none());
    }

    #[test]
    fn test_metric_stats_aggregate() {
        let samples = vec![
            sample(MetricType::Latency, 10.0),
            sample(MetricType::Latency, 20.0),
            sample(MetricType::Latency, 15.5),
        ];
        let summary = AnalysisSummary::from_parts("", &[], &samples, &[]);
        let latency = &summary.performance[&MetricType::Latency];
        assert_eq!(latency.count, 3);
        assert_eq!(latency.min, 10.0);
        assert_eq!(latency.max, 20.0);
        assert_eq!(latency.avg, 15.17);
        assert_eq!(latency.unit, "ms");
    }

    #[test]
    fn test_interface_stats() {
        let calls = vec![
            call(1, "/a", "200", 40.0),
            call(2, "/b", "500", 120.0),
            call(3, "/c", "404", 120.0),
            call(4, "/d", "200", 20.0),
        ];
        let summary = AnalysisSummary::from_parts("", &[], &[], &calls);
        let stats = &summary.interfaces;
        assert_eq!(stats.calls, 4);
        assert_eq!(stats.avg_duration, 75.0);
        assert_eq!(stats.max_duration, 120.0);
        assert_eq!(stats.slowest.as_ref().unwrap().url, "/b");
        assert_eq!(stats.failures, 2);
        assert_eq!(stats.by_status["200"], 2);
        assert_eq!(stats.by_status["500"], 1);
    }

    #[test]
    fn test_from_analysis_counts_levels_and_sources() {
        let analysis = Analysis::from_records(
            "miniprogram.log",
            crate::parser::parse_document(
                "{\"level\":\"error\",\"msg\":\"timeout\"}\n[WARN] slow render 33ms\nplain line",
                "miniprogram.log",
            ),
        );
        let summary = AnalysisSummary::from_analysis(&analysis);

        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.error_count(), 1);
        assert_eq!(summary.levels[&LogLevel::Warning], 1);
        assert_eq!(summary.levels[&LogLevel::Info], 1);
        assert_eq!(summary.sources[&LogSource::Wechat], 3);
        assert_eq!(summary.performance[&MetricType::Latency].count, 1);
    }

    #[test]
    fn test_summary_serializes_with_upper_case_keys() {
        let summary = AnalysisSummary::from_parts("x", &[], &[], &[]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["levels"]["ERROR"], 0);
        assert_eq!(json["sources"]["WECHAT"], 0);
        assert!(json["generated_at"].is_string());
    }
}
