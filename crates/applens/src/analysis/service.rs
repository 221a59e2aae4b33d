use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::conf::AnalyzerConfig;
use crate::metrics::{extract_interface_metrics, extract_performance_metrics, InterfaceMetric, PerformanceMetric};
use crate::parser::cache::{CacheKey, DocumentCache};
use crate::parser::counters::{AnalysisCounters, CountersSnapshot};
use crate::parser::{ClassifyOptions, DocumentParser, LogRecord};

/// The three output sequences for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub file_name_hint: String,
    pub records: Vec<LogRecord>,
    pub performance: Vec<PerformanceMetric>,
    pub interfaces: Vec<InterfaceMetric>,
}

impl Analysis {
    /// Run both metric passes over already-classified records.
    pub fn from_records(file_name_hint: &str, records: Vec<LogRecord>) -> Self {
        let (performance, interfaces) = rayon::join(
            || extract_performance_metrics(&records),
            || extract_interface_metrics(&records),
        );

        Self {
            file_name_hint: file_name_hint.to_string(),
            records,
            performance,
            interfaces,
        }
    }
}

/// Parse-then-extract pipeline with shared counters and an optional result cache.
pub struct Analyzer {
    parser: DocumentParser,
    cache: Option<DocumentCache<Analysis>>,
    counters: Arc<AnalysisCounters>,
}

impl Analyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        let counters = Arc::new(AnalysisCounters::new());

        let mut parser = DocumentParser::new()
            .with_options(ClassifyOptions {
                strip_ansi: config.classify.strip_ansi,
            })
            .with_counters(Arc::clone(&counters));
        if config.parallel.enabled {
            parser = parser.parallel(config.parallel.min_lines);
        }

        let cache = config
            .cache
            .enabled
            .then(|| DocumentCache::new(config.cache.max_entries));

        Self { parser, cache, counters }
    }

    pub fn analyze(&self, content: &str, file_name_hint: &str) -> Arc<Analysis> {
        let Some(cache) = &self.cache else {
            return Arc::new(self.run(content, file_name_hint));
        };

        let key = CacheKey::new(content, file_name_hint);
        if let Some(hit) = cache.get(&key) {
            self.counters.record_cache(true);
            debug!(hint = file_name_hint, "Analysis cache hit");
            return hit;
        }

        self.counters.record_cache(false);
        cache.insert(key, self.run(content, file_name_hint))
    }

    fn run(&self, content: &str, file_name_hint: &str) -> Analysis {
        let records = self.parser.parse(content, file_name_hint);
        let analysis = Analysis::from_records(file_name_hint, records);

        info!(
            hint = file_name_hint,
            records = analysis.records.len(),
            performance = analysis.performance.len(),
            interfaces = analysis.interfaces.len(),
            "Analyzed document"
        );

        analysis
    }

    pub fn counters(&self) -> CountersSnapshot {
        self.counters.snapshot()
    }

    pub fn cached_documents(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.len())
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricType;
    use crate::parser::{LogLevel, LogSource};

    const SAMPLE: &str = "10-27 10:00:00.123 1-1/com.x E/Net: GET /api/v1/user?x=1 status:200 took:45ms\n\
                          \n\
                          10-27 10:00:01.000 1-1/com.x W/Mem: heap used 2048KB\n";

    fn cached_config() -> AnalyzerConfig {
        let mut config = AnalyzerConfig::default();
        config.cache.enabled = true;
        config.cache.max_entries = 4;
        config
    }

    #[test]
    fn test_analyze_produces_all_three_sequences() {
        let analyzer = Analyzer::default();
        let analysis = analyzer.analyze(SAMPLE, "app.log");

        assert_eq!(analysis.records.len(), 2);
        assert_eq!(analysis.records[0].source, LogSource::Android);
        assert_eq!(analysis.records[0].level, LogLevel::Error);
        assert_eq!(analysis.records[1].line, 2);

        assert_eq!(analysis.interfaces.len(), 1);
        assert_eq!(analysis.interfaces[0].url, "/api/v1/user");

        let types: Vec<MetricType> = analysis.performance.iter().map(|m| m.metric_type).collect();
        assert_eq!(types, vec![MetricType::Latency, MetricType::Memory]);
    }

    #[test]
    fn test_uncached_runs_reparse() {
        let analyzer = Analyzer::default();
        let first = analyzer.analyze(SAMPLE, "app.log");
        let second = analyzer.analyze(SAMPLE, "app.log");

        assert!(!Arc::ptr_eq(&first, &second));
        assert_ne!(first.records[0].id, second.records[0].id);
        assert_eq!(analyzer.counters().documents, 2);
        assert_eq!(analyzer.cached_documents(), 0);
    }

    #[test]
    fn test_cache_hit_returns_shared_result() {
        let analyzer = Analyzer::new(&cached_config());
        let first = analyzer.analyze(SAMPLE, "app.log");
        let second = analyzer.analyze(SAMPLE, "app.log");

        assert!(Arc::ptr_eq(&first, &second));
        let snapshot = analyzer.counters();
        assert_eq!(snapshot.documents, 1);
        assert_eq!(snapshot.cache_hits, 1);
        assert_eq!(snapshot.cache_misses, 1);
    }

    #[test]
    fn test_cache_keyed_by_hint() {
        let analyzer = Analyzer::new(&cached_config());
        analyzer.analyze(SAMPLE, "app.log");
        analyzer.analyze(SAMPLE, "device.syslog");

        assert_eq!(analyzer.cached_documents(), 2);
        assert_eq!(analyzer.counters().cache_misses, 2);
    }

    #[test]
    fn test_counters_track_classification() {
        let analyzer = Analyzer::default();
        analyzer.analyze(SAMPLE, "app.log");

        let snapshot = analyzer.counters();
        assert_eq!(snapshot.lines_seen, 3);
        assert_eq!(snapshot.blank_skipped, 1);
        assert_eq!(snapshot.android_records, 2);
        assert_eq!(snapshot.error_records, 1);
        assert_eq!(snapshot.warning_records, 1);
    }

    #[test]
    fn test_from_records_on_empty_input() {
        let analysis = Analysis::from_records("", Vec::new());
        assert!(analysis.records.is_empty());
        assert!(analysis.performance.is_empty());
        assert!(analysis.interfaces.is_empty());
    }
}
