use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use grep_matcher::Matcher;
use grep_regex::{RegexMatcher, RegexMatcherBuilder};
use thiserror::Error;

use crate::parser::{LogLevel, LogRecord, LogSource};

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid regex pattern: {0}")]
    InvalidRegex(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Include,
    Exclude,
}

#[derive(Debug, Default)]
pub struct FilterStats {
    pub records_scanned: AtomicU64,
    pub records_matched: AtomicU64,
    pub bytes_processed: AtomicU64,
}

/// Text pattern over a record's raw line.
struct TextMatch {
    matcher: RegexMatcher,
    mode: FilterMode,
}

/// Selects records by text pattern, level and source. An empty filter keeps everything.
#[derive(Default)]
pub struct RecordFilter {
    text: Option<TextMatch>,
    levels: HashSet<LogLevel>,
    sources: HashSet<LogSource>,
    stats: FilterStats,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pattern(mut self, pattern: &str, case_sensitive: bool, mode: FilterMode) -> Result<Self, FilterError> {
        let matcher = RegexMatcherBuilder::new()
            .case_insensitive(!case_sensitive)
            .multi_line(false)
            .build(pattern)
            .map_err(|e| FilterError::InvalidRegex(e.to_string()))?;

        self.text = Some(TextMatch { matcher, mode });
        Ok(self)
    }

    pub fn with_levels(mut self, levels: impl IntoIterator<Item = LogLevel>) -> Self {
        self.levels.extend(levels);
        self
    }

    pub fn with_sources(mut self, sources: impl IntoIterator<Item = LogSource>) -> Self {
        self.sources.extend(sources);
        self
    }

    #[inline]
    pub fn matches(&self, record: &LogRecord) -> bool {
        self.stats.records_scanned.fetch_add(1, Ordering::Relaxed);
        self.stats
            .bytes_processed
            .fetch_add(record.raw.len() as u64, Ordering::Relaxed);

        let keep = (self.levels.is_empty() || self.levels.contains(&record.level))
            && (self.sources.is_empty() || self.sources.contains(&record.source))
            && self.text_allows(record);

        if keep {
            self.stats.records_matched.fetch_add(1, Ordering::Relaxed);
        }
        keep
    }

    fn text_allows(&self, record: &LogRecord) -> bool {
        let Some(text) = &self.text else {
            return true;
        };
        let hit = text.matcher.is_match(record.raw.as_bytes()).unwrap_or(false);
        match text.mode {
            FilterMode::Include => hit,
            FilterMode::Exclude => !hit,
        }
    }

    /// Matching records in their original order.
    pub fn apply<'a>(&self, records: &'a [LogRecord]) -> Vec<&'a LogRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.levels.is_empty() && self.sources.is_empty()
    }

    pub fn stats(&self) -> (u64, u64, u64) {
        (
            self.stats.records_scanned.load(Ordering::Relaxed),
            self.stats.records_matched.load(Ordering::Relaxed),
            self.stats.bytes_processed.load(Ordering::Relaxed),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: usize, level: LogLevel, source: LogSource, raw: &str) -> LogRecord {
        LogRecord {
            id: format!("f-{}", line),
            line,
            timestamp: "N/A".into(),
            level,
            source,
            message: raw.into(),
            raw: raw.into(),
        }
    }

    fn sample() -> Vec<LogRecord> {
        vec![
            record(0, LogLevel::Error, LogSource::Android, "E/Net: connection reset"),
            record(1, LogLevel::Info, LogSource::Android, "I/Net: healthcheck ok"),
            record(2, LogLevel::Warning, LogSource::Wechat, "[WARN] slow page"),
            record(3, LogLevel::Error, LogSource::Wechat, "{\"level\":\"error\",\"msg\":\"Timeout\"}"),
        ]
    }

    fn lines(kept: &[&LogRecord]) -> Vec<usize> {
        kept.iter().map(|r| r.line).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let records = sample();
        let filter = RecordFilter::new();
        assert!(filter.is_empty());
        assert_eq!(lines(&filter.apply(&records)), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_include_pattern_case_insensitive() {
        let records = sample();
        let filter = RecordFilter::new()
            .with_pattern("timeout|reset", false, FilterMode::Include)
            .expect("Failed to create filter");
        assert_eq!(lines(&filter.apply(&records)), vec![0, 3]);
    }

    #[test]
    fn test_exclude_pattern() {
        let records = sample();
        let filter = RecordFilter::new()
            .with_pattern("healthcheck", true, FilterMode::Exclude)
            .expect("Failed to create filter");
        assert_eq!(lines(&filter.apply(&records)), vec![0, 2, 3]);
    }

    #[test]
    fn test_case_sensitive() {
        let records = sample();
        let filter = RecordFilter::new()
            .with_pattern("timeout", true, FilterMode::Include)
            .expect("Failed to create filter");
        assert!(filter.apply(&records).is_empty());
    }

    #[test]
    fn test_level_and_source_sets_combine() {
        let records = sample();
        let filter = RecordFilter::new()
            .with_levels([LogLevel::Error])
            .with_sources([LogSource::Wechat]);
        assert_eq!(lines(&filter.apply(&records)), vec![3]);

        let filter = RecordFilter::new().with_levels([LogLevel::Error, LogLevel::Warning]);
        assert_eq!(lines(&filter.apply(&records)), vec![0, 2, 3]);
    }

    #[test]
    fn test_invalid_regex() {
        let result = RecordFilter::new().with_pattern("[invalid", true, FilterMode::Include);
        assert!(matches!(result, Err(FilterError::InvalidRegex(_))));
    }

    #[test]
    fn test_stats_tracking() {
        let records = sample();
        let filter = RecordFilter::new()
            .with_pattern("net", false, FilterMode::Include)
            .expect("Failed to create filter");
        filter.apply(&records);

        let (scanned, matched, bytes) = filter.stats();
        assert_eq!(scanned, 4);
        assert_eq!(matched, 2);
        assert!(bytes > 0);
    }
}
