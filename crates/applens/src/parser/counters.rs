use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use super::model::{LogLevel, LogSource};

/// Forces the wrapped group onto its own cache line(s).
///
/// Parallel classification bumps the source and level groups from every
/// rayon worker; keeping groups 64-byte aligned stops them from sharing a line.
#[repr(align(64))]
#[derive(Debug, Default)]
pub struct CacheAligned<T>(pub T);

/// Document-level counters
#[derive(Debug, Default)]
pub struct DocumentCounters {
    pub documents: AtomicU64,
    pub lines_seen: AtomicU64,
    pub blank_skipped: AtomicU64,
    /// Lines shaped like a JSON object that failed to parse
    pub json_fallbacks: AtomicU64,
}

/// Records per resolved source (hottest path, once per record)
#[derive(Debug, Default)]
pub struct SourceCounters {
    pub android: AtomicU64,
    pub ios: AtomicU64,
    pub wechat: AtomicU64,
    pub unknown: AtomicU64,
}

/// Records per resolved level (hottest path, once per record)
#[derive(Debug, Default)]
pub struct LevelCounters {
    pub error: AtomicU64,
    pub warning: AtomicU64,
    pub info: AtomicU64,
    pub debug: AtomicU64,
}

/// Timing and cache outcome totals
#[derive(Debug, Default)]
pub struct TotalCounters {
    pub time_nanos: AtomicU64,
    pub cache_hits: AtomicU64,
    pub cache_misses: AtomicU64,
}

/// Classification counters.
///
/// All operations use `Ordering::Relaxed`; these are observability numbers
/// and `snapshot()` is not transactional across fields. They never feed back
/// into classification.
#[derive(Debug, Default)]
pub struct AnalysisCounters {
    pub documents: CacheAligned<DocumentCounters>,
    pub sources: CacheAligned<SourceCounters>,
    pub levels: CacheAligned<LevelCounters>,
    pub totals: CacheAligned<TotalCounters>,
}

impl AnalysisCounters {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_document(&self, lines_seen: u64, blank_skipped: u64, time_nanos: u64) {
        self.documents.0.documents.fetch_add(1, Ordering::Relaxed);
        self.documents.0.lines_seen.fetch_add(lines_seen, Ordering::Relaxed);
        self.documents.0.blank_skipped.fetch_add(blank_skipped, Ordering::Relaxed);
        self.totals.0.time_nanos.fetch_add(time_nanos, Ordering::Relaxed);
    }

    /// Called once per emitted record.
    #[inline]
    pub fn record_classification(&self, source: LogSource, level: LogLevel) {
        match source {
            LogSource::Android => self.sources.0.android.fetch_add(1, Ordering::Relaxed),
            LogSource::Ios => self.sources.0.ios.fetch_add(1, Ordering::Relaxed),
            LogSource::Wechat => self.sources.0.wechat.fetch_add(1, Ordering::Relaxed),
            LogSource::Unknown => self.sources.0.unknown.fetch_add(1, Ordering::Relaxed),
        };

        match level {
            LogLevel::Error => self.levels.0.error.fetch_add(1, Ordering::Relaxed),
            LogLevel::Warning => self.levels.0.warning.fetch_add(1, Ordering::Relaxed),
            LogLevel::Debug => self.levels.0.debug.fetch_add(1, Ordering::Relaxed),
            // Unknown never leaves the cascade; count it with info if it ever does
            LogLevel::Info | LogLevel::Unknown => self.levels.0.info.fetch_add(1, Ordering::Relaxed),
        };
    }

    #[inline]
    pub fn record_json_fallback(&self) {
        self.documents.0.json_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_cache(&self, hit: bool) {
        if hit {
            self.totals.0.cache_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.totals.0.cache_misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        let documents = self.documents.0.documents.load(Ordering::Relaxed);
        let time_nanos = self.totals.0.time_nanos.load(Ordering::Relaxed);

        CountersSnapshot {
            documents,
            lines_seen: self.documents.0.lines_seen.load(Ordering::Relaxed),
            blank_skipped: self.documents.0.blank_skipped.load(Ordering::Relaxed),
            json_fallbacks: self.documents.0.json_fallbacks.load(Ordering::Relaxed),

            android_records: self.sources.0.android.load(Ordering::Relaxed),
            ios_records: self.sources.0.ios.load(Ordering::Relaxed),
            wechat_records: self.sources.0.wechat.load(Ordering::Relaxed),
            unknown_records: self.sources.0.unknown.load(Ordering::Relaxed),

            error_records: self.levels.0.error.load(Ordering::Relaxed),
            warning_records: self.levels.0.warning.load(Ordering::Relaxed),
            info_records: self.levels.0.info.load(Ordering::Relaxed),
            debug_records: self.levels.0.debug.load(Ordering::Relaxed),

            cache_hits: self.totals.0.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.totals.0.cache_misses.load(Ordering::Relaxed),
            avg_document_time_us: if documents > 0 {
                (time_nanos as f64 / documents as f64) / 1000.0
            } else {
                0.0
            },
        }
    }
}

/// A read-only snapshot of the counters, cheap to clone and serializable.
#[derive(Debug, Clone, Serialize)]
pub struct CountersSnapshot {
    pub documents: u64,
    pub lines_seen: u64,
    pub blank_skipped: u64,
    pub json_fallbacks: u64,

    pub android_records: u64,
    pub ios_records: u64,
    pub wechat_records: u64,
    pub unknown_records: u64,

    pub error_records: u64,
    pub warning_records: u64,
    pub info_records: u64,
    pub debug_records: u64,

    pub cache_hits: u64,
    pub cache_misses: u64,
    pub avg_document_time_us: f64,
}

impl CountersSnapshot {
    pub fn total_records(&self) -> u64 {
        self.android_records + self.ios_records + self.wechat_records + self.unknown_records
    }
}
