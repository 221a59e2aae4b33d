use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;

/// Cache key: content hash plus the file name hint.
///
/// The hint is part of the key because it seeds the source prior; the same
/// bytes under a different name can classify differently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub content_hash: String,
    pub file_name_hint: String,
}

impl CacheKey {
    pub fn new(content: &str, file_name_hint: &str) -> Self {
        Self {
            content_hash: blake3::hash(content.as_bytes()).to_hex().to_string(),
            file_name_hint: file_name_hint.to_string(),
        }
    }
}

#[derive(Debug)]
struct CacheEntry<T> {
    value: Arc<T>,
    /// Insertion sequence, for oldest-first eviction
    seq: u64,
}

/// Explicit, caller-owned result cache.
///
/// Parsing itself keeps no memo state; callers that want to skip re-parsing
/// identical documents hold one of these and consult it by [`CacheKey`].
/// Bounded to `max_entries`; the oldest insertion is evicted first.
#[derive(Debug)]
pub struct DocumentCache<T> {
    entries: DashMap<CacheKey, CacheEntry<T>>,
    max_entries: usize,
    next_seq: AtomicU64,
}

impl<T> DocumentCache<T> {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries: max_entries.max(1),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<T>> {
        self.entries.get(key).map(|entry| Arc::clone(&entry.value))
    }

    /// Insert (or replace) a result and return the shared handle to it.
    pub fn insert(&self, key: CacheKey, value: T) -> Arc<T> {
        let value = Arc::new(value);
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);

        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.max_entries {
                if !self.evict_oldest() {
                    break;
                }
            }
        }

        self.entries.insert(
            key,
            CacheEntry {
                value: Arc::clone(&value),
                seq,
            },
        );
        value
    }

    fn evict_oldest(&self) -> bool {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.value().seq)
            .map(|entry| entry.key().clone());

        match oldest {
            Some(key) => self.entries.remove(&key).is_some(),
            None => false,
        }
    }

    pub fn remove(&self, key: &CacheKey) {
        self.entries.remove(key);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }
}
