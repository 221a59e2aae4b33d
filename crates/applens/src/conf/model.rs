//! Model: AnalyzerConfig and its sections.

use serde::{Deserialize, Serialize};

use crate::export::ExportFormat;
use crate::parser::PARALLEL_MIN_LINES;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub parallel: ParallelConfig,
    pub classify: ClassifyConfig,
    pub cache: CacheConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    pub enabled: bool,
    /// Documents with fewer lines are classified on the calling thread
    pub min_lines: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    pub strip_ansi: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub max_entries: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_lines: PARALLEL_MIN_LINES,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_entries: 32,
        }
    }
}

impl ParallelConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled && self.min_lines == 0 {
            return Err("parallel.min_lines must be > 0 when parallel classification is enabled".to_string());
        }
        Ok(())
    }
}

impl CacheConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.enabled && self.max_entries == 0 {
            return Err("cache.max_entries must be > 0 when the cache is enabled".to_string());
        }
        Ok(())
    }
}
