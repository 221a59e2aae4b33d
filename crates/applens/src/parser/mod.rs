//! Log line classification
//!
//! Turns a raw, multi-platform log dump into ordered structured records.
//!
//! # Architecture
//!
//! - `lines.rs`: newline-tolerant line splitting
//! - `source.rs`: file-name source prior
//! - `rules/`: one rule per log grammar plus the keyword fallback
//! - `classifier.rs`: ordered rule cascade
//! - `assemble.rs`: record identifiers and packaging
//! - `document.rs`: whole-document parsing (sequential or rayon)
//! - `cache.rs`: explicit caller-owned result cache
//! - `counters.rs`: classification counters
//!
//! # Guarantees
//!
//! - One record per non-blank line, in document order
//! - `raw` is the original line, byte-for-byte
//! - No record leaves with level `UNKNOWN`
//! - No input is an error

pub mod assemble;
pub mod cache;
pub mod classifier;
pub mod counters;
pub mod document;
pub mod lines;
pub mod model;
pub mod rules;
pub mod source;
pub mod traits;
mod ansi;

// Re-export commonly used types
pub use ansi::strip_ansi;
pub use classifier::RuleCascade;
pub use document::{parse_document, DocumentParser};
pub use model::{ClassifyOptions, LogLevel, LogRecord, LogSource, NO_TIMESTAMP};
pub use source::detect_source;
pub use traits::LineRule;

/// Default line count at which classification moves onto the rayon pool
pub const PARALLEL_MIN_LINES: usize = 4096;
