//! Filter: record selection by text pattern, level and source.

pub mod engine;

pub use engine::{FilterError, FilterMode, FilterStats, RecordFilter};
