// Domain-driven module structure for applens.

// Core pipeline
pub mod parser;
pub mod metrics;
pub mod analysis;

// Collaborators
pub mod export;
pub mod filter;

// Ambient
pub mod conf;
pub mod runtime;

pub use analysis::{Analysis, AnalysisSummary, Analyzer};
pub use metrics::{extract_interface_metrics, extract_performance_metrics};
pub use parser::parse_document;
