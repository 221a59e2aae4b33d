//! Analysis: one document in, records plus both metric sequences out.

pub mod report;
pub mod service;
pub mod summary;

pub use report::{ReportCollaborator, ReportRequest};
pub use service::{Analysis, Analyzer};
pub use summary::{AnalysisSummary, InterfaceStats, MetricStats, SlowestCall};
