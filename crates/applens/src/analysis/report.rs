use std::fmt;

use bytes::Bytes;

use super::service::Analysis;
use super::summary::AnalysisSummary;
use crate::metrics::{InterfaceMetric, PerformanceMetric};
use crate::parser::LogRecord;

/// Everything a report writer gets to look at.
pub struct ReportRequest<'a> {
    pub records: &'a [LogRecord],
    pub performance: &'a [PerformanceMetric],
    pub interfaces: &'a [InterfaceMetric],
    pub summary: AnalysisSummary,
    /// Optional screenshot or chart, passed through untouched
    pub image: Option<Bytes>,
}

impl<'a> ReportRequest<'a> {
    pub fn new(analysis: &'a Analysis) -> Self {
        Self {
            records: &analysis.records,
            performance: &analysis.performance,
            interfaces: &analysis.interfaces,
            summary: AnalysisSummary::from_analysis(analysis),
            image: None,
        }
    }

    pub fn with_image(mut self, image: Bytes) -> Self {
        self.image = Some(image);
        self
    }
}

impl fmt::Debug for ReportRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportRequest")
            .field("records", &self.records.len())
            .field("performance", &self.performance.len())
            .field("interfaces", &self.interfaces.len())
            .field("image_bytes", &self.image.as_ref().map(|b| b.len()))
            .finish()
    }
}

/// Turns an analysis into prose. Implementations live outside this crate.
pub trait ReportCollaborator: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn report(&self, request: &ReportRequest<'_>) -> Result<String, Self::Error>;

    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Analyzer;

    #[derive(Debug, thiserror::Error)]
    #[error("nothing to report")]
    struct EmptyReport;

    struct Headline;

    impl ReportCollaborator for Headline {
        type Error = EmptyReport;

        fn report(&self, request: &ReportRequest<'_>) -> Result<String, Self::Error> {
            if request.records.is_empty() {
                return Err(EmptyReport);
            }
            Ok(format!(
                "{} records, {} errors, {} API calls",
                request.summary.total_records,
                request.summary.error_count(),
                request.summary.interfaces.calls
            ))
        }

        fn name(&self) -> &'static str {
            "headline"
        }
    }

    #[test]
    fn test_collaborator_sees_summary() {
        let analysis = Analyzer::default().analyze("E/Net: GET /a 500 30ms\nall good", "android.log");
        let request = ReportRequest::new(&analysis);
        assert_eq!(Headline.report(&request).unwrap(), "2 records, 1 errors, 1 API calls");
    }

    #[test]
    fn test_collaborator_error_propagates() {
        let analysis = Analyzer::default().analyze("\n\n", "");
        let request = ReportRequest::new(&analysis).with_image(Bytes::from_static(b"\x89PNG"));
        assert!(Headline.report(&request).is_err());
        assert!(format!("{:?}", request).contains("image_bytes: Some(4)"));
    }
}
