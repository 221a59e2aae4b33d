pub use super::model::{Classification, LogLevel, LogRecord, LogSource, NO_TIMESTAMP};

/// One step of the classification cascade.
///
/// A rule is a pure function of the line and the file-level source prior.
/// Returning `None` hands the line to the next rule in the cascade.
pub trait LineRule: Send + Sync {
    fn classify(&self, line: &str, prior: LogSource) -> Option<Classification>;
    fn name(&self) -> &'static str;
}
