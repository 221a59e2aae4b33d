use std::sync::LazyLock;

use regex::Regex;

use crate::parser::traits::*;

/// BSD-syslog style prefix as written by iOS: `Oct 27 10:00:00`
static SYSLOG_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+\d{1,2}\s+\d{2}:\d{2}:\d{2}")
        .expect("valid ios syslog prefix regex")
});

/// iOS device syslog lines.
///
/// Only consulted when the prior is IOS or UNKNOWN; a document hinted as
/// another platform never gets its lines re-labelled as iOS by this rule.
pub struct IosRule;

impl LineRule for IosRule {
    fn classify(&self, line: &str, prior: LogSource) -> Option<Classification> {
        if !matches!(prior, LogSource::Ios | LogSource::Unknown) {
            return None;
        }

        let prefix = SYSLOG_PREFIX.find(line.trim_start())?;
        Some(Classification::new(LogSource::Ios, severity(line)).with_timestamp(prefix.as_str()))
    }

    fn name(&self) -> &'static str {
        "ios"
    }
}

/// `<Error>`, `error:` and bare `error` all contain "error", so one substring
/// test covers them; the same holds for warnings.
fn severity(line: &str) -> LogLevel {
    let lower = line.to_lowercase();
    if lower.contains("error") {
        LogLevel::Error
    } else if lower.contains("warning") {
        LogLevel::Warning
    } else if lower.contains("<debug>") {
        LogLevel::Debug
    } else {
        LogLevel::Info
    }
}
