use crate::parser::traits::*;

/// Last-resort rule: severity words anywhere in the line.
///
/// Always yields, so every line leaves the cascade with a concrete level.
/// Source stays at the file-level prior.
pub struct KeywordRule;

impl KeywordRule {
    pub const NAME: &'static str = "keyword";

    pub fn level_of(line: &str) -> LogLevel {
        let lower = line.to_lowercase();
        if lower.contains("error") || lower.contains("exception") || lower.contains("fail") {
            LogLevel::Error
        } else if lower.contains("warn") {
            LogLevel::Warning
        } else if lower.contains("debug") {
            LogLevel::Debug
        } else {
            LogLevel::Info
        }
    }
}

impl LineRule for KeywordRule {
    fn classify(&self, line: &str, prior: LogSource) -> Option<Classification> {
        Some(Classification::new(prior, Self::level_of(line)))
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}
