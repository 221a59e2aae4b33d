use std::sync::LazyLock;

use regex::Regex;

use crate::parser::traits::*;

/// Brief-format tag token: `E/Tag:`, `W/Tag(1234):`, `E/AndroidRuntime( 812):`
static TAG_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z])/[^\s:(]+(?:\(\s*\d+\))?\s*:").expect("valid android tag regex")
});

/// Threadtime-format level column: `... 1234  1234 E AndroidRuntime: ...`
static THREADTIME_LEVEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)([VDIWEFA])\s+\S+?\s*:").expect("valid threadtime regex")
});

/// Logcat timestamp: `MM-DD HH:MM:SS.mmm` (the year is never printed)
static LOGCAT_TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3}").expect("valid logcat timestamp regex")
});

const ANDROID_RUNTIME: &str = "AndroidRuntime";

/// Android logcat lines. Highest priority: overrides any file-level prior.
pub struct AndroidRule;

impl LineRule for AndroidRule {
    fn classify(&self, line: &str, _prior: LogSource) -> Option<Classification> {
        let letter = match TAG_TOKEN.captures(line) {
            Some(caps) => caps.get(1).map(|m| m.as_str()),
            None if line.contains(ANDROID_RUNTIME) => THREADTIME_LEVEL
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str()),
            None => return None,
        };

        let level = match letter {
            Some("E") => LogLevel::Error,
            Some("W") => LogLevel::Warning,
            Some("D") => LogLevel::Debug,
            _ => LogLevel::Info,
        };

        let mut classification = Classification::new(LogSource::Android, level);
        if let Some(ts) = LOGCAT_TIMESTAMP.find(line) {
            classification = classification.with_timestamp(ts.as_str());
        }
        Some(classification)
    }

    fn name(&self) -> &'static str {
        "android"
    }
}
