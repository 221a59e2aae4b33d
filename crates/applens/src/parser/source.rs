//! Source prior: a one-shot platform guess from the file name hint.
//!
//! Runs once per document before any line is classified. The result is only
//! a prior; structural rules in the cascade may override it per line.

use super::model::LogSource;

/// Guess the originating platform from a file name hint.
///
/// Checked in order (case-insensitive substring match):
/// 1. `ios` or a `.syslog` suffix → IOS
/// 2. `android` or `logcat` → ANDROID
/// 3. `wechat` or `miniprogram` → WECHAT
///
/// Anything else, including an empty hint, is UNKNOWN.
pub fn detect_source(file_name_hint: &str) -> LogSource {
    let hint = file_name_hint.trim().to_lowercase();
    if hint.is_empty() {
        return LogSource::Unknown;
    }

    if hint.contains("ios") || hint.ends_with(".syslog") {
        return LogSource::Ios;
    }

    if hint.contains("android") || hint.contains("logcat") {
        return LogSource::Android;
    }

    if hint.contains("wechat") || hint.contains("miniprogram") {
        return LogSource::Wechat;
    }

    LogSource::Unknown
}
