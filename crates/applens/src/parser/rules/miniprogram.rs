use serde_json::{Map, Value};

use crate::parser::traits::*;

/// Mini-program console output: one JSON object per line, or a bracketed
/// level tag such as `[INFO] page loaded`.
///
/// Only consulted when the prior is WECHAT or UNKNOWN. Malformed JSON yields
/// no classification so the line falls through to the keyword rule.
pub struct MiniProgramRule;

impl LineRule for MiniProgramRule {
    fn classify(&self, line: &str, prior: LogSource) -> Option<Classification> {
        if !matches!(prior, LogSource::Wechat | LogSource::Unknown) {
            return None;
        }

        let trimmed = line.trim();
        if looks_like_json_object(trimmed) {
            return match serde_json::from_str::<Value>(trimmed) {
                Ok(Value::Object(obj)) => Some(classify_object(&obj)),
                _ => None,
            };
        }

        let level = if trimmed.starts_with("[INFO]") {
            LogLevel::Info
        } else if trimmed.starts_with("[ERR") {
            LogLevel::Error
        } else if trimmed.starts_with("[WARN") {
            LogLevel::Warning
        } else {
            return None;
        };

        Some(Classification::new(LogSource::Wechat, level))
    }

    fn name(&self) -> &'static str {
        "miniprogram"
    }
}

/// Cheap structural check: the trimmed line opens and closes an object.
pub fn looks_like_json_object(trimmed: &str) -> bool {
    trimmed.len() >= 2 && trimmed.starts_with('{') && trimmed.ends_with('}')
}

fn classify_object(obj: &Map<String, Value>) -> Classification {
    let level = match obj.get("level").and_then(Value::as_str) {
        Some(l) if l.eq_ignore_ascii_case("error") => LogLevel::Error,
        Some(l) if l.eq_ignore_ascii_case("warn") => LogLevel::Warning,
        _ => LogLevel::Info,
    };

    let mut classification = Classification::new(LogSource::Wechat, level);

    if let Some(message) = field_text(obj, &["message", "msg"]) {
        classification = classification.with_message(message);
    }
    if let Some(ts) = field_text(obj, &["time", "timestamp"]) {
        classification = classification.with_timestamp(ts);
    }

    classification
}

/// First present, non-null field among `keys`. Strings are taken verbatim,
/// other values in their JSON text form.
fn field_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find(|value| !value.is_null())
        .map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}
