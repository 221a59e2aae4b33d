use std::sync::LazyLock;

use regex::Regex;

use super::model::InterfaceMetric;
use crate::parser::LogRecord;

/// Status codes recognised in API log lines.
///
/// Deliberately closed: a line carrying any other code (301, 429, 503, ...)
/// does not match at all.
pub const KNOWN_STATUS_CODES: [&str; 8] = ["200", "201", "400", "401", "403", "404", "500", "502"];

/// verb → url (query dropped) → ... status ... → duration `ms`, in that order.
///
/// The url must be followed by its query or whitespace, so it always spans the
/// whole token and a code inside the path is never taken as the status.
static API_CALL: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i)\b(GET|POST|PUT|DELETE|PATCH)\s+([^\s?]+)(?:\?\S*)?\s.*?\b({})\b.*?(\d+(?:\.\d+)?)\s*ms",
        KNOWN_STATUS_CODES.join("|")
    );
    Regex::new(&pattern).expect("valid api call regex")
});

/// Match one message. `None` unless all four parts appear in order.
pub fn match_api_call(message: &str) -> Option<(String, String, String, f64)> {
    let caps = API_CALL.captures(message)?;
    let method = caps.get(1)?.as_str().to_ascii_uppercase();
    let url = caps.get(2)?.as_str().to_string();
    let status = caps.get(3)?.as_str().to_string();
    let duration: f64 = caps.get(4)?.as_str().parse().ok()?;
    Some((method, url, status, duration))
}

/// Scan every record's message for one HTTP call each.
///
/// Identifiers are `api-<n>`, numbered from 1 in emission order.
pub fn extract_interface_metrics(records: &[LogRecord]) -> Vec<InterfaceMetric> {
    let mut calls = Vec::new();
    for record in records {
        if let Some((method, url, status, duration)) = match_api_call(&record.message) {
            calls.push(InterfaceMetric {
                id: format!("api-{}", calls.len() + 1),
                method,
                url,
                status,
                duration,
            });
        }
    }
    calls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{LogLevel, LogSource};

    fn record(line: usize, message: &str) -> LogRecord {
        LogRecord {
            id: format!("t-{}", line),
            line,
            timestamp: "N/A".into(),
            level: LogLevel::Info,
            source: LogSource::Unknown,
            message: message.into(),
            raw: message.into(),
        }
    }

    #[test]
    fn test_query_string_dropped() {
        let (method, url, status, duration) =
            match_api_call("GET /api/v1/user?x=1 status:200 took:45ms").unwrap();
        assert_eq!(method, "GET");
        assert_eq!(url, "/api/v1/user");
        assert_eq!(status, "200");
        assert_eq!(duration, 45.0);
    }

    #[test]
    fn test_status_outside_closed_set() {
        assert!(match_api_call("GET /api/v1/user status:999 took:45ms").is_none());
        assert!(match_api_call("GET /api/v1/user status:503 took:45ms").is_none());
        assert!(match_api_call("POST /login 429 in 12ms").is_none());
    }

    #[test]
    fn test_lower_case_verb_normalized() {
        let (method, url, _, duration) = match_api_call("post https://x.io/login -> 401 (12.5ms)").unwrap();
        assert_eq!(method, "POST");
        assert_eq!(url, "https://x.io/login");
        assert_eq!(duration, 12.5);
    }

    #[test]
    fn test_parts_must_be_in_order() {
        assert!(match_api_call("took 45ms status 200 GET /api").is_none());
        assert!(match_api_call("GET /api took 45ms").is_none());
        assert!(match_api_call("GET /api status 200").is_none());
    }

    #[test]
    fn test_duration_is_not_status() {
        // "200ms" is not a standalone status token
        assert!(match_api_call("GET /api took 200ms").is_none());
    }

    #[test]
    fn test_status_inside_path_is_not_the_status() {
        assert!(match_api_call("GET /v1/items/500 took 12ms").is_none());
        assert!(match_api_call("GET /orders/200/items took 7ms").is_none());
        assert!(match_api_call("GET /v1/items/500?page=2 took 12ms").is_none());
    }

    #[test]
    fn test_path_with_code_then_real_status() {
        let (_, url, status, duration) = match_api_call("GET /v1/items/500 status=404 took 12ms").unwrap();
        assert_eq!(url, "/v1/items/500");
        assert_eq!(status, "404");
        assert_eq!(duration, 12.0);
    }

    #[test]
    fn test_verb_must_be_whole_word() {
        assert!(match_api_call("target /x 200 5ms").is_none());
    }

    #[test]
    fn test_logcat_okhttp_line() {
        let line = "10-27 10:00:01.500 D/OkHttp: <-- DELETE /v2/items/9 404 Not Found (87ms)";
        let (method, url, status, duration) = match_api_call(line).unwrap();
        assert_eq!(method, "DELETE");
        assert_eq!(url, "/v2/items/9");
        assert_eq!(status, "404");
        assert_eq!(duration, 87.0);
    }

    #[test]
    fn test_extract_numbers_calls_in_order() {
        let records = vec![
            record(0, "GET /a 200 10ms"),
            record(1, "no call here"),
            record(2, "PUT /b 500 99ms"),
        ];
        let calls = extract_interface_metrics(&records);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].id, "api-1");
        assert_eq!(calls[0].url, "/a");
        assert_eq!(calls[1].id, "api-2");
        assert_eq!(calls[1].method, "PUT");
        assert_eq!(calls[1].status, "500");
    }

    #[test]
    fn test_first_match_per_line_only() {
        let records = vec![record(0, "GET /a 200 10ms; POST /b 201 20ms")];
        let calls = extract_interface_metrics(&records);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "/a");
    }
}
