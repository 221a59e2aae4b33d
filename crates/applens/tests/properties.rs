use proptest::prelude::*;

use applens::export::{export_records, ExportFormat};
use applens::parser::LogLevel;
use applens::{extract_interface_metrics, extract_performance_metrics, parse_document};

/// One line without terminators, mixing plain text with log-ish tokens.
fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ \t]{0,3}",
        "[a-zA-Z0-9 :/\\[\\]{}\",.%-]{0,60}",
        Just("10-27 10:00:00.123 1-1/com.x E/Tag: boom".to_string()),
        Just("Oct 27 10:00:00 iPhone Process[99] <Notice>: started ok".to_string()),
        Just(r#"{"level":"warn","msg":"slow 16ms","time":123}"#.to_string()),
        Just("GET /api/v1/user?x=1 status:200 took:45ms".to_string()),
    ]
}

fn hint() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("android.log".to_string()),
        Just("device.syslog".to_string()),
        Just("miniprogram.log".to_string()),
        "[a-z.]{0,12}",
    ]
}

proptest! {
    /// One record per non-blank line, in order, never UNKNOWN, raw preserved.
    #[test]
    fn parse_is_total_and_preserves_raw(lines in prop::collection::vec(line(), 0..40), hint in hint()) {
        let content = lines.join("\n");
        let records = parse_document(&content, &hint);

        let expected: Vec<(usize, &String)> = lines
            .iter()
            .enumerate()
            .filter(|(_, l)| !l.trim().is_empty())
            .collect();

        prop_assert_eq!(records.len(), expected.len());
        for (record, (index, raw)) in records.iter().zip(expected) {
            prop_assert_eq!(record.line, index);
            prop_assert_eq!(&record.raw, raw);
            prop_assert_ne!(record.level, LogLevel::Unknown);
        }
    }

    /// Text export reproduces the non-blank lines.
    #[test]
    fn text_export_round_trips(lines in prop::collection::vec(line(), 0..20)) {
        let content = lines.join("\n");
        let records = parse_document(&content, "");
        let exported = export_records(&records, ExportFormat::Text).unwrap();

        let expected: String = lines
            .iter()
            .filter(|l| !l.trim().is_empty())
            .map(|l| format!("{}\n", l))
            .collect();
        prop_assert_eq!(String::from_utf8(exported.to_vec()).unwrap(), expected);
    }

    /// Metric extraction never panics and stays within its per-record bounds.
    #[test]
    fn metric_extraction_is_bounded(content in "[ -~\n]{0,400}") {
        let records = parse_document(&content, "");
        let performance = extract_performance_metrics(&records);
        let interfaces = extract_interface_metrics(&records);

        prop_assert!(performance.len() <= records.len() * 4);
        prop_assert!(interfaces.len() <= records.len());
        for (n, call) in interfaces.iter().enumerate() {
            prop_assert_eq!(&call.id, &format!("api-{}", n + 1));
        }
    }
}
