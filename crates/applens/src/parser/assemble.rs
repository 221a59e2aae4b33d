use uuid::Uuid;

use super::model::{Classification, LogRecord};

const SALT_LEN: usize = 8;

/// Packages classifier output into records with run-unique identifiers.
///
/// Identifiers are `<salt>-<line index>`: the salt is drawn once per run, the
/// index is the zero-based position of the line in the original document
/// (blank lines included), so ids stay traceable to the source text.
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    salt: String,
}

impl RecordAssembler {
    pub fn new() -> Self {
        let mut salt = Uuid::new_v4().simple().to_string();
        salt.truncate(SALT_LEN);
        Self { salt }
    }

    /// Fixed salt, for reproducible identifiers.
    pub fn with_salt(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// `text` is the line the rules saw (ANSI-stripped when enabled); it
    /// becomes the message unless the classification extracted one.
    pub fn assemble(&self, index: usize, raw: &str, text: &str, classification: Classification) -> LogRecord {
        LogRecord {
            id: format!("{}-{}", self.salt, index),
            line: index,
            timestamp: classification.timestamp,
            level: classification.level,
            source: classification.source,
            message: classification.message.unwrap_or_else(|| text.to_string()),
            raw: raw.to_string(),
        }
    }
}

impl Default for RecordAssembler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::model::{LogLevel, LogSource};

    #[test]
    fn test_salt_is_short_hex() {
        let assembler = RecordAssembler::new();
        assert_eq!(assembler.salt().len(), SALT_LEN);
        assert!(assembler.salt().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_salts_differ_between_runs() {
        assert_ne!(RecordAssembler::new().salt(), RecordAssembler::new().salt());
    }

    #[test]
    fn test_assemble_uses_line_index() {
        let assembler = RecordAssembler::with_salt("run");
        let record = assembler.assemble(
            7,
            "  raw line ",
            "  raw line ",
            Classification::new(LogSource::Unknown, LogLevel::Info),
        );
        assert_eq!(record.id, "run-7");
        assert_eq!(record.line, 7);
        assert_eq!(record.raw, "  raw line ");
        assert_eq!(record.message, "  raw line ");
    }

    #[test]
    fn test_assemble_prefers_extracted_message() {
        let assembler = RecordAssembler::with_salt("run");
        let record = assembler.assemble(
            0,
            r#"{"msg":"timeout"}"#,
            r#"{"msg":"timeout"}"#,
            Classification::new(LogSource::Wechat, LogLevel::Info).with_message("timeout"),
        );
        assert_eq!(record.message, "timeout");
        assert_eq!(record.raw, r#"{"msg":"timeout"}"#);
    }
}
