use serde::{Deserialize, Serialize};

/// Placeholder timestamp for records where no timestamp pattern matched.
pub const NO_TIMESTAMP: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
    /// Only seen before the keyword rule runs; never on an emitted record.
    Unknown,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Error,
        LogLevel::Warning,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Unknown => "UNKNOWN",
        }
    }

    /// Parse a level name as typed on the command line (`error`, `warn`, ...).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "error" | "err" | "e" => Some(LogLevel::Error),
            "warning" | "warn" | "w" => Some(LogLevel::Warning),
            "info" | "i" => Some(LogLevel::Info),
            "debug" | "d" => Some(LogLevel::Debug),
            "unknown" => Some(LogLevel::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Originating platform of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogSource {
    /// Android logcat (brief or threadtime)
    Android,
    /// iOS device syslog
    Ios,
    /// Mini-program console / JSON logs
    Wechat,
    Unknown,
}

impl LogSource {
    pub const ALL: [LogSource; 4] = [
        LogSource::Android,
        LogSource::Ios,
        LogSource::Wechat,
        LogSource::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogSource::Android => "ANDROID",
            LogSource::Ios => "IOS",
            LogSource::Wechat => "WECHAT",
            LogSource::Unknown => "UNKNOWN",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "android" => Some(LogSource::Android),
            "ios" => Some(LogSource::Ios),
            "wechat" | "miniprogram" => Some(LogSource::Wechat),
            "unknown" => Some(LogSource::Unknown),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single classification rule.
///
/// `message` is `None` when the rule keeps the line itself as the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub source: LogSource,
    pub level: LogLevel,
    pub timestamp: String,
    pub message: Option<String>,
}

impl Classification {
    pub fn new(source: LogSource, level: LogLevel) -> Self {
        Self {
            source,
            level,
            timestamp: NO_TIMESTAMP.to_string(),
            message: None,
        }
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// One structured record per non-blank input line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Unique within one parse run: `<run salt>-<line index>`
    pub id: String,
    /// Zero-based index of the line in the original document
    pub line: usize,
    /// Native-format timestamp substring, or `N/A`
    pub timestamp: String,
    pub level: LogLevel,
    pub source: LogSource,
    pub message: String,
    /// Original line, byte-for-byte
    pub raw: String,
}

impl LogRecord {
    pub fn has_timestamp(&self) -> bool {
        self.timestamp != NO_TIMESTAMP
    }
}

/// Per-run classification knobs.
#[derive(Debug, Clone, Default)]
pub struct ClassifyOptions {
    /// Remove ANSI escape sequences before the rules look at a line.
    pub strip_ansi: bool,
}
