//! Export: serialize records to `text`, `csv` or `json` bytes.

use std::path::Path;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parser::LogRecord;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV writer flush failed: {0}")]
    Flush(String),

    #[error("Unknown export format: {0} (expected text, csv or json)")]
    UnknownFormat(String),

    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Raw lines, one per record (round-trips the non-blank input)
    #[default]
    Text,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Infer the format from an output path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" | "log" => Ok(ExportFormat::Text),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const CSV_HEADER: [&str; 7] = ["id", "line", "timestamp", "level", "source", "message", "raw"];

/// Serialize records in the chosen format.
pub fn export_records(records: &[LogRecord], format: ExportFormat) -> Result<Bytes, ExportError> {
    match format {
        ExportFormat::Text => Ok(export_text(records)),
        ExportFormat::Csv => export_csv(records),
        ExportFormat::Json => Ok(Bytes::from(serde_json::to_vec_pretty(records)?)),
    }
}

/// Serialize and write to `path`, returning the number of bytes written.
pub fn export_to_path(records: &[LogRecord], format: ExportFormat, path: &Path) -> Result<usize, ExportError> {
    let bytes = export_records(records, format)?;
    std::fs::write(path, &bytes)?;
    Ok(bytes.len())
}

fn export_text(records: &[LogRecord]) -> Bytes {
    let capacity = records.iter().map(|r| r.raw.len() + 1).sum();
    let mut out = String::with_capacity(capacity);
    for record in records {
        out.push_str(&record.raw);
        out.push('\n');
    }
    Bytes::from(out)
}

/// Fields holding a comma, quote or newline are quoted, embedded quotes doubled.
fn export_csv(records: &[LogRecord]) -> Result<Bytes, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER)?;

    for record in records {
        wtr.write_record([
            record.id.as_str(),
            &record.line.to_string(),
            &record.timestamp,
            record.level.as_str(),
            record.source.as_str(),
            &record.message,
            &record.raw,
        ])?;
    }

    let buf = wtr
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;
    Ok(Bytes::from(buf))
}
