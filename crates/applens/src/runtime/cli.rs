//! Cli: command-line arguments for the `applens` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::export::ExportFormat;
use crate::parser::{LogLevel, LogSource};

#[derive(Parser, Debug)]
#[command(name = "applens")]
#[command(about = "Classify mobile and mini-program logs and extract performance metrics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log file to analyze
    pub file: PathBuf,

    /// Name used to seed source detection (defaults to the file name)
    #[arg(long)]
    pub hint: Option<String>,

    /// Export format; inferred from --output when omitted
    #[arg(long, value_parser = parse_format)]
    pub format: Option<ExportFormat>,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Keep records whose raw line matches this regex
    #[arg(long)]
    pub grep: Option<String>,

    /// Drop records matching --grep instead of keeping them
    #[arg(long, requires = "grep")]
    pub exclude: bool,

    #[arg(long)]
    pub case_sensitive: bool,

    #[arg(long, value_parser = parse_level)]
    pub level: Vec<LogLevel>,

    #[arg(long, value_parser = parse_source)]
    pub source: Vec<LogSource>,

    /// Print the analysis summary as JSON
    #[arg(long, conflicts_with = "metrics")]
    pub summary: bool,

    /// Print performance and interface metrics as JSON
    #[arg(long)]
    pub metrics: bool,
}

impl Cli {
    pub fn file_name_hint(&self) -> String {
        match &self.hint {
            Some(hint) => hint.clone(),
            None => self
                .file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// --format, then the --output extension, then the configured default.
    pub fn export_format(&self, configured: ExportFormat) -> ExportFormat {
        self.format
            .or_else(|| self.output.as_deref().and_then(ExportFormat::from_path))
            .unwrap_or(configured)
    }
}

fn parse_format(value: &str) -> Result<ExportFormat, String> {
    value.parse().map_err(|e: crate::export::ExportError| e.to_string())
}

fn parse_level(value: &str) -> Result<LogLevel, String> {
    LogLevel::parse(value)
        .filter(|level| *level != LogLevel::Unknown)
        .ok_or_else(|| format!("unknown level '{}' (expected error, warning, info or debug)", value))
}

fn parse_source(value: &str) -> Result<LogSource, String> {
    LogSource::parse(value).ok_or_else(|| format!("unknown source '{}' (expected android, ios, wechat or unknown)", value))
}
