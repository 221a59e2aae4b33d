//! Run: read the input, analyze it, and write the requested output.

use std::io::Write;

use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use super::cli::Cli;
use crate::analysis::{Analysis, AnalysisSummary, Analyzer};
use crate::conf::AnalyzerConfig;
use crate::export::export_records;
use crate::filter::{FilterMode, RecordFilter};
use crate::metrics::{InterfaceMetric, PerformanceMetric};
use crate::parser::LogRecord;

#[derive(Serialize)]
struct MetricsOutput<'a> {
    performance: &'a [PerformanceMetric],
    interfaces: &'a [InterfaceMetric],
}

/// Execute one CLI invocation.
pub fn run(cli: &Cli, analyzer: &Analyzer, config: &AnalyzerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(&cli.file)?;
    // Log files are not guaranteed to be valid UTF-8
    let content = String::from_utf8_lossy(&bytes);
    let hint = cli.file_name_hint();

    let analysis = analyzer.analyze(&content, &hint);
    let output = render(cli, &analysis, config)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &output)?;
            info!("Wrote {} bytes to {}", output.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&output)?;
            stdout.flush()?;
        }
    }

    let counters = analyzer.counters();
    info!(
        records = counters.total_records(),
        blank = counters.blank_skipped,
        json_fallbacks = counters.json_fallbacks,
        avg_document_time_us = counters.avg_document_time_us,
        "Done"
    );
    Ok(())
}

/// Produce the bytes for whichever output mode the arguments select.
pub fn render(cli: &Cli, analysis: &Analysis, config: &AnalyzerConfig) -> Result<Bytes, Box<dyn std::error::Error>> {
    if cli.summary {
        let summary = AnalysisSummary::from_analysis(analysis);
        return Ok(json_line(&summary)?);
    }

    if cli.metrics {
        let metrics = MetricsOutput {
            performance: &analysis.performance,
            interfaces: &analysis.interfaces,
        };
        return Ok(json_line(&metrics)?);
    }

    let filter = build_filter(cli)?;
    let selected: Vec<LogRecord> = if filter.is_empty() {
        analysis.records.clone()
    } else {
        filter.apply(&analysis.records).into_iter().cloned().collect()
    };

    let format = cli.export_format(config.export.format);
    info!(
        selected = selected.len(),
        total = analysis.records.len(),
        %format,
        "Exporting records"
    );
    Ok(export_records(&selected, format)?)
}

fn build_filter(cli: &Cli) -> Result<RecordFilter, crate::filter::FilterError> {
    let mut filter = RecordFilter::new()
        .with_levels(cli.level.iter().copied())
        .with_sources(cli.source.iter().copied());

    if let Some(pattern) = &cli.grep {
        let mode = if cli.exclude { FilterMode::Exclude } else { FilterMode::Include };
        filter = filter.with_pattern(pattern, cli.case_sensitive, mode)?;
    }
    Ok(filter)
}

fn json_line<T: Serialize>(value: &T) -> Result<Bytes, serde_json::Error> {
    let mut buf = serde_json::to_vec_pretty(value)?;
    buf.push(b'\n');
    Ok(Bytes::from(buf))
}
