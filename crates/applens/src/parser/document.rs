use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use super::ansi::strip_ansi;
use super::assemble::RecordAssembler;
use super::classifier::RuleCascade;
use super::counters::AnalysisCounters;
use super::lines::{is_blank, split_lines};
use super::model::{ClassifyOptions, LogRecord, LogSource};
use super::rules::miniprogram::looks_like_json_object;
use super::source::detect_source;

/// Turns a whole document into ordered records.
///
/// Stateless between calls: every `parse` draws a fresh identifier salt and
/// classifies against a prior fixed before the first line is read, so lines
/// can be classified in any order and merged back by index.
pub struct DocumentParser {
    cascade: RuleCascade,
    options: ClassifyOptions,
    /// Documents with at least this many lines are classified on the rayon pool
    parallel_min_lines: Option<usize>,
    counters: Arc<AnalysisCounters>,
}

impl DocumentParser {
    pub fn new() -> Self {
        Self {
            cascade: RuleCascade::new(),
            options: ClassifyOptions::default(),
            parallel_min_lines: None,
            counters: Arc::new(AnalysisCounters::new()),
        }
    }

    pub fn with_options(mut self, options: ClassifyOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_cascade(mut self, cascade: RuleCascade) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn with_counters(mut self, counters: Arc<AnalysisCounters>) -> Self {
        self.counters = counters;
        self
    }

    /// Enable parallel classification for documents of `min_lines` or more.
    pub fn parallel(mut self, min_lines: usize) -> Self {
        self.parallel_min_lines = Some(min_lines.max(1));
        self
    }

    pub fn counters(&self) -> &Arc<AnalysisCounters> {
        &self.counters
    }

    pub fn parse(&self, content: &str, file_name_hint: &str) -> Vec<LogRecord> {
        self.parse_with(content, file_name_hint, &RecordAssembler::new())
    }

    /// Parse with a caller-supplied assembler (fixed salt for reproducible ids).
    pub fn parse_with(&self, content: &str, file_name_hint: &str, assembler: &RecordAssembler) -> Vec<LogRecord> {
        let started = Instant::now();
        let prior = detect_source(file_name_hint);
        let lines: Vec<(usize, &str)> = split_lines(content).collect();

        let parallel = self
            .parallel_min_lines
            .is_some_and(|min| lines.len() >= min);

        let records: Vec<LogRecord> = if parallel {
            lines
                .par_iter()
                .filter_map(|&(index, raw)| self.classify_line(index, raw, prior, assembler))
                .collect()
        } else {
            lines
                .iter()
                .filter_map(|&(index, raw)| self.classify_line(index, raw, prior, assembler))
                .collect()
        };

        let blank = (lines.len() - records.len()) as u64;
        let elapsed = started.elapsed().as_nanos() as u64;
        self.counters.record_document(lines.len() as u64, blank, elapsed);

        debug!(
            hint = file_name_hint,
            prior = %prior,
            lines = lines.len(),
            records = records.len(),
            parallel,
            "Classified document"
        );

        records
    }

    fn classify_line(
        &self,
        index: usize,
        raw: &str,
        prior: LogSource,
        assembler: &RecordAssembler,
    ) -> Option<LogRecord> {
        let text: Cow<'_, str> = if self.options.strip_ansi {
            strip_ansi(raw)
        } else {
            Cow::Borrowed(raw)
        };

        if is_blank(&text) {
            return None;
        }

        let verdict = self.cascade.classify(&text, prior);

        if verdict.is_fallback()
            && matches!(prior, LogSource::Wechat | LogSource::Unknown)
            && looks_like_json_object(text.trim())
        {
            self.counters.record_json_fallback();
        }

        let classification = verdict.classification;
        self.counters
            .record_classification(classification.source, classification.level);

        Some(assembler.assemble(index, raw, &text, classification))
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify every non-blank line of `content`.
///
/// `file_name_hint` seeds the source prior (may be empty). Never fails: any
/// input yields a well-formed, possibly empty, sequence in document order.
pub fn parse_document(content: &str, file_name_hint: &str) -> Vec<LogRecord> {
    DocumentParser::new().parse(content, file_name_hint)
}
