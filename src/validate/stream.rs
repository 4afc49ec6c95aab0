// Streaming validation over a whole log source
//
// One forward pass, one cursor, bounded memory per line. Each pass owns its
// own `StreamValidator`; nothing is shared between passes.

use super::config::ValidatorConfig;
use super::line::{validate_line_with_tolerance, IssueKind};
use super::summary::ValidationSummary;
use crate::error::{Result, TimeguardError};
use chrono::{DateTime, Duration, FixedOffset, SecondsFormat};
use std::fmt;
use std::io::{BufRead, Read};

/// One issue on one line, with a human-readable detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub line_number: usize,
    pub kind: IssueKind,
    pub detail: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.detail)
    }
}

/// Incremental validator: feed lines in order, then `finish`
pub struct StreamValidator {
    config: ValidatorConfig,
    tolerance: Duration,
    cursor: Option<DateTime<FixedOffset>>,
    summary: ValidationSummary,
}

impl StreamValidator {
    pub fn new(source: impl Into<String>, config: ValidatorConfig) -> Self {
        Self {
            tolerance: config.regression_tolerance(),
            config,
            cursor: None,
            summary: ValidationSummary::new(source),
        }
    }

    /// Timestamp of the last successfully parsed line
    pub fn cursor(&self) -> Option<DateTime<FixedOffset>> {
        self.cursor
    }

    /// Validate the next line of the source
    pub fn push_line(&mut self, line: &str) -> Vec<Finding> {
        self.summary.lines_processed += 1;
        let line_number = self.summary.lines_processed;

        let previous = self.cursor;
        let result = validate_line_with_tolerance(line, previous, self.tolerance);
        if result.has_timestamp {
            self.summary.lines_with_timestamp += 1;
        }
        self.cursor = result.cursor;

        let mut findings = Vec::with_capacity(result.issues.len());
        for kind in result.issues {
            self.summary.record(
                kind,
                line_number,
                line,
                self.config.sample_limit,
                self.config.sample_max_bytes,
            );
            let detail = match kind {
                IssueKind::ParseError => format!(
                    "parse error: {}",
                    result.parse_failure.as_deref().unwrap_or("invalid timestamp")
                ),
                IssueKind::TimeRegression => format!(
                    "time regression >{}s (prev {}, current {})",
                    self.config.regression_tolerance_secs,
                    format_cursor(previous),
                    format_cursor(result.cursor)
                ),
                IssueKind::MissingTimezoneContext => "no explicit timezone context".to_string(),
            };
            tracing::trace!(line = line_number, issue = %kind, "{}", detail);
            findings.push(Finding {
                line_number,
                kind,
                detail,
            });
        }
        findings
    }

    pub fn finish(self) -> ValidationSummary {
        tracing::debug!(
            file = %self.summary.file,
            lines = self.summary.lines_processed,
            issues = self.summary.issues_total,
            "validation pass complete"
        );
        self.summary
    }
}

fn format_cursor(t: Option<DateTime<FixedOffset>>) -> String {
    t.map(|t| t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
        .unwrap_or_else(|| "-".to_string())
}

/// Validate every line of `reader`
pub fn validate_reader<R: BufRead>(
    reader: R,
    source: &str,
    config: &ValidatorConfig,
) -> Result<ValidationSummary> {
    validate_reader_with(reader, source, config, |_| {})
}

/// Validate every line of `reader`, reporting each finding as it is found
///
/// Lines are split on `\n` with a trailing `\r` removed, and decoded as
/// lossy UTF-8. A line longer than `config.max_line_bytes` aborts the pass.
pub fn validate_reader_with<R, F>(
    mut reader: R,
    source: &str,
    config: &ValidatorConfig,
    mut on_finding: F,
) -> Result<ValidationSummary>
where
    R: BufRead,
    F: FnMut(&Finding),
{
    let limit = config.max_line_bytes;
    let mut validator = StreamValidator::new(source, config.clone());
    let mut buf = Vec::new();

    loop {
        buf.clear();
        // Room for the longest accepted line plus "\r\n"
        let read = (&mut reader)
            .take(limit as u64 + 2)
            .read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        if buf.len() > limit {
            return Err(TimeguardError::LineTooLong {
                line: validator.summary.lines_processed + 1,
                limit,
            });
        }

        let line = String::from_utf8_lossy(&buf);
        for finding in validator.push_line(&line) {
            on_finding(&finding);
        }
    }

    Ok(validator.finish())
}
