// Aggregate results of one validation pass
//
// Serializes to the documented JSON shape:
// { file, lines_processed, lines_with_timestamp, counts, samples, issues_total }

use super::line::IssueKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// Per-kind counts and capped sample lines for one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    /// Name of the validated source (file path or `-`)
    pub file: String,
    /// Every line read, with or without a timestamp
    pub lines_processed: usize,
    /// Lines where a timestamp-like substring was found
    pub lines_with_timestamp: usize,
    /// Issue count per kind; every kind is present, zero-filled
    pub counts: BTreeMap<IssueKind, usize>,
    /// Up to `sample_limit` `"<line>: <text>"` entries per kind
    pub samples: BTreeMap<IssueKind, Vec<String>>,
    pub issues_total: usize,
}

impl ValidationSummary {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            lines_processed: 0,
            lines_with_timestamp: 0,
            counts: IssueKind::ALL.iter().map(|k| (*k, 0)).collect(),
            samples: IssueKind::ALL.iter().map(|k| (*k, Vec::new())).collect(),
            issues_total: 0,
        }
    }

    pub fn count(&self, kind: IssueKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn samples_for(&self, kind: IssueKind) -> &[String] {
        self.samples.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_clean(&self) -> bool {
        self.issues_total == 0
    }

    /// Record one issue, keeping a sample while under `sample_limit`
    pub(crate) fn record(
        &mut self,
        kind: IssueKind,
        line_number: usize,
        line: &str,
        sample_limit: usize,
        sample_max_bytes: usize,
    ) {
        *self.counts.entry(kind).or_insert(0) += 1;
        self.issues_total += 1;

        let samples = self.samples.entry(kind).or_default();
        if samples.len() < sample_limit {
            samples.push(format!(
                "{}: {}",
                line_number,
                truncate_sample(line, sample_max_bytes)
            ));
        }
    }

    /// Pretty-printed JSON document
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Cut `line` to at most `max_bytes` at a char boundary, marking the cut with `…`
pub fn truncate_sample(line: &str, max_bytes: usize) -> String {
    if line.len() <= max_bytes {
        return line.to_string();
    }
    let mut end = max_bytes;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &line[..end])
}
