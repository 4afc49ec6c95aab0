// Single-line timestamp extraction and checks
//
// `validate_line` is a pure function of the line and the previous cursor:
// the same inputs always give the same issues and the same new cursor.

use super::config::DEFAULT_REGRESSION_TOLERANCE_SECS;
use chrono::{DateTime, Duration, FixedOffset};
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

/// RFC 3339-like timestamp with optional `Z` or `±HH:MM` / `±HHMM` offset
const TIMESTAMP_PATTERN: &str =
    r"([0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}(?:Z|[+-][0-9]{2}:?[0-9]{2})?)";

/// Literal markers accepted as explicit timezone context
const ZONE_MARKERS: [&str; 2] = ["TZ=", "zone="];

/// Byte index where the offset starts in a matched timestamp
const OFFSET_START: usize = 19;

fn timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TIMESTAMP_PATTERN).expect("timestamp pattern is valid"))
}

/// Kind of temporal problem found on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// A timestamp-like substring did not parse as RFC 3339
    ParseError,
    /// Timestamp is more than the tolerance behind the previous one
    TimeRegression,
    /// Line carries no `TZ=` / `zone=` marker
    MissingTimezoneContext,
}

impl IssueKind {
    pub const ALL: [IssueKind; 3] = [
        IssueKind::ParseError,
        IssueKind::TimeRegression,
        IssueKind::MissingTimezoneContext,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::ParseError => "parse-error",
            IssueKind::TimeRegression => "time-regression",
            IssueKind::MissingTimezoneContext => "missing-timezone-context",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineValidation {
    /// Issues in detection order; empty for clean or timestamp-free lines
    pub issues: Vec<IssueKind>,
    /// Cursor to carry into the next line
    pub cursor: Option<DateTime<FixedOffset>>,
    /// Whether a timestamp-like substring was found
    pub has_timestamp: bool,
    /// Parser message when `issues` holds `ParseError`
    pub parse_failure: Option<String>,
}

/// First RFC 3339-like substring of `line`, if any
pub fn extract_timestamp(line: &str) -> Option<&str> {
    timestamp_regex().find(line).map(|m| m.as_str())
}

/// Insert the missing colon in a `±HHMM` offset so strict RFC 3339 parsing accepts it
pub fn normalize_offset(raw: &str) -> Cow<'_, str> {
    match raw.get(OFFSET_START..) {
        Some(offset) if offset.len() == 5 && (offset.starts_with('+') || offset.starts_with('-')) => {
            let split = OFFSET_START + 3;
            Cow::Owned(format!("{}:{}", &raw[..split], &raw[split..]))
        }
        _ => Cow::Borrowed(raw),
    }
}

/// Whether the line names its timezone explicitly
pub fn has_zone_context(line: &str) -> bool {
    ZONE_MARKERS.iter().any(|marker| line.contains(marker))
}

/// Check `line` against the previous cursor using the default five minute tolerance
pub fn validate_line(line: &str, previous: Option<DateTime<FixedOffset>>) -> LineValidation {
    let tolerance = Duration::seconds(i64::from(DEFAULT_REGRESSION_TOLERANCE_SECS));
    validate_line_with_tolerance(line, previous, tolerance)
}

/// Check `line` against the previous cursor
///
/// A parse failure reports only `ParseError` and keeps the previous cursor.
/// On a successful parse the cursor advances to the new timestamp even when
/// other issues were raised.
pub fn validate_line_with_tolerance(
    line: &str,
    previous: Option<DateTime<FixedOffset>>,
    tolerance: Duration,
) -> LineValidation {
    let Some(raw) = extract_timestamp(line) else {
        return LineValidation {
            issues: Vec::new(),
            cursor: previous,
            has_timestamp: false,
            parse_failure: None,
        };
    };

    let parsed = match DateTime::parse_from_rfc3339(&normalize_offset(raw)) {
        Ok(t) => t,
        Err(e) => {
            return LineValidation {
                issues: vec![IssueKind::ParseError],
                cursor: previous,
                has_timestamp: true,
                parse_failure: Some(format!("{:?}: {}", raw, e)),
            };
        }
    };

    let mut issues = Vec::new();
    if previous.is_some_and(|prev| parsed < prev - tolerance) {
        issues.push(IssueKind::TimeRegression);
    }
    if !has_zone_context(line) {
        issues.push(IssueKind::MissingTimezoneContext);
    }

    LineValidation {
        issues,
        cursor: Some(parsed),
        has_timestamp: true,
        parse_failure: None,
    }
}
