// Log timestamp validation
//
// Scans log lines for an embedded RFC 3339-like timestamp and flags three
// kinds of temporal problems:
// - parse-error: the timestamp-like substring is not valid RFC 3339
// - time-regression: the timestamp is more than the tolerance (default 5m)
//   behind the previous valid one
// - missing-timezone-context: the line has no `TZ=` or `zone=` marker
//
// The zone-context check is purely textual; it does not verify the marker's
// value. A malformed line never aborts a pass, it is only counted.

mod config;
mod line;
mod stream;
mod summary;

pub use config::{ValidatorConfig, DEFAULT_REGRESSION_TOLERANCE_SECS};
pub use line::{
    extract_timestamp, has_zone_context, normalize_offset, validate_line,
    validate_line_with_tolerance, IssueKind, LineValidation,
};
pub use stream::{validate_reader, validate_reader_with, Finding, StreamValidator};
pub use summary::{truncate_sample, ValidationSummary};
