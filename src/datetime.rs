//! Layout parsing for user-supplied civil times
//!
//! Inputs are tried against an ordered list of candidate layouts; the first
//! layout that parses wins, and if none do every failure is reported together.
//! Years are exactly four digits: chrono's `%Y` alone would also accept signed
//! and extended years near the edge of its range.

use crate::error::{Result, TimeguardError};
use chrono::{NaiveDate, NaiveDateTime};

/// Accepted local datetime layouts (no seconds, no offset; the zone supplies it)
pub const LOCAL_DATETIME_LAYOUTS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"];

/// Accepted calendar date layouts
pub const DATE_LAYOUTS: &[&str] = &["%Y-%m-%d"];

/// Parse a wall-clock datetime such as `2024-03-10 02:30` or `2024-03-10T02:30`
pub fn parse_local_datetime(input: &str) -> Result<NaiveDateTime> {
    parse_with_layouts(input, LOCAL_DATETIME_LAYOUTS, NaiveDateTime::parse_from_str)
}

/// Parse a calendar date such as `2016-12-31`
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    parse_with_layouts(input, DATE_LAYOUTS, NaiveDate::parse_from_str)
}

fn parse_with_layouts<T>(
    input: &str,
    layouts: &[&str],
    parse: fn(&str, &str) -> chrono::ParseResult<T>,
) -> Result<T> {
    if !has_four_digit_year(input) {
        return Err(TimeguardError::Parse {
            input: input.to_string(),
            attempts: layouts
                .iter()
                .map(|layout| format!("{}: expected a four digit year", layout))
                .collect(),
        });
    }

    let mut attempts = Vec::with_capacity(layouts.len());
    for layout in layouts {
        match parse(input, layout) {
            Ok(value) => return Ok(value),
            Err(e) => attempts.push(format!("{}: {}", layout, e)),
        }
    }
    Err(TimeguardError::Parse {
        input: input.to_string(),
        attempts,
    })
}

/// `YYYY-` prefix with ASCII digits only
fn has_four_digit_year(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() > 4 && bytes[..4].iter().all(u8::is_ascii_digit) && bytes[4] == b'-'
}

/// Parse failure for a value that left chrono's representable range
pub(crate) fn out_of_range(input: impl ToString, step: &str) -> TimeguardError {
    TimeguardError::Parse {
        input: input.to_string(),
        attempts: vec![format!("{} is out of range", step)],
    }
}
