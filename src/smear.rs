//! Leap-second smear simulation
//!
//! Instead of inserting the leap second as a discrete step, a smear absorbs
//! it as a continuous skew over a 24 hour window. The `google` method is a
//! linear ramp from -0.5s at hour 0 toward +0.5s, clamped to ±0.5s.

use crate::datetime::{out_of_range, parse_date};
use crate::error::{Result, TimeguardError};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use std::fmt;
use std::str::FromStr;

pub const HOURS_PER_DAY: u32 = 24;

/// Largest skew, in seconds, either side of true time
pub const MAX_SMEAR_SECONDS: f64 = 0.5;

const SECONDS_IN_DAY: f64 = 86_400.0;

/// Supported smear curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmearMethod {
    /// Linear 24h ramp centered on the leap second
    #[default]
    Google,
}

impl SmearMethod {
    pub fn name(&self) -> &'static str {
        match self {
            SmearMethod::Google => "google",
        }
    }

    /// Skew in seconds at the start of `hour`
    pub fn offset_at_hour(&self, hour: u32) -> f64 {
        match self {
            SmearMethod::Google => {
                let raw = f64::from(hour * 3600) / SECONDS_IN_DAY - 0.5;
                raw.clamp(-MAX_SMEAR_SECONDS, MAX_SMEAR_SECONDS)
            }
        }
    }
}

impl FromStr for SmearMethod {
    type Err = TimeguardError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "google" => Ok(SmearMethod::Google),
            other => Err(TimeguardError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl fmt::Display for SmearMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Skew applied at one hour of the smeared day
#[derive(Debug, Clone, PartialEq)]
pub struct SmearPoint {
    /// Hour index, 0-23
    pub hour: u32,
    /// Fractional skew in seconds, within ±0.5
    pub offset_seconds: f64,
    /// Start of the hour with the skew applied
    pub adjusted: DateTime<Utc>,
}

/// Generate the 24 point curve for `date` (`YYYY-MM-DD`) using the method named `method`
///
/// The method is checked before the date is parsed.
pub fn generate_smear(date: &str, method: &str) -> Result<Vec<SmearPoint>> {
    let method: SmearMethod = method.parse()?;
    let day = parse_date(date)?;
    smear_curve(day, method)
}

/// Curve for an already-parsed UTC calendar day
///
/// Fails with a parse error when an adjusted instant leaves chrono's range.
pub fn smear_curve(day: NaiveDate, method: SmearMethod) -> Result<Vec<SmearPoint>> {
    let start = day.and_time(NaiveTime::MIN).and_utc();
    tracing::debug!(%day, %method, "generating smear curve");

    (0..HOURS_PER_DAY)
        .map(|hour| {
            let offset_seconds = method.offset_at_hour(hour);
            let skew = Duration::nanoseconds((offset_seconds * 1e9) as i64);
            let adjusted = start
                .checked_add_signed(Duration::hours(i64::from(hour)) + skew)
                .ok_or_else(|| out_of_range(day, &format!("smear hour {:02}", hour)))?;
            Ok(SmearPoint {
                hour,
                offset_seconds,
                adjusted,
            })
        })
        .collect()
}
