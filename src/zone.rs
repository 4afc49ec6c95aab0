//! Zone offset lookups backed by the IANA database
//!
//! The classifier only talks to [`ZoneOffsetProvider`]; the `chrono_tz::Tz`
//! implementation below is what the binary uses, tests substitute synthetic
//! zones with hand-placed transitions.

use crate::error::{Result, TimeguardError};
use chrono::{DateTime, Duration, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::{OffsetComponents, Tz};
use serde::Serialize;

/// Granularity used when searching backwards for the offset in effect before a gap
const GAP_PROBE_MINUTES: i64 = 15;

/// Gaps longer than this are not searched past (no real zone skips a full day)
const GAP_PROBE_STEPS: i64 = 96;

/// UTC offset in effect at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneOffset {
    /// Signed seconds east of UTC
    pub seconds_east: i32,
    /// Whether a daylight-saving adjustment is part of this offset
    pub observes_dst: bool,
}

impl ZoneOffset {
    pub fn fixed(&self) -> FixedOffset {
        FixedOffset::east_opt(self.seconds_east).unwrap_or_else(|| Utc.fix())
    }

    /// Render as `UTC+05:30` / `UTC-04:00`
    pub fn to_utc_label(&self) -> String {
        let sign = if self.seconds_east < 0 { '-' } else { '+' };
        let abs = self.seconds_east.unsigned_abs();
        format!("UTC{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
    }
}

/// How a wall-clock time mapped onto the zone's timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionKind {
    /// Exactly one instant has this local representation
    Unique,
    /// The local time occurs twice (fall-back overlap)
    Ambiguous,
    /// The local time never occurs (spring-forward gap)
    Skipped,
}

/// Result of mapping a local time onto an instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalResolution {
    pub instant: DateTime<Utc>,
    pub kind: ResolutionKind,
}

/// Source of UTC offsets for a named zone
pub trait ZoneOffsetProvider {
    /// Zone identifier, e.g. `America/New_York`
    fn name(&self) -> &str;

    /// Offset in effect at `instant`
    fn offset_at(&self, instant: DateTime<Utc>) -> ZoneOffset;

    /// Map a wall-clock time to an instant.
    ///
    /// Ambiguous times resolve to the earlier instant. Skipped times are read
    /// with the offset in effect just before the gap, which lands them after
    /// the jump (`02:30` becomes `03:30` across a one hour spring-forward).
    fn resolve_local(&self, local: NaiveDateTime) -> LocalResolution;

    /// Express `instant` in this zone's local offset
    fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset_at(instant).fixed())
    }
}

/// Look up an IANA zone identifier
pub fn resolve_zone(id: &str) -> Result<Tz> {
    id.parse::<Tz>()
        .map_err(|_| TimeguardError::UnknownZone(id.to_string()))
}

impl ZoneOffsetProvider for Tz {
    fn name(&self) -> &str {
        Tz::name(*self)
    }

    fn offset_at(&self, instant: DateTime<Utc>) -> ZoneOffset {
        let offset = self.offset_from_utc_datetime(&instant.naive_utc());
        ZoneOffset {
            seconds_east: offset.fix().local_minus_utc(),
            observes_dst: !offset.dst_offset().is_zero(),
        }
    }

    fn resolve_local(&self, local: NaiveDateTime) -> LocalResolution {
        match self.from_local_datetime(&local) {
            LocalResult::Single(dt) => LocalResolution {
                instant: dt.with_timezone(&Utc),
                kind: ResolutionKind::Unique,
            },
            LocalResult::Ambiguous(earliest, _) => LocalResolution {
                instant: earliest.with_timezone(&Utc),
                kind: ResolutionKind::Ambiguous,
            },
            LocalResult::None => {
                let offset = offset_before_gap(self, local);
                LocalResolution {
                    instant: Utc.from_utc_datetime(&(local - Duration::seconds(offset.into()))),
                    kind: ResolutionKind::Skipped,
                }
            }
        }
    }
}

fn offset_before_gap(tz: &Tz, local: NaiveDateTime) -> i32 {
    (1..=GAP_PROBE_STEPS)
        .find_map(|step| {
            let probe = local - Duration::minutes(GAP_PROBE_MINUTES * step);
            tz.from_local_datetime(&probe)
                .earliest()
                .map(|dt| dt.offset().fix().local_minus_utc())
        })
        .unwrap_or_else(|| {
            tracing::warn!("no offset found before gap at {} in {}", local, tz.name());
            tz.offset_from_utc_datetime(&local).fix().local_minus_utc()
        })
}
