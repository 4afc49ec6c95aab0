//! Zone conversion and current-time reporting
//!
//! Wall-clock inputs are resolved with the same layouts and local-time
//! convention as the DST classifier.

use crate::datetime::parse_local_datetime;
use crate::error::{Result, TimeguardError};
use crate::zone::{resolve_zone, ResolutionKind, ZoneOffset, ZoneOffsetProvider};
use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use std::fmt;

/// A wall-clock time re-expressed in another zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub source: DateTime<FixedOffset>,
    pub source_zone: String,
    pub target: DateTime<FixedOffset>,
    pub target_zone: String,
    pub resolution: ResolutionKind,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) -> {} ({})",
            self.source.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.source_zone,
            self.target.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.target_zone
        )
    }
}

/// Interpret `datetime` in zone `from` and express the same instant in zone `to`
pub fn convert(datetime: &str, from: &str, to: &str) -> Result<Conversion> {
    if from.is_empty() {
        return Err(TimeguardError::MissingArgument("--from"));
    }
    if to.is_empty() {
        return Err(TimeguardError::MissingArgument("--to"));
    }
    let src = resolve_zone(from)?;
    let dst = resolve_zone(to)?;
    let local = parse_local_datetime(datetime)?;

    let resolved = src.resolve_local(local);
    if resolved.kind != ResolutionKind::Unique {
        tracing::warn!(
            %local,
            zone = from,
            resolution = ?resolved.kind,
            "local time is not unique in source zone"
        );
    }

    Ok(Conversion {
        source: src.localize(resolved.instant),
        source_zone: from.to_string(),
        target: dst.localize(resolved.instant),
        target_zone: to.to_string(),
        resolution: resolved.kind,
    })
}

/// A zone's local time and offset at one instant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSnapshot {
    pub local: DateTime<FixedOffset>,
    pub offset: ZoneOffset,
}

impl fmt::Display for ZoneSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) DST={}",
            self.local.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.offset.to_utc_label(),
            self.offset.observes_dst
        )
    }
}

/// Snapshot of `zone` at `instant`
pub fn snapshot_at<Z>(zone: &Z, instant: DateTime<Utc>) -> ZoneSnapshot
where
    Z: ZoneOffsetProvider + ?Sized,
{
    ZoneSnapshot {
        local: zone.localize(instant),
        offset: zone.offset_at(instant),
    }
}

/// Current time in the IANA zone `zone`
pub fn now_in(zone: &str) -> Result<ZoneSnapshot> {
    if zone.is_empty() {
        return Err(TimeguardError::MissingArgument("--zone"));
    }
    let tz = resolve_zone(zone)?;
    Ok(snapshot_at(&tz, Utc::now()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_convert_between_zones() {
        let c = convert("2024-07-01 09:00", "America/New_York", "Asia/Tokyo").unwrap();
        assert_eq!(
            c.to_string(),
            "2024-07-01T09:00:00-04:00 (America/New_York) -> 2024-07-01T22:00:00+09:00 (Asia/Tokyo)"
        );
        assert_eq!(c.resolution, ResolutionKind::Unique);
    }

    #[test]
    fn test_convert_t_layout_to_utc() {
        let c = convert("2024-01-15T12:30", "Europe/Berlin", "UTC").unwrap();
        assert_eq!(c.target.to_rfc3339(), "2024-01-15T11:30:00+00:00");
    }

    #[test]
    fn test_convert_reports_skipped_input() {
        let c = convert("2024-03-10 02:15", "America/New_York", "UTC").unwrap();
        assert_eq!(c.resolution, ResolutionKind::Skipped);
        assert_eq!(c.target.to_rfc3339(), "2024-03-10T07:15:00+00:00");
    }

    #[test]
    fn test_convert_requires_zones() {
        assert!(matches!(
            convert("2024-01-01 00:00", "", "UTC"),
            Err(TimeguardError::MissingArgument("--from"))
        ));
        assert!(matches!(
            convert("2024-01-01 00:00", "UTC", ""),
            Err(TimeguardError::MissingArgument("--to"))
        ));
    }

    #[test]
    fn test_convert_unknown_zone() {
        let err = convert("2024-01-01 00:00", "UTC", "Moon/Base").unwrap_err();
        assert!(matches!(err, TimeguardError::UnknownZone(ref z) if z == "Moon/Base"));
    }

    #[test]
    fn test_snapshot_format() {
        let tz = resolve_zone("Australia/Adelaide").unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let snap = snapshot_at(&tz, instant);
        assert_eq!(
            snap.to_string(),
            "2024-01-15T10:30:00+10:30 (UTC+10:30) DST=true"
        );
    }

    #[test]
    fn test_now_requires_known_zone() {
        assert!(now_in("Europe/Paris").is_ok());
        assert!(matches!(now_in(""), Err(TimeguardError::MissingArgument(_))));
        assert!(matches!(now_in("Europe/Atlantis"), Err(TimeguardError::UnknownZone(_))));
    }
}
