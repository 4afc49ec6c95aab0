// DST analysis tests against the bundled zone database and synthetic zones
//
// Real zones cover the common 02:00 transitions; the synthetic zone lets
// tests place a transition at an atypical hour where the hour-window policy
// is known to misfire.

use super::*;
use crate::error::TimeguardError;
use crate::zone::{LocalResolution, ZoneOffset};
use chrono::{NaiveDate, TimeZone, Utc};

const H: i32 = 3600;

/// Zone with a single transition from `before` to `after` at `switch`
struct SyntheticZone {
    before: i32,
    after: i32,
    switch: DateTime<Utc>,
}

impl ZoneOffsetProvider for SyntheticZone {
    fn name(&self) -> &str {
        "Test/Synthetic"
    }

    fn offset_at(&self, instant: DateTime<Utc>) -> ZoneOffset {
        let seconds_east = if instant < self.switch {
            self.before
        } else {
            self.after
        };
        ZoneOffset {
            seconds_east,
            observes_dst: seconds_east > self.before.min(self.after),
        }
    }

    fn resolve_local(&self, local: NaiveDateTime) -> LocalResolution {
        let as_utc = |offset: i32| Utc.from_utc_datetime(&(local - Duration::seconds(offset.into())));
        let early = Some(as_utc(self.before)).filter(|t| *t < self.switch);
        let late = Some(as_utc(self.after)).filter(|t| *t >= self.switch);
        match (early, late) {
            (Some(a), Some(_)) => LocalResolution {
                instant: a,
                kind: ResolutionKind::Ambiguous,
            },
            (Some(t), None) | (None, Some(t)) => LocalResolution {
                instant: t,
                kind: ResolutionKind::Unique,
            },
            (None, None) => LocalResolution {
                instant: as_utc(self.before),
                kind: ResolutionKind::Skipped,
            },
        }
    }
}

fn local(s: &str) -> NaiveDateTime {
    crate::datetime::parse_local_datetime(s).unwrap()
}

fn assert_flag_invariants(info: &DstInfo) {
    assert!(!(info.ambiguous && info.nonexistent));
    if info.ambiguous {
        assert_eq!(info.transition, DstTransitionType::Overlap);
    }
    if info.nonexistent {
        assert_eq!(info.transition, DstTransitionType::Gap);
    }
}

#[test]
fn test_stable_summer_time() {
    let info = analyze_dst("2024-07-01 12:00", "America/New_York").unwrap();
    assert_eq!(info.transition, DstTransitionType::None);
    assert_eq!(info.pre_offset, -4 * H);
    assert_eq!(info.offset, -4 * H);
    assert_eq!(info.post_offset, -4 * H);
    assert!(!info.ambiguous);
    assert!(!info.nonexistent);
    assert_eq!(info.resolution, ResolutionKind::Unique);
}

#[test]
fn test_zone_without_dst_is_always_stable() {
    for dt in ["2024-03-10 02:15", "2024-11-03 01:30", "2024-03-31T02:30"] {
        let info = analyze_dst(dt, "Asia/Kolkata").unwrap();
        assert_eq!(info.transition, DstTransitionType::None);
        assert!(info.offsets().is_stable());
        assert_eq!(info.offset, 5 * H + 1800);
    }
}

#[test]
fn test_spring_forward_inside_gap() {
    let info = analyze_dst("2024-03-10 02:15", "America/New_York").unwrap();
    assert_eq!(info.transition, DstTransitionType::Gap);
    assert_eq!(info.offsets(), OffsetTriple::new(-5 * H, -4 * H, -4 * H));
    assert!(info.nonexistent);
    assert!(!info.ambiguous);
    assert_eq!(info.resolution, ResolutionKind::Skipped);
    assert_eq!(info.parsed.to_rfc3339(), "2024-03-10T03:15:00-04:00");
}

#[test]
fn test_spring_forward_approaching_gap() {
    let info = analyze_dst("2024-03-10T01:45", "America/New_York").unwrap();
    assert_eq!(info.transition, DstTransitionType::Gap);
    assert_eq!(info.offsets(), OffsetTriple::new(-5 * H, -5 * H, -4 * H));
    // 01:45 exists; the hour window (02, 03) does not flag it
    assert!(!info.nonexistent);
    assert_eq!(info.resolution, ResolutionKind::Unique);
}

#[test]
fn test_fall_back_ambiguous_hour() {
    let info = analyze_dst("2024-11-03 01:30", "America/New_York").unwrap();
    assert_eq!(info.transition, DstTransitionType::Overlap);
    assert_eq!(info.offsets(), OffsetTriple::new(-4 * H, -4 * H, -5 * H));
    assert!(info.ambiguous);
    assert!(!info.nonexistent);
    assert_eq!(info.resolution, ResolutionKind::Ambiguous);
    assert_eq!(info.parsed.to_rfc3339(), "2024-11-03T01:30:00-04:00");
}

#[test]
fn test_check_dst_transition_shortcut() {
    assert_eq!(
        check_dst_transition("2024-11-03 01:30", "America/New_York").unwrap(),
        DstTransitionType::Overlap
    );
    assert_eq!(
        check_dst_transition("2024-01-10 09:00", "Europe/Berlin").unwrap(),
        DstTransitionType::None
    );
}

#[test]
fn test_unknown_zone_reported_before_parse() {
    match analyze_dst("garbage", "Nowhere/Atlantis") {
        Err(TimeguardError::UnknownZone(id)) => assert_eq!(id, "Nowhere/Atlantis"),
        other => panic!("expected UnknownZone, got {:?}", other),
    }
}

#[test]
fn test_invalid_datetime() {
    let err = analyze_dst("2024-03-10 02:30:00", "Europe/Berlin").unwrap_err();
    assert!(matches!(err, TimeguardError::Parse { .. }));
}

#[test]
fn test_midnight_transition_defeats_hour_window() {
    // Clocks jump from 00:00 to 01:00 local (UTC-3 -> UTC-2)
    let zone = SyntheticZone {
        before: -3 * H,
        after: -2 * H,
        switch: Utc.with_ymd_and_hms(2024, 10, 6, 3, 0, 0).unwrap(),
    };

    let hours =
        analyze_local(local("2024-10-06 00:15"), &zone, &HourWindowPolicy::default()).unwrap();
    assert_eq!(hours.transition, DstTransitionType::Gap);
    assert_eq!(hours.parsed.to_rfc3339(), "2024-10-06T01:15:00-02:00");
    assert!(!hours.nonexistent);

    let resolved = analyze_local(local("2024-10-06 00:15"), &zone, &ResolutionPolicy).unwrap();
    assert_eq!(resolved.transition, DstTransitionType::Gap);
    assert!(resolved.nonexistent);
}

#[test]
fn test_custom_hour_window_for_midnight_zone() {
    let zone = SyntheticZone {
        before: -3 * H,
        after: -2 * H,
        switch: Utc.with_ymd_and_hms(2024, 10, 6, 3, 0, 0).unwrap(),
    };
    let policy = HourWindowPolicy {
        gap_hours: vec![0, 1],
        overlap_hours: vec![23, 0],
    };
    let info = analyze_local(local("2024-10-06 00:15"), &zone, &policy).unwrap();
    assert!(info.nonexistent);
}

#[test]
fn test_synthetic_fall_back() {
    // 03:00 local (UTC+2) becomes 02:00 local (UTC+1)
    let zone = SyntheticZone {
        before: 2 * H,
        after: H,
        switch: Utc.with_ymd_and_hms(2024, 10, 27, 1, 0, 0).unwrap(),
    };
    let info =
        analyze_local(local("2024-10-27 02:30"), &zone, &HourWindowPolicy::default()).unwrap();
    assert_eq!(info.transition, DstTransitionType::Overlap);
    assert_eq!(info.resolution, ResolutionKind::Ambiguous);
    assert_eq!(info.offsets(), OffsetTriple::new(2 * H, 2 * H, H));
    assert!(info.ambiguous);
}

#[test]
fn test_flag_invariants_hold_across_a_transition_day() {
    let policies: [&dyn TransitionWindowPolicy; 2] =
        [&HourWindowPolicy::default(), &ResolutionPolicy];
    for zone in ["America/New_York", "Europe/Berlin", "Australia/Lord_Howe"] {
        for day in ["2024-03-10", "2024-03-31", "2024-10-06", "2024-11-03"] {
            for hour in 0..24 {
                for minute in [0, 15, 30, 45] {
                    let dt = format!("{} {:02}:{:02}", day, hour, minute);
                    for policy in policies {
                        let info = analyze_dst_with_policy(&dt, zone, policy).unwrap();
                        assert_flag_invariants(&info);
                    }
                }
            }
        }
    }
}

#[test]
fn test_describe_messages() {
    let gap = analyze_dst("2024-03-10 02:15", "America/New_York").unwrap();
    assert!(gap.describe().contains("does not exist"));

    let overlap = analyze_dst("2024-11-03 01:30", "America/New_York").unwrap();
    assert!(overlap.describe().contains("ambiguous"));

    let stable = analyze_dst("2024-07-01 12:00", "America/New_York").unwrap();
    assert!(stable.describe().contains("stable"));
}

#[test]
fn test_extended_years_are_parse_errors() {
    for input in ["+262142-12-31 23:45", "-0044-03-15 12:00"] {
        match analyze_dst(input, "UTC") {
            Err(TimeguardError::Parse { input: got, .. }) => assert_eq!(got, input),
            other => panic!("expected parse error for {}, got {:?}", input, other),
        }
    }
}

#[test]
fn test_window_past_chrono_range_is_an_error() {
    let zone = SyntheticZone {
        before: 0,
        after: 0,
        switch: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    };
    let edge = NaiveDate::MAX.and_hms_opt(23, 45, 0).unwrap();

    match analyze_local(edge, &zone, &HourWindowPolicy::default()) {
        Err(TimeguardError::Parse { attempts, .. }) => {
            assert!(attempts[0].contains("t+30m is out of range"))
        }
        other => panic!("expected out-of-range parse error, got {:?}", other),
    }
}
