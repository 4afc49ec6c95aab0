//! Property-based tests for the timeguard core
//!
//! Covers:
//! 1. DST offset-triple classification
//! 2. Smear curve shape
//! 3. Log line validation and timestamp extraction

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};
use proptest::prelude::*;
use timeguard::dst::{classify, DstTransitionType, OffsetTriple};
use timeguard::smear::{smear_curve, SmearMethod, MAX_SMEAR_SECONDS};
use timeguard::validate::{extract_timestamp, normalize_offset, validate_line, IssueKind};

fn offset_seconds() -> impl Strategy<Value = i32> {
    // Real offsets sit on 15 minute boundaries within ±14h
    (-56i32..=56).prop_map(|q| q * 900)
}

fn cursor() -> impl Strategy<Value = DateTime<FixedOffset>> {
    (0i64..2_000_000_000, -48i32..=56).prop_map(|(secs, q)| {
        FixedOffset::east_opt(q * 900)
            .unwrap()
            .timestamp_opt(secs, 0)
            .unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_classify_is_none_only_when_stable(
        pre in offset_seconds(),
        at in offset_seconds(),
        post in offset_seconds(),
    ) {
        let triple = OffsetTriple::new(pre, at, post);
        let result = classify(triple);

        prop_assert_eq!(result.transition == DstTransitionType::None, triple.is_stable());
        if result.transition == DstTransitionType::None {
            prop_assert!(!result.window_applies);
        }
    }

    #[test]
    fn prop_classify_direction_matches_net_change(
        pre in offset_seconds(),
        post in offset_seconds(),
    ) {
        prop_assume!(pre != post);
        // at == pre: change happens after the instant
        let result = classify(OffsetTriple::new(pre, pre, post));
        let expected = if post > pre {
            DstTransitionType::Gap
        } else {
            DstTransitionType::Overlap
        };
        prop_assert_eq!(result.transition, expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_smear_curve_shape(days in 0i64..40_000) {
        let day = NaiveDate::from_ymd_opt(1972, 1, 1).unwrap() + Duration::days(days);
        let points = smear_curve(day, SmearMethod::Google).unwrap();

        prop_assert_eq!(points.len(), 24);
        prop_assert_eq!(points[0].offset_seconds, -MAX_SMEAR_SECONDS);
        for w in points.windows(2) {
            prop_assert!(w[0].offset_seconds < w[1].offset_seconds);
            prop_assert!(w[0].adjusted < w[1].adjusted);
        }
        prop_assert!(points.iter().all(|p| p.offset_seconds.abs() <= MAX_SMEAR_SECONDS));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_extract_and_normalize_never_panic(line in "\\PC{0,120}") {
        if let Some(raw) = extract_timestamp(&line) {
            prop_assert!(line.contains(raw));
            let normalized = normalize_offset(raw);
            prop_assert!(normalized.len() == raw.len() || normalized.len() == raw.len() + 1);
        }
    }

    #[test]
    fn prop_timestamp_free_lines_keep_cursor(
        line in "[a-zA-Z =,.]{0,80}",
        previous in prop::option::of(cursor()),
    ) {
        let result = validate_line(&line, previous);
        prop_assert!(!result.has_timestamp);
        prop_assert!(result.issues.is_empty());
        prop_assert_eq!(result.cursor, previous);
    }

    #[test]
    fn prop_validate_line_is_pure(
        line in "\\PC{0,120}",
        previous in prop::option::of(cursor()),
    ) {
        let first = validate_line(&line, previous);
        let second = validate_line(&line, previous);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_parse_error_is_exclusive(
        line in "[0-9TZ:+ -]{0,60}",
        previous in prop::option::of(cursor()),
    ) {
        let result = validate_line(&line, previous);
        if result.issues.contains(&IssueKind::ParseError) {
            prop_assert_eq!(result.issues.len(), 1);
            prop_assert_eq!(result.cursor, previous);
            prop_assert!(result.parse_failure.is_some());
        }
    }

    #[test]
    fn prop_regression_respects_tolerance(
        start in cursor(),
        back_secs in 0i64..3_600,
    ) {
        let line = (start - Duration::seconds(back_secs))
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        let line = format!("{} zone=test", line);
        let result = validate_line(&line, Some(start));

        prop_assert_eq!(
            result.issues.contains(&IssueKind::TimeRegression),
            back_secs > 300
        );
        prop_assert!(result.cursor.is_some());
    }
}
