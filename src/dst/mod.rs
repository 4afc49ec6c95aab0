// DST transition analysis for local wall-clock times
//
// A local timestamp is resolved in its zone, the UTC offset is sampled
// 30 minutes either side of the resulting instant, and the offset triple
// is classified as stable, a forward gap or a backward overlap.
//
// The ambiguous/nonexistent flags come from a pluggable
// `TransitionWindowPolicy`. The default hour-window policy is best effort:
// it is not derived from the zone's actual transition instant.

mod classify;
mod policy;

pub use classify::{classify, Classification, DstTransitionType, OffsetTriple};
pub use policy::{HourWindowPolicy, ResolutionPolicy, TransitionContext, TransitionWindowPolicy};

use crate::datetime::{out_of_range, parse_local_datetime};
use crate::error::Result;
use crate::zone::{resolve_zone, ResolutionKind, ZoneOffsetProvider};
use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Timelike};

/// Distance either side of the analyzed instant at which offsets are sampled
pub const SAMPLE_WINDOW_MINUTES: i64 = 30;

/// Result of analyzing one local timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DstInfo {
    pub transition: DstTransitionType,
    /// Offset at t-30m, seconds east of UTC
    pub pre_offset: i32,
    /// Offset at t
    pub offset: i32,
    /// Offset at t+30m
    pub post_offset: i32,
    /// Local time could map to two instants (only set for Overlap)
    pub ambiguous: bool,
    /// Local time falls in a forward gap (only set for Gap)
    pub nonexistent: bool,
    /// Resolved instant, expressed in the zone's offset
    pub parsed: DateTime<FixedOffset>,
    /// How the zone database mapped the wall-clock input
    pub resolution: ResolutionKind,
}

impl DstInfo {
    pub fn offsets(&self) -> OffsetTriple {
        OffsetTriple::new(self.pre_offset, self.offset, self.post_offset)
    }

    /// One-line explanation used by the `dst-check` command
    pub fn describe(&self) -> &'static str {
        match (self.transition, self.nonexistent, self.ambiguous) {
            (DstTransitionType::None, _, _) => "No DST transition within ±30m; time is stable",
            (DstTransitionType::Gap, true, _) => {
                "Gap transition: this local time does not exist (clocks jumped forward)"
            }
            (DstTransitionType::Gap, false, _) => {
                "Gap transition: time is near a forward DST jump (some local times may not exist)"
            }
            (DstTransitionType::Overlap, _, true) => {
                "Overlap: clocks rolled back; this local time is ambiguous"
            }
            (DstTransitionType::Overlap, _, false) => {
                "Overlap: time is near a backward DST jump (some local times repeat)"
            }
        }
    }
}

/// Analyze `datetime` (`YYYY-MM-DD HH:MM` or `YYYY-MM-DDTHH:MM`) in the IANA zone `zone`
/// using the default hour-window policy
pub fn analyze_dst(datetime: &str, zone: &str) -> Result<DstInfo> {
    analyze_dst_with_policy(datetime, zone, &HourWindowPolicy::default())
}

/// Analyze with an explicit transition-window policy
pub fn analyze_dst_with_policy(
    datetime: &str,
    zone: &str,
    policy: &dyn TransitionWindowPolicy,
) -> Result<DstInfo> {
    let tz = resolve_zone(zone)?;
    let local = parse_local_datetime(datetime)?;
    analyze_local(local, &tz, policy)
}

/// Only the transition type, for callers that do not need the details
pub fn check_dst_transition(datetime: &str, zone: &str) -> Result<DstTransitionType> {
    analyze_dst(datetime, zone).map(|info| info.transition)
}

/// Analyze an already-parsed wall-clock time against any offset provider
///
/// Fails with a parse error when the sampling window leaves chrono's range.
pub fn analyze_local<Z>(
    local: NaiveDateTime,
    zone: &Z,
    policy: &dyn TransitionWindowPolicy,
) -> Result<DstInfo>
where
    Z: ZoneOffsetProvider + ?Sized,
{
    let resolved = zone.resolve_local(local);
    let t = resolved.instant;
    let window = Duration::minutes(SAMPLE_WINDOW_MINUTES);

    let before = t
        .checked_sub_signed(window)
        .ok_or_else(|| out_of_range(local, "t-30m"))?;
    let after = t
        .checked_add_signed(window)
        .ok_or_else(|| out_of_range(local, "t+30m"))?;

    let offsets = OffsetTriple::new(
        zone.offset_at(before).seconds_east,
        zone.offset_at(t).seconds_east,
        zone.offset_at(after).seconds_east,
    );
    let parsed = zone.localize(t);
    let classification = classify(offsets);

    let ctx = TransitionContext {
        local_hour: parsed.hour(),
        offsets,
        resolution: resolved.kind,
    };
    let nonexistent = classification.transition == DstTransitionType::Gap
        && classification.window_applies
        && policy.is_nonexistent(&ctx);
    let ambiguous = classification.transition == DstTransitionType::Overlap
        && classification.window_applies
        && policy.is_ambiguous(&ctx);

    tracing::debug!(
        zone = zone.name(),
        local = %local,
        pre = offsets.pre,
        at = offsets.at,
        post = offsets.post,
        transition = %classification.transition,
        "analyzed local time"
    );

    Ok(DstInfo {
        transition: classification.transition,
        pre_offset: offsets.pre,
        offset: offsets.at,
        post_offset: offsets.post,
        ambiguous,
        nonexistent,
        parsed,
        resolution: resolved.kind,
    })
}

#[cfg(test)]
mod tests;
