// Transition-window policies
//
// Decide whether a timestamp classified as Gap/Overlap actually lies inside
// the skipped or repeated block. `HourWindowPolicy` is a best-effort proxy
// that assumes transitions happen around 02:00 local and will misfire for
// zones that switch at other hours. `ResolutionPolicy` asks the zone
// database how the wall-clock input resolved instead.

use super::classify::OffsetTriple;
use crate::zone::ResolutionKind;

/// Everything a policy may inspect about one analyzed timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionContext {
    /// Hour of day of the resolved instant, in the zone's local time
    pub local_hour: u32,
    pub offsets: OffsetTriple,
    /// How the zone mapped the wall-clock input
    pub resolution: ResolutionKind,
}

/// Predicate deciding the `nonexistent` / `ambiguous` flags
pub trait TransitionWindowPolicy {
    /// Called only for Gap classifications
    fn is_nonexistent(&self, ctx: &TransitionContext) -> bool;

    /// Called only for Overlap classifications
    fn is_ambiguous(&self, ctx: &TransitionContext) -> bool;
}

/// Flags timestamps whose local hour falls in a fixed set of hours
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourWindowPolicy {
    pub gap_hours: Vec<u32>,
    pub overlap_hours: Vec<u32>,
}

impl Default for HourWindowPolicy {
    fn default() -> Self {
        Self {
            gap_hours: vec![2, 3],     // spring-forward lands in 02:xx/03:xx
            overlap_hours: vec![1, 2], // fall-back repeats 01:xx
        }
    }
}

impl TransitionWindowPolicy for HourWindowPolicy {
    fn is_nonexistent(&self, ctx: &TransitionContext) -> bool {
        self.gap_hours.contains(&ctx.local_hour)
    }

    fn is_ambiguous(&self, ctx: &TransitionContext) -> bool {
        self.overlap_hours.contains(&ctx.local_hour)
    }
}

/// Trusts the zone database's own resolution of the input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionPolicy;

impl TransitionWindowPolicy for ResolutionPolicy {
    fn is_nonexistent(&self, ctx: &TransitionContext) -> bool {
        ctx.resolution == ResolutionKind::Skipped
    }

    fn is_ambiguous(&self, ctx: &TransitionContext) -> bool {
        ctx.resolution == ResolutionKind::Ambiguous
    }
}
