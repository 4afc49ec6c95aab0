// Offset-triple classification
//
// Every (pre, at, post) combination maps to exactly one transition type via
// the table in `classify`. Rows that describe a clean spring-forward or
// fall-back edge also consult the transition-window policy; the remaining
// rows (offset dropping into a stable plateau, three distinct offsets) are
// classified by direction only.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Kind of civil-time discontinuity near a local timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DstTransitionType {
    /// Offset is stable across the window
    None,
    /// Forward jump: some local times do not exist
    Gap,
    /// Backward jump: some local times occur twice
    Overlap,
}

impl fmt::Display for DstTransitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DstTransitionType::None => "none",
            DstTransitionType::Gap => "gap",
            DstTransitionType::Overlap => "overlap",
        };
        f.write_str(name)
    }
}

/// Offsets (seconds east of UTC) sampled at t-30m, t and t+30m
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetTriple {
    pub pre: i32,
    pub at: i32,
    pub post: i32,
}

impl OffsetTriple {
    pub fn new(pre: i32, at: i32, post: i32) -> Self {
        Self { pre, at, post }
    }

    pub fn is_stable(&self) -> bool {
        self.pre == self.at && self.at == self.post
    }
}

/// Outcome of classifying one offset triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub transition: DstTransitionType,
    /// Whether the transition-window policy decides the ambiguous/nonexistent flag
    pub window_applies: bool,
}

impl Classification {
    fn new(transition: DstTransitionType, window_applies: bool) -> Self {
        Self {
            transition,
            window_applies,
        }
    }
}

/// Classify an offset triple
///
/// | pre vs at | at vs post | pre vs post | result           |
/// |-----------|------------|-------------|------------------|
/// | =         | =          |             | None             |
/// | <         | =          |             | Gap (window)     |
/// | =         | <          |             | Gap (window)     |
/// | >         | =          |             | Gap              |
/// | =         | >          |             | Overlap (window) |
/// | <         | >          | =           | Overlap (window) |
/// | >         | <          | =           | Overlap (window) |
/// | distinct  | distinct   | pre < post  | Gap              |
/// | distinct  | distinct   | pre > post  | Overlap          |
pub fn classify(offsets: OffsetTriple) -> Classification {
    use DstTransitionType::{Gap, None, Overlap};
    use Ordering::{Equal, Greater, Less};

    let OffsetTriple { pre, at, post } = offsets;
    match (pre.cmp(&at), at.cmp(&post), pre.cmp(&post)) {
        (Equal, Equal, _) => Classification::new(None, false),
        (Less, Equal, _) | (Equal, Less, _) => Classification::new(Gap, true),
        (Greater, Equal, _) => Classification::new(Gap, false),
        (Equal, Greater, _) => Classification::new(Overlap, true),
        (Less, Greater, Equal) | (Greater, Less, Equal) => Classification::new(Overlap, true),
        (_, _, Less) => Classification::new(Gap, false),
        (_, _, Equal | Greater) => Classification::new(Overlap, false),
    }
}
