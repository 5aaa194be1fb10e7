//! Pairwise interval overlap with a selectable boundary policy.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How two intervals that merely touch are treated.
///
/// * `Strict`: `max(startA, startB) < min(endA, endB)`. Intervals sharing
///   only an endpoint do not overlap.
/// * `TouchInclusive`: additionally counts `endA == startB` as overlapping.
///   Callers pass the slot as A and the shift as B, so a slot whose end
///   meets the shift's start is drawn as part of the shift. The slot that
///   starts where the shift ends stays off under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    #[default]
    Strict,
    TouchInclusive,
}

impl OverlapPolicy {
    pub fn overlaps(self, start_a: f64, end_a: f64, start_b: f64, end_b: f64) -> bool {
        let strict = start_a.max(start_b) < end_a.min(end_b);
        match self {
            OverlapPolicy::Strict => strict,
            OverlapPolicy::TouchInclusive => strict || end_a == start_b,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OverlapPolicy::Strict => "strict",
            OverlapPolicy::TouchInclusive => "touch_inclusive",
        }
    }
}

/// Overlap under the default (strict) policy.
pub fn overlaps(start_a: f64, end_a: f64, start_b: f64, end_b: f64) -> bool {
    OverlapPolicy::default().overlaps(start_a, end_a, start_b, end_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_is_the_default() {
        assert_eq!(OverlapPolicy::default(), OverlapPolicy::Strict);
    }

    #[test]
    fn strict_ignores_touching_intervals() {
        // slot right after a 10:00-11:00 shift
        assert!(!OverlapPolicy::Strict.overlaps(11.0, 11.5, 10.0, 11.0));
        // slot right before it
        assert!(!OverlapPolicy::Strict.overlaps(9.5, 10.0, 10.0, 11.0));
        // last slot inside the shift
        assert!(OverlapPolicy::Strict.overlaps(10.5, 11.0, 10.0, 11.0));
    }

    #[test]
    fn touch_inclusive_counts_slot_end_meeting_shift_start() {
        assert!(OverlapPolicy::TouchInclusive.overlaps(9.5, 10.0, 10.0, 11.0));
        assert!(OverlapPolicy::TouchInclusive.overlaps(10.5, 11.0, 10.0, 11.0));
        // one-sided: the slot starting at the shift's end is still disjoint
        assert!(!OverlapPolicy::TouchInclusive.overlaps(11.0, 11.5, 10.0, 11.0));
    }

    #[test]
    fn partial_and_containing_overlaps() {
        assert!(overlaps(10.0, 12.0, 11.5, 12.5));
        assert!(overlaps(10.0, 23.0, 15.0, 15.5));
        assert!(!overlaps(12.0, 13.0, 14.0, 14.5));
    }
}
