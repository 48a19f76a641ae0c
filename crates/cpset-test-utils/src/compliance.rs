//! Subset trait compliance helpers.
//!
//! These functions verify that a `Subset` implementation satisfies the
//! invariants required by the trait contract. Reused across every encoding's
//! test module.

use cpset_core::{CodePointRange, Subset, MAX_CODE_POINT};
use indexmap::IndexSet;

/// Assert that `ranges()` is ascending, disjoint and non-adjacent.
pub fn assert_ranges_minimal(subset: &dyn Subset) {
    let ranges: Vec<CodePointRange> = subset.ranges().collect();
    for pair in ranges.windows(2) {
        assert!(
            pair[0].end() + 1 < pair[1].start(),
            "ranges not minimal: {:?} then {:?}",
            pair[0],
            pair[1]
        );
    }
}

/// Assert that two calls to `ranges()` yield the same sequence.
pub fn assert_ranges_restartable(subset: &dyn Subset) {
    let a: Vec<_> = subset.ranges().collect();
    let b: Vec<_> = subset.ranges().collect();
    assert_eq!(a, b, "ranges() is not restartable");
    let unique: IndexSet<_> = a.iter().collect();
    assert_eq!(unique.len(), a.len(), "ranges() yields duplicates");
}

/// Assert that every range bound is a member and every gap edge is not.
///
/// Gap edges are skipped for subsets carrying categories, whose members
/// extend beyond the explicit ranges.
pub fn assert_contains_matches_ranges(subset: &dyn Subset) {
    let check_gaps = subset.categories().is_empty();
    for r in subset.ranges() {
        let mid = r.start() + (r.end() - r.start()) / 2;
        for c in [r.start(), mid, r.end()] {
            assert!(subset.contains(c), "{c:#X} in {r:?} not contained");
        }
        if check_gaps {
            if let Some(before) = r.start().checked_sub(1) {
                assert!(!subset.contains(before), "{before:#X} before {r:?} contained");
            }
            if r.end() < MAX_CODE_POINT {
                let after = r.end() + 1;
                assert!(!subset.contains(after), "{after:#X} after {r:?} contained");
            }
        }
    }
}

/// Assert that `is_empty()` agrees with the ranges and category mask.
pub fn assert_is_empty_consistent(subset: &dyn Subset) {
    let expect_empty = subset.ranges().next().is_none() && subset.categories().is_empty();
    assert_eq!(subset.is_empty(), expect_empty, "is_empty() disagrees");
    assert_eq!(subset.is_not_empty(), !expect_empty, "is_not_empty() disagrees");
}

/// Assert that `code_point_count()` equals the summed range lengths.
pub fn assert_code_point_count(subset: &dyn Subset) {
    let summed: u64 = subset.ranges().map(|r| u64::from(r.len())).sum();
    assert_eq!(subset.code_point_count(), summed);
}

/// Assert two subsets agree on every code point in `points`.
pub fn assert_agree_on(
    a: &dyn Subset,
    b: &dyn Subset,
    points: impl IntoIterator<Item = u32>,
) {
    for c in points {
        assert_eq!(
            a.contains(c),
            b.contains(c),
            "{} and {} disagree at {c:#X}",
            a.encoding(),
            b.encoding()
        );
    }
}

/// Assert two subsets agree on the entire code space `0x0..=0x10FFFF`.
pub fn assert_agree_everywhere(a: &dyn Subset, b: &dyn Subset) {
    assert_agree_on(a, b, 0..=MAX_CODE_POINT);
}

/// Run all compliance checks on a subset.
pub fn run_full_compliance(subset: &dyn Subset) {
    assert_ranges_minimal(subset);
    assert_ranges_restartable(subset);
    assert_contains_matches_ranges(subset);
    assert_is_empty_consistent(subset);
    assert_code_point_count(subset);
}
