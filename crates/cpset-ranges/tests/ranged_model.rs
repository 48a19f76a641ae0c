use cpset_core::{CodePointRange, RangeAccumulator, Subset};
use cpset_ranges::{RangedSubset, Ranges};
use cpset_test_utils::compliance;
use cpset_test_utils::model::{apply, arb_ops, probe_points, sequential_contains, Op};
use cpset_test_utils::tables::{table_contains, MIXED_SCRIPTS};
use proptest::prelude::*;

#[test]
fn lowercase_range_excludes_uppercase() {
    let mut acc = Ranges::new();
    acc.add_range('a' as u32, 'z' as u32);
    let s = acc.finish();
    assert!(s.contains_char('m'));
    assert!(!s.contains_char('A'));
}

#[test]
fn removal_inside_latin_uppercase() {
    let mut acc = Ranges::new();
    acc.add_range(0x41, 0x5A);
    acc.remove_range(0x4B, 0x4D);
    let s = acc.finish();
    assert!(!s.contains(0x4C));
    assert!(s.contains(0x4A));
    assert!(s.contains(0x4E));
}

#[test]
fn adjacent_ranges_compact_to_one() {
    let mut acc = Ranges::new();
    acc.add_range(0x0, 0x2FF);
    acc.add_range(0x300, 0x3FF);
    acc.compact();
    let ranges: Vec<_> = acc.ranges().collect();
    assert_eq!(ranges, vec![CodePointRange::new(0x0, 0x3FF)]);
}

#[test]
fn mixed_scripts_table_matches_naive_lookup() {
    let s = RangedSubset::from_ranges(MIXED_SCRIPTS.iter().copied());
    compliance::run_full_compliance(&s);
    for &(from, to) in MIXED_SCRIPTS {
        for c in [from.saturating_sub(1), from, to, to + 1] {
            assert_eq!(s.contains(c), table_contains(MIXED_SCRIPTS, c), "{c:#X}");
        }
    }
}

#[test]
fn rebuilding_from_ranges_preserves_membership() {
    let s = RangedSubset::from_ranges(MIXED_SCRIPTS.iter().copied());
    let rebuilt = RangedSubset::from_ranges(s.ranges().map(<(u32, u32)>::from));
    assert_eq!(s, rebuilt);
}

#[test]
fn subtraction_leaves_outside_unchanged() {
    let ops = [Op::Add(0xF0, 0x1_0010), Op::Remove(0xFFFE, 0x1_0001)];
    let mut acc = Ranges::new();
    apply(&mut acc, &ops);
    let s = acc.finish();
    for c in probe_points(&ops) {
        assert_eq!(s.contains(c), sequential_contains(&ops, c), "{c:#X}");
    }
}

proptest! {
    #[test]
    fn contains_matches_model(ops in arb_ops()) {
        let mut acc = Ranges::new();
        apply(&mut acc, &ops);
        let s = acc.finish();
        for c in probe_points(&ops) {
            prop_assert_eq!(s.contains(c), sequential_contains(&ops, c), "{:#X}", c);
        }
        compliance::assert_ranges_minimal(&s);
        compliance::assert_contains_matches_ranges(&s);
    }

    #[test]
    fn compaction_twice_equals_once(ops in arb_ops()) {
        let mut acc = Ranges::new();
        apply(&mut acc, &ops);
        acc.compact();
        let once: Vec<_> = acc.ranges().collect();
        acc.compact();
        let twice: Vec<_> = acc.ranges().collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn round_trip_through_ranges(ops in arb_ops()) {
        let mut acc = Ranges::new();
        apply(&mut acc, &ops);
        let s = acc.finish();
        let mut again = Ranges::new();
        for r in s.ranges() {
            again.add_range(r.start(), r.end());
        }
        let rebuilt = again.finish();
        compliance::assert_agree_on(&s, &rebuilt, probe_points(&ops));
    }
}
