use cpset_block::{BlockRanges, BlockSubset};
use cpset_core::{RangeAccumulator, Subset};
use cpset_ranges::Ranges;
use cpset_test_utils::compliance;
use cpset_test_utils::model::{apply, arb_ops, probe_points, sequential_contains};
use cpset_test_utils::tables::MIXED_SCRIPTS;
use proptest::prelude::*;

#[test]
fn range_spanning_two_blocks() {
    let mut acc = BlockRanges::new();
    acc.add_range(0x4100, 0x41FF);
    acc.add_range(0x4200, 0x42FF);
    let s = acc.finish();
    assert!(s.contains(0x41FF));
    assert!(!s.contains(0x4300));
    assert_eq!(s.keys(), &[0x41, 0x42]);
}

#[test]
fn agrees_with_ranged_on_script_table() {
    let block = BlockSubset::from_ranges(MIXED_SCRIPTS.iter().copied());
    let mut ranged = Ranges::new();
    for &(from, to) in MIXED_SCRIPTS {
        ranged.add_range(from, to);
    }
    let ranged = ranged.finish();
    compliance::assert_agree_on(&block, &ranged, 0..=0x2_0000);
    assert_eq!(
        block.ranges().collect::<Vec<_>>(),
        ranged.ranges().collect::<Vec<_>>()
    );
}

proptest! {
    #[test]
    fn contains_matches_model(ops in arb_ops()) {
        let mut acc = BlockRanges::new();
        apply(&mut acc, &ops);
        let s = acc.finish();
        for c in probe_points(&ops) {
            prop_assert_eq!(s.contains(c), sequential_contains(&ops, c), "{:#X}", c);
        }
        compliance::assert_ranges_minimal(&s);
        compliance::assert_is_empty_consistent(&s);
    }

    #[test]
    fn same_ranges_as_flat_encoding(ops in arb_ops()) {
        let mut block = BlockRanges::new();
        let mut flat = Ranges::new();
        apply(&mut block, &ops);
        apply(&mut flat, &ops);
        let (block, flat) = (block.finish(), flat.finish());
        prop_assert_eq!(
            block.ranges().collect::<Vec<_>>(),
            flat.ranges().collect::<Vec<_>>()
        );
    }
}
