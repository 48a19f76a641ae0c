//! Reference model for property tests.
//!
//! An [`Op`] list is the ground truth; encodings are checked against it at
//! probe points chosen around every bound, tier edge and block edge the
//! operations touch.

use cpset_core::{RangeAccumulator, MAX_CODE_POINT};
use proptest::prelude::*;

/// A single edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Add `[a, b]` (bounds in either order).
    Add(u32, u32),
    /// Remove `[a, b]` (bounds in either order).
    Remove(u32, u32),
}

impl Op {
    fn bounds(self) -> (u32, u32) {
        let (a, b) = match self {
            Op::Add(a, b) | Op::Remove(a, b) => (a, b),
        };
        (a.min(b), a.max(b))
    }

    fn covers(self, c: u32) -> bool {
        let (lo, hi) = self.bounds();
        lo <= c && c <= hi
    }
}

/// Membership when ops apply in order (accumulator semantics).
pub fn sequential_contains(ops: &[Op], c: u32) -> bool {
    ops.iter()
        .rev()
        .find(|op| op.covers(c))
        .is_some_and(|op| matches!(op, Op::Add(..)))
}

/// Membership when every removal applies after every addition
/// (builder semantics: includes minus excludes).
pub fn net_contains(ops: &[Op], c: u32) -> bool {
    let mut added = false;
    for op in ops {
        match op {
            Op::Add(..) if op.covers(c) => added = true,
            Op::Remove(..) if op.covers(c) => return false,
            _ => {}
        }
    }
    added
}

/// Apply ops to an accumulator in order.
pub fn apply<A: RangeAccumulator>(acc: &mut A, ops: &[Op]) {
    for op in ops {
        match *op {
            Op::Add(a, b) => acc.add_range(a, b),
            Op::Remove(a, b) => acc.remove_range(a, b),
        }
    }
}

/// Code points worth probing for a list of ops.
///
/// Each bound and its neighbours, the edges of the blocks holding each
/// bound, and the fixed tier edges. Sorted and deduplicated.
pub fn probe_points(ops: &[Op]) -> Vec<u32> {
    let mut points = vec![0, 0xFF, 0x100, 0xFFFF, 0x1_0000, MAX_CODE_POINT];
    for op in ops {
        let (lo, hi) = op.bounds();
        for c in [lo, hi] {
            points.extend([c.saturating_sub(1), c, c.saturating_add(1)]);
            points.extend([c & !0xFF, c | 0xFF]);
        }
    }
    points.retain(|&c| c <= MAX_CODE_POINT);
    points.sort_unstable();
    points.dedup();
    points
}

/// Code points biased toward tier and block boundaries.
pub fn arb_code_point() -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => 0u32..=0x3FF,
        2 => 0xFE00u32..=0x1_01FF,
        2 => (0u32..=0x10FF, 0u32..=3).prop_map(|(key, edge)| match edge {
            0 => key << 8,
            1 => (key << 8) | 0xFF,
            2 => (key << 8) | 0x80,
            _ => ((key << 8) | 0xFF).saturating_add(1).min(MAX_CODE_POINT),
        }),
        1 => 0u32..=MAX_CODE_POINT,
    ]
}

/// A range given as `(from, to)`, sometimes reversed.
pub fn arb_range() -> impl Strategy<Value = (u32, u32)> {
    (arb_code_point(), 0u32..0x400, any::<bool>()).prop_map(|(start, len, reversed)| {
        let end = start.saturating_add(len).min(MAX_CODE_POINT);
        if reversed {
            (end, start)
        } else {
            (start, end)
        }
    })
}

/// An add (three times as likely) or a remove.
pub fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => arb_range().prop_map(|(a, b)| Op::Add(a, b)),
        1 => arb_range().prop_map(|(a, b)| Op::Remove(a, b)),
    ]
}

/// A short list of edits.
pub fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(arb_op(), 0..24)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_later_op_wins() {
        let ops = [Op::Add(10, 20), Op::Remove(15, 15), Op::Add(15, 15)];
        assert!(sequential_contains(&ops, 15));
        assert!(!net_contains(&ops, 15));
    }

    #[test]
    fn reversed_bounds_are_normalized() {
        let ops = [Op::Add(20, 10)];
        assert!(sequential_contains(&ops, 12));
        assert!(net_contains(&ops, 12));
    }

    #[test]
    fn probe_points_include_block_edges() {
        let points = probe_points(&[Op::Add(0x4150, 0x4150)]);
        for c in [0x4100, 0x414F, 0x4150, 0x4151, 0x41FF] {
            assert!(points.contains(&c), "{c:#X}");
        }
    }
}
