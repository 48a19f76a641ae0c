//! Growable packed-range array, the unit every accumulator is built from.

use crate::codec::{is_minimal, PackedRange, RangeCursor};
use crate::range::MutableCodePointRange;

/// A growable array of packed ranges at one tier.
///
/// Unordered while a builder appends to it; [`compact`](Self::compact)
/// restores the sorted, disjoint, non-adjacent form that binary search
/// requires. Bounds are whatever the owner stores at this tier: absolute
/// code points for flat tiers, block offsets for block arrays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedRanges<W> {
    words: Vec<W>,
}

impl<W: PackedRange> PackedRanges<W> {
    /// Create an empty array.
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Stored entries in their current order.
    pub fn as_slice(&self) -> &[W] {
        &self.words
    }

    /// Append `[from, to]`. Bounds must already fit the tier and be ordered.
    #[inline]
    pub fn push(&mut self, from: u32, to: u32) {
        debug_assert!(from <= to);
        self.words.push(W::pack(from, to));
    }

    /// Append already-packed entries, e.g. copied from a built subset.
    pub fn extend_from_slice(&mut self, words: &[W]) {
        self.words.extend_from_slice(words);
    }

    /// Subtract `[from, to]` from every stored entry.
    ///
    /// Scans back to front. Per entry `[lo, hi]`:
    /// - covered entirely: deleted
    /// - removal strictly inside: `hi` shrinks to `from - 1` and the
    ///   remainder `[to + 1, hi]` is appended
    /// - removal overlaps the tail: `hi` shrinks to `from - 1`
    /// - removal overlaps the head: `lo` grows to `to + 1`
    ///
    /// Returns whether any entry changed.
    pub fn remove(&mut self, from: u32, to: u32) -> bool {
        let mut changed = false;
        let mut i = self.words.len();
        while i > 0 {
            i -= 1;
            let w = self.words[i];
            let (lo, hi) = (w.lo(), w.hi());
            if hi < from || lo > to {
                continue;
            }
            changed = true;
            if from <= lo && hi <= to {
                // Entries past `i` were already visited, so the swapped-in
                // one needs no second look.
                self.words.swap_remove(i);
            } else if lo < from && to < hi {
                self.words[i] = W::pack(lo, from - 1);
                self.words.push(W::pack(to + 1, hi));
            } else if lo < from {
                self.words[i] = W::pack(lo, from - 1);
            } else {
                self.words[i] = W::pack(to + 1, hi);
            }
        }
        changed
    }

    /// Sort, merge overlapping and adjacent entries, trim capacity.
    ///
    /// Idempotent: compacting a compacted array leaves it unchanged.
    pub fn compact(&mut self) {
        if self.words.len() > 1 {
            self.words.sort_unstable();
            let mut cursor = MutableCodePointRange::default();
            cursor.set(self.words[0].lo(), self.words[0].hi());
            let mut write = 0;
            for read in 1..self.words.len() {
                let w = self.words[read];
                if cursor.absorbs(w.lo()) {
                    cursor.extend_to(w.hi());
                } else {
                    self.words[write] = W::pack(cursor.from, cursor.to);
                    write += 1;
                    cursor.set(w.lo(), w.hi());
                }
            }
            self.words[write] = W::pack(cursor.from, cursor.to);
            self.words.truncate(write + 1);
        }
        self.words.shrink_to_fit();
        debug_assert!(is_minimal(&self.words));
    }

    /// Number of code points covered. Exact only once compacted.
    pub fn code_point_count(&self) -> u64 {
        self.words
            .iter()
            .map(|w| u64::from(w.hi() - w.lo()) + 1)
            .sum()
    }

    /// Decode entries in stored order, offset by `base`.
    pub fn ranges(&self, base: u32) -> RangeCursor<'_, W> {
        RangeCursor::new(&self.words, base)
    }

    /// Move the entries out as an exact-size slice.
    pub fn into_boxed_slice(self) -> Box<[W]> {
        self.words.into_boxed_slice()
    }
}

impl<W: PackedRange> Default for PackedRanges<W> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::contains_in;

    fn bounds<W: PackedRange>(p: &PackedRanges<W>) -> Vec<(u32, u32)> {
        p.as_slice().iter().map(|w| (w.lo(), w.hi())).collect()
    }

    // ── Compaction ──────────────────────────────────────────────

    #[test]
    fn compact_merges_overlap_and_adjacency() {
        let mut p = PackedRanges::<u32>::new();
        p.push(0x300, 0x3FF);
        p.push(0x100, 0x2FF);
        p.push(0x250, 0x260);
        p.push(0x500, 0x500);
        p.compact();
        assert_eq!(bounds(&p), vec![(0x100, 0x3FF), (0x500, 0x500)]);
    }

    #[test]
    fn compact_keeps_gaps_of_one() {
        let mut p = PackedRanges::<u16>::new();
        p.push(0x10, 0x1F);
        p.push(0x21, 0x2F);
        p.compact();
        assert_eq!(bounds(&p), vec![(0x10, 0x1F), (0x21, 0x2F)]);
    }

    #[test]
    fn compact_drops_duplicates() {
        let mut p = PackedRanges::<u16>::new();
        p.push(0x41, 0x5A);
        p.push(0x41, 0x5A);
        p.compact();
        assert_eq!(p.len(), 1);
    }

    // ── Removal ─────────────────────────────────────────────────

    #[test]
    fn remove_full_cover_deletes() {
        let mut p = PackedRanges::<u16>::new();
        p.push(0x41, 0x5A);
        assert!(p.remove(0x40, 0x60));
        assert!(p.is_empty());
    }

    #[test]
    fn remove_inside_splits() {
        let mut p = PackedRanges::<u16>::new();
        p.push(0x41, 0x5A);
        p.remove(0x4B, 0x4D);
        p.compact();
        assert_eq!(bounds(&p), vec![(0x41, 0x4A), (0x4E, 0x5A)]);
    }

    #[test]
    fn remove_tail_and_head_shrink() {
        let mut p = PackedRanges::<u32>::new();
        p.push(0x100, 0x1FF);
        p.push(0x300, 0x3FF);
        p.remove(0x1F0, 0x30F);
        p.compact();
        assert_eq!(bounds(&p), vec![(0x100, 0x1EF), (0x310, 0x3FF)]);
    }

    #[test]
    fn remove_disjoint_reports_no_change() {
        let mut p = PackedRanges::<u16>::new();
        p.push(0x41, 0x5A);
        assert!(!p.remove(0x00, 0x40));
        assert!(!p.remove(0x5B, 0xFF));
        assert_eq!(bounds(&p), vec![(0x41, 0x5A)]);
    }

    #[test]
    fn remove_at_tier_edges() {
        let mut p = PackedRanges::<u16>::new();
        p.push(0x00, 0xFF);
        p.remove(0x00, 0x00);
        p.remove(0xFF, 0xFF);
        assert_eq!(bounds(&p), vec![(0x01, 0xFE)]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_pair() -> impl Strategy<Value = (u32, u32)> {
            (0u32..=0xFF, 0u32..=0xFF).prop_map(|(a, b)| (a.min(b), a.max(b)))
        }

        proptest! {
            #[test]
            fn compaction_is_idempotent(adds in proptest::collection::vec(arb_pair(), 0..32)) {
                let mut p = PackedRanges::<u16>::new();
                for (a, b) in adds {
                    p.push(a, b);
                }
                p.compact();
                let once = p.clone();
                p.compact();
                prop_assert_eq!(p, once);
            }

            #[test]
            fn compacted_contents_match_model(
                adds in proptest::collection::vec(arb_pair(), 0..16),
                removes in proptest::collection::vec(arb_pair(), 0..8),
            ) {
                let mut model = [false; 256];
                let mut p = PackedRanges::<u16>::new();
                for &(a, b) in &adds {
                    p.push(a, b);
                    model[a as usize..=b as usize].iter_mut().for_each(|m| *m = true);
                }
                for &(a, b) in &removes {
                    p.remove(a, b);
                    model[a as usize..=b as usize].iter_mut().for_each(|m| *m = false);
                }
                p.compact();
                prop_assert!(is_minimal(p.as_slice()));
                for (c, &expected) in model.iter().enumerate() {
                    prop_assert_eq!(contains_in(p.as_slice(), c as u32), expected, "{:#X}", c);
                }
                let covered = model.iter().filter(|&&m| m).count() as u64;
                prop_assert_eq!(p.code_point_count(), covered);
            }
        }
    }
}
