//! Immutable block-indexed subset.

use cpset_core::codec::{block_base, block_key, contains_in, RangeCursor};
use cpset_core::{Coalesce, RangeAccumulator, RangeIter, Subset};

use crate::ranges::BlockRanges;

/// Sorted block keys with one offset-range array per key.
///
/// `contains` binary searches the keys for `code_point >> 8`, then binary
/// searches that block's 8-bit ranges for `code_point & 0xFF`. Suited to
/// subsets scattered over many blocks with few runs in each.
///
/// # Examples
///
/// ```
/// use cpset_block::BlockSubset;
/// use cpset_core::Subset;
///
/// let s = BlockSubset::from_ranges([(0x4100, 0x42FF)]);
/// assert_eq!(s.keys(), &[0x41, 0x42]);
/// assert!(s.contains(0x41FF));
/// assert!(!s.contains(0x4300));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlockSubset {
    keys: Box<[u32]>,
    blocks: Box<[Box<[u16]>]>,
}

impl BlockSubset {
    pub(crate) fn from_parts(keys: Box<[u32]>, blocks: Box<[Box<[u16]>]>) -> Self {
        debug_assert_eq!(keys.len(), blocks.len());
        debug_assert!(keys.windows(2).all(|k| k[0] < k[1]));
        Self { keys, blocks }
    }

    /// Build directly from a table of inclusive `(from, to)` pairs.
    pub fn from_ranges<I: IntoIterator<Item = (u32, u32)>>(ranges: I) -> Self {
        let mut acc = BlockRanges::new();
        for (from, to) in ranges {
            acc.add_range(from, to);
        }
        acc.finish()
    }

    /// Sorted block keys that hold at least one range.
    pub fn keys(&self) -> &[u32] {
        &self.keys
    }

    /// Number of non-empty blocks.
    pub fn block_count(&self) -> usize {
        self.keys.len()
    }

    /// Packed offset ranges of block `key`, if present.
    pub fn block(&self, key: u32) -> Option<&[u16]> {
        self.keys
            .binary_search(&key)
            .ok()
            .map(|i| &*self.blocks[i])
    }

    /// `(key, offset ranges)` for every block, ascending by key.
    pub fn blocks(&self) -> impl Iterator<Item = (u32, &[u16])> + '_ {
        self.keys
            .iter()
            .copied()
            .zip(self.blocks.iter().map(|b| &**b))
    }
}

impl Subset for BlockSubset {
    #[inline]
    fn contains(&self, code_point: u32) -> bool {
        self.block(block_key(code_point))
            .is_some_and(|words| contains_in(words, code_point))
    }

    fn ranges(&self) -> RangeIter<'_> {
        Box::new(Coalesce::new(
            self.blocks()
                .flat_map(|(key, words)| RangeCursor::new(words, block_base(key))),
        ))
    }

    fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    fn explicit(&self) -> &dyn Subset {
        self
    }

    fn encoding(&self) -> &'static str {
        BlockRanges::ENCODING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpset_core::CodePointRange;
    use cpset_test_utils::compliance;
    use cpset_test_utils::tables::MIXED_SCRIPTS;

    #[test]
    fn spanning_two_blocks() {
        let s = BlockSubset::from_ranges([(0x4100, 0x42FF)]);
        assert!(s.contains(0x4100));
        assert!(s.contains(0x41FF));
        assert!(s.contains(0x4200));
        assert!(s.contains(0x42FF));
        assert!(!s.contains(0x40FF));
        assert!(!s.contains(0x4300));
    }

    #[test]
    fn offset_hit_in_missing_block_is_not_member() {
        let s = BlockSubset::from_ranges([(0x41, 0x5A)]);
        // Same low byte as 'A', different block.
        assert!(!s.contains(0x1241));
        assert!(s.contains(0x41));
    }

    #[test]
    fn ranges_merge_across_block_edges() {
        let s = BlockSubset::from_ranges([(0x4100, 0x42FF), (0x4300, 0x4310)]);
        let ranges: Vec<_> = s.ranges().collect();
        assert_eq!(ranges, vec![CodePointRange::new(0x4100, 0x4310)]);
        assert_eq!(s.block_count(), 3);
    }

    #[test]
    fn block_lookup() {
        let s = BlockSubset::from_ranges([(0x3B1, 0x3C9)]);
        assert_eq!(s.block(0x03).map(<[u16]>::len), Some(1));
        assert!(s.block(0x04).is_none());
    }

    #[test]
    fn default_is_empty() {
        let s = BlockSubset::default();
        assert!(s.is_empty());
        assert!(!s.contains(0));
        assert_eq!(s.ranges().count(), 0);
    }

    #[test]
    fn compliance_full() {
        let s = BlockSubset::from_ranges(MIXED_SCRIPTS.iter().copied());
        compliance::run_full_compliance(&s);
    }

    #[test]
    fn top_of_code_space() {
        let s = BlockSubset::from_ranges([(0x10_FF00, cpset_core::MAX_CODE_POINT)]);
        assert_eq!(s.keys(), &[0x10FF]);
        assert!(s.contains(cpset_core::MAX_CODE_POINT));
    }
}
