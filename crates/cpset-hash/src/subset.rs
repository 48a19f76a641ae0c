//! Immutable hash-bucketed block subset.

use cpset_core::codec::{block_base, block_key, contains_in, RangeCursor};
use cpset_core::{Coalesce, RangeAccumulator, RangeIter, Subset};

use crate::config::bucket_index;
use crate::ranges::HashedBlockRanges;

/// One block stored in a bucket.
pub(crate) type Entry = (u32, Box<[u16]>);

/// Fixed bucket array of `(block key, offset ranges)` entries.
///
/// `contains` hashes `code_point >> 8` to a bucket, scans the bucket's few
/// entries for the key, then binary searches that block's 8-bit ranges.
/// Sorted keys are kept alongside for ordered iteration.
///
/// # Examples
///
/// ```
/// use cpset_core::Subset;
/// use cpset_hash::HashSubset;
///
/// let s = HashSubset::from_ranges([(0x4100, 0x42FF), (0x1F600, 0x1F64F)]);
/// assert!(s.contains(0x41FF));
/// assert!(s.contains(0x1F60A));
/// assert!(!s.contains(0x4300));
/// assert_eq!(s.bucket_count(), 64);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashSubset {
    buckets: Box<[Box<[Entry]>]>,
    keys: Box<[u32]>,
}

impl HashSubset {
    pub(crate) fn from_parts(buckets: Box<[Box<[Entry]>]>, keys: Box<[u32]>) -> Self {
        debug_assert!(!buckets.is_empty());
        Self { buckets, keys }
    }

    /// Build directly from a table of inclusive `(from, to)` pairs using
    /// the default bucket count.
    pub fn from_ranges<I: IntoIterator<Item = (u32, u32)>>(ranges: I) -> Self {
        let mut acc = HashedBlockRanges::new();
        for (from, to) in ranges {
            acc.add_range(from, to);
        }
        acc.finish()
    }

    /// Number of buckets, fixed at construction.
    pub fn bucket_count(&self) -> u32 {
        self.buckets.len() as u32
    }

    /// Entries in the fullest bucket.
    pub fn max_bucket_len(&self) -> usize {
        self.buckets.iter().map(|b| b.len()).max().unwrap_or(0)
    }

    /// Sorted keys of every stored block.
    pub fn keys(&self) -> &[u32] {
        &self.keys
    }

    /// Packed offset ranges of block `key`, if present.
    #[inline]
    pub fn block(&self, key: u32) -> Option<&[u16]> {
        self.buckets[bucket_index(key, self.bucket_count())]
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, words)| &**words)
    }

    /// `(key, offset ranges)` for every block, ascending by key.
    pub fn blocks(&self) -> impl Iterator<Item = (u32, &[u16])> + '_ {
        self.keys
            .iter()
            .filter_map(|&key| self.block(key).map(|words| (key, words)))
    }
}

impl Subset for HashSubset {
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
        HashedBlockRanges::ENCODING
    }
}
