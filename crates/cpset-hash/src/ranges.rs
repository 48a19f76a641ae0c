//! Mutable accumulators for the hashed encodings.

use std::collections::BTreeSet;

use cpset_block::block::{clip_to_block, split_blocks};
use cpset_block::{Block, BlockSubset};
use cpset_core::codec::block_key;
use cpset_core::{normalize, Coalesce, RangeAccumulator, RangeIter, Subset};
use smallvec::SmallVec;
use tracing::trace;

use crate::config::{bucket_index, HashConfig};
use crate::error::HashConfigError;
use crate::optimal::OptimalHashSubset;
use crate::subset::HashSubset;

type Bucket = SmallVec<[Block; 2]>;

/// Hash table of blocks plus a sorted key set for ordered iteration.
///
/// Buckets grow on demand; most hold one or two blocks, so they are kept
/// inline. Removal and compaction work per `(bucket, block)` pair.
///
/// # Examples
///
/// ```
/// use cpset_core::{RangeAccumulator, Subset};
/// use cpset_hash::{HashConfig, HashedBlockRanges};
///
/// let mut acc = HashedBlockRanges::with_config(HashConfig::new(16))?;
/// acc.add_range(0x4100, 0x42FF);
/// acc.remove_range(0x4200, 0x4200);
/// let s = acc.finish();
/// assert!(s.contains(0x41FF));
/// assert!(!s.contains(0x4200));
/// # Ok::<(), cpset_hash::HashConfigError>(())
/// ```
#[derive(Clone, Debug)]
pub struct HashedBlockRanges {
    bucket_count: u32,
    buckets: Vec<Bucket>,
    block_keys: BTreeSet<u32>,
}

impl HashedBlockRanges {
    /// Create an empty accumulator with the default bucket count.
    pub fn new() -> Self {
        Self::with_valid_config(HashConfig::default())
    }

    /// Create an empty accumulator with a caller-chosen bucket count.
    pub fn with_config(config: HashConfig) -> Result<Self, HashConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: HashConfig) -> Self {
        Self {
            bucket_count: config.bucket_count,
            buckets: vec![Bucket::new(); config.bucket_count as usize],
            block_keys: BTreeSet::new(),
        }
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> u32 {
        self.bucket_count
    }

    /// Total stored entries across all blocks.
    pub fn entry_count(&self) -> usize {
        self.buckets.iter().flatten().map(Block::len).sum()
    }

    fn block(&self, key: u32) -> Option<&Block> {
        self.buckets[bucket_index(key, self.bucket_count)]
            .iter()
            .find(|b| b.key() == key)
    }

    fn block_mut(&mut self, key: u32) -> &mut Block {
        let bucket = &mut self.buckets[bucket_index(key, self.bucket_count)];
        let i = match bucket.iter().position(|b| b.key() == key) {
            Some(i) => i,
            None => {
                bucket.push(Block::new(key));
                self.block_keys.insert(key);
                bucket.len() - 1
            }
        };
        &mut bucket[i]
    }

    fn copy_blocks<'a>(&mut self, blocks: impl Iterator<Item = (u32, &'a [u16])>) {
        for (key, words) in blocks {
            self.block_mut(key).extend_from_slice(words);
        }
    }

    /// Copy any block-split encoding wholesale. Returns `false` for
    /// encodings that must be decoded range by range.
    fn copy_known(&mut self, subset: &dyn Subset) -> bool {
        if let Some(hash) = subset.downcast_ref::<HashSubset>() {
            self.copy_blocks(hash.blocks());
        } else if let Some(optimal) = subset.downcast_ref::<OptimalHashSubset>() {
            self.copy_blocks(optimal.blocks());
        } else if let Some(block) = subset.downcast_ref::<BlockSubset>() {
            self.copy_blocks(block.blocks());
        } else {
            return false;
        }
        true
    }
}

impl Default for HashedBlockRanges {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeAccumulator for HashedBlockRanges {
    type Output = HashSubset;

    const ENCODING: &'static str = "hash";

    fn add_range(&mut self, from: u32, to: u32) {
        let (from, to) = normalize(from, to);
        for (key, lo, hi) in split_blocks(from, to) {
            self.block_mut(key).push(lo, hi);
        }
    }

    fn remove_range(&mut self, from: u32, to: u32) {
        let (from, to) = normalize(from, to);
        for &key in self.block_keys.range(block_key(from)..=block_key(to)) {
            let bucket = &mut self.buckets[bucket_index(key, self.bucket_count)];
            if let Some(block) = bucket.iter_mut().find(|b| b.key() == key) {
                let (lo, hi) = clip_to_block(key, from, to);
                block.remove(lo, hi);
            }
        }
    }

    fn add_subset(&mut self, subset: &dyn Subset) {
        if !self.copy_known(subset.explicit()) {
            for r in subset.explicit().ranges() {
                self.add_range(r.start(), r.end());
            }
        }
    }

    fn compact(&mut self) {
        let before = self.entry_count();
        for bucket in &mut self.buckets {
            for block in bucket.iter_mut() {
                block.compact();
            }
            bucket.retain(|b| !b.is_empty());
            bucket.shrink_to_fit();
        }
        let (buckets, bucket_count) = (&self.buckets, self.bucket_count);
        self.block_keys
            .retain(|&key| buckets[bucket_index(key, bucket_count)].iter().any(|b| b.key() == key));
        trace!(
            encoding = Self::ENCODING,
            before,
            after = self.entry_count(),
            blocks = self.block_keys.len(),
            "compacted"
        );
    }

    fn ranges(&self) -> RangeIter<'_> {
        Box::new(Coalesce::new(
            self.block_keys
                .iter()
                .filter_map(|&key| self.block(key))
                .flat_map(Block::ranges),
        ))
    }

    fn is_empty(&self) -> bool {
        self.buckets.iter().flatten().all(Block::is_empty)
    }

    fn finish(mut self) -> HashSubset {
        self.compact();
        let keys = self.block_keys.into_iter().collect();
        let buckets = self
            .buckets
            .into_iter()
            .map(|bucket| {
                bucket
                    .into_iter()
                    .map(|block| (block.key(), block.into_words()))
                    .collect()
            })
            .collect();
        HashSubset::from_parts(buckets, keys)
    }
}

/// Accumulator whose result is an [`OptimalHashSubset`].
///
/// Collects edits in a default-sized hash table, then re-lays the compacted
/// blocks one key per bucket on [`finish`](RangeAccumulator::finish).
#[derive(Clone, Debug, Default)]
pub struct OptimalHashedBlockRanges {
    inner: HashedBlockRanges,
}

impl OptimalHashedBlockRanges {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RangeAccumulator for OptimalHashedBlockRanges {
    type Output = OptimalHashSubset;

    const ENCODING: &'static str = "optimal-hash";

    fn add_range(&mut self, from: u32, to: u32) {
        self.inner.add_range(from, to);
    }

    fn remove_range(&mut self, from: u32, to: u32) {
        self.inner.remove_range(from, to);
    }

    fn add_subset(&mut self, subset: &dyn Subset) {
        self.inner.add_subset(subset);
    }

    fn compact(&mut self) {
        self.inner.compact();
    }

    fn ranges(&self) -> RangeIter<'_> {
        self.inner.ranges()
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn finish(self) -> OptimalHashSubset {
        OptimalHashSubset::from(&self.inner.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpset_core::CodePointRange;

    fn r(a: u32, b: u32) -> CodePointRange {
        CodePointRange::new(a, b)
    }

    // ── Configuration ───────────────────────────────────────────

    #[test]
    fn with_config_rejects_zero() {
        assert_eq!(
            HashedBlockRanges::with_config(HashConfig::new(0)).unwrap_err(),
            HashConfigError::ZeroBuckets
        );
    }

    #[test]
    fn default_uses_default_bucket_count() {
        assert_eq!(HashedBlockRanges::new().bucket_count(), 64);
    }

    // ── Insertion and removal ───────────────────────────────────

    #[test]
    fn key_set_tracks_inserted_blocks() {
        let mut acc = HashedBlockRanges::new();
        acc.add_range(0x4E00, 0x4E10);
        acc.add_range(0x41, 0x5A);
        acc.add_range(0x41F0, 0x4205);
        assert_eq!(
            acc.block_keys.iter().copied().collect::<Vec<_>>(),
            vec![0x00, 0x41, 0x42, 0x4E]
        );
    }

    #[test]
    fn remove_across_colliding_blocks() {
        let mut acc = HashedBlockRanges::with_config(HashConfig::new(1)).unwrap();
        acc.add_range(0x100, 0x3FF);
        acc.remove_range(0x1F0, 0x30F);
        acc.compact();
        assert_eq!(
            acc.ranges().collect::<Vec<_>>(),
            vec![r(0x100, 0x1EF), r(0x310, 0x3FF)]
        );
        assert_eq!(acc.block_keys.len(), 2);
    }

    #[test]
    fn compact_drops_emptied_keys() {
        let mut acc = HashedBlockRanges::new();
        acc.add_range(0x100, 0x1FF);
        acc.add_range(0x300, 0x3FF);
        acc.remove_range(0x100, 0x1FF);
        acc.compact();
        assert_eq!(acc.block_keys.iter().copied().collect::<Vec<_>>(), vec![0x03]);
        assert_eq!(acc.entry_count(), 1);
    }

    // ── Subset inclusion ────────────────────────────────────────

    #[test]
    fn add_subset_copies_each_block_encoding() {
        let block = BlockSubset::from_ranges([(0x4100, 0x42FF)]);
        let hash = HashSubset::from_ranges([(0x41, 0x5A)]);
        let optimal = OptimalHashSubset::from(&HashSubset::from_ranges([(0x1F600, 0x1F64F)]));
        let mut acc = HashedBlockRanges::new();
        acc.add_subset(&block);
        acc.add_subset(&hash);
        acc.add_subset(&optimal);
        assert_eq!(acc.entry_count(), 4);
        let s = acc.finish();
        assert_eq!(s.keys(), &[0x00, 0x41, 0x42, 0x1F6]);
    }

    #[test]
    fn optimal_accumulator_finishes_one_key_per_bucket() {
        let mut acc = OptimalHashedBlockRanges::new();
        acc.add_range(0x100, 0x1FF);
        acc.add_range(0x4100, 0x41FF);
        let s = acc.finish();
        assert!(s.contains(0x150));
        assert!(s.contains(0x4150));
        assert!(!s.contains(0x8150));
        assert_eq!(s.keys(), &[0x01, 0x41]);
    }
}
