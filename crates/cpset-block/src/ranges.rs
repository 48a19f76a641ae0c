//! Mutable accumulator for [`BlockSubset`].

use cpset_core::codec::block_key;
use cpset_core::{normalize, Coalesce, RangeAccumulator, RangeIter, Subset};
use tracing::trace;

use crate::block::{clip_to_block, split_blocks, Block};
use crate::subset::BlockSubset;

/// Blocks kept sorted by key, each with its own growable offset array.
///
/// A new key is binary-searched and inserted in place, so the block list
/// is always ordered and `remove_range` only visits the blocks its bounds
/// span.
///
/// # Examples
///
/// ```
/// use cpset_block::BlockRanges;
/// use cpset_core::RangeAccumulator;
///
/// let mut acc = BlockRanges::new();
/// acc.add_range(0x4100, 0x42FF);
/// acc.remove_range(0x41F0, 0x420F);
/// assert_eq!(acc.block_keys().collect::<Vec<_>>(), vec![0x41, 0x42]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BlockRanges {
    blocks: Vec<Block>,
}

impl BlockRanges {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys of all blocks currently held, including emptied ones.
    pub fn block_keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.blocks.iter().map(Block::key)
    }

    /// Total stored entries across all blocks.
    pub fn entry_count(&self) -> usize {
        self.blocks.iter().map(Block::len).sum()
    }

    fn block_mut(&mut self, key: u32) -> &mut Block {
        let i = match self.blocks.binary_search_by_key(&key, Block::key) {
            Ok(i) => i,
            Err(i) => {
                self.blocks.insert(i, Block::new(key));
                i
            }
        };
        &mut self.blocks[i]
    }

    fn copy_blocks(&mut self, subset: &BlockSubset) {
        for (key, words) in subset.blocks() {
            self.block_mut(key).extend_from_slice(words);
        }
    }
}

impl RangeAccumulator for BlockRanges {
    type Output = BlockSubset;

    const ENCODING: &'static str = "block";

    fn add_range(&mut self, from: u32, to: u32) {
        let (from, to) = normalize(from, to);
        for (key, lo, hi) in split_blocks(from, to) {
            self.block_mut(key).push(lo, hi);
        }
    }

    fn remove_range(&mut self, from: u32, to: u32) {
        let (from, to) = normalize(from, to);
        let (first, last) = (block_key(from), block_key(to));
        let start = self.blocks.partition_point(|b| b.key() < first);
        for block in self.blocks[start..].iter_mut() {
            if block.key() > last {
                break;
            }
            let (lo, hi) = clip_to_block(block.key(), from, to);
            block.remove(lo, hi);
        }
    }

    fn add_subset(&mut self, subset: &dyn Subset) {
        match subset.explicit().downcast_ref::<BlockSubset>() {
            Some(blocks) => self.copy_blocks(blocks),
            None => {
                for r in subset.explicit().ranges() {
                    self.add_range(r.start(), r.end());
                }
            }
        }
    }

    fn compact(&mut self) {
        let before = self.entry_count();
        for block in &mut self.blocks {
            block.compact();
        }
        self.blocks.retain(|b| !b.is_empty());
        self.blocks.shrink_to_fit();
        trace!(
            encoding = Self::ENCODING,
            before,
            after = self.entry_count(),
            blocks = self.blocks.len(),
            "compacted"
        );
    }

    fn ranges(&self) -> RangeIter<'_> {
        Box::new(Coalesce::new(self.blocks.iter().flat_map(Block::ranges)))
    }

    fn is_empty(&self) -> bool {
        self.blocks.iter().all(Block::is_empty)
    }

    fn finish(mut self) -> BlockSubset {
        self.compact();
        let keys = self.blocks.iter().map(Block::key).collect();
        let blocks = self.blocks.into_iter().map(Block::into_words).collect();
        BlockSubset::from_parts(keys, blocks)
    }
}
