//! Lookup-only hash subset with at most one block per bucket.

use cpset_block::BlockSubset;
use cpset_core::codec::{block_base, block_key, contains_in, RangeCursor};
use cpset_core::{Coalesce, RangeAccumulator, RangeIter, Subset};
use tracing::debug;

use crate::config::bucket_index;
use crate::ranges::OptimalHashedBlockRanges;
use crate::subset::HashSubset;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Slot {
    key: u32,
    words: Box<[u16]>,
}

/// Hash subset whose bucket count is chosen so no two keys collide.
///
/// A lookup is one modulus, one key compare and one in-block binary
/// search; there is no bucket scan. Built from an already compacted
/// [`HashSubset`] or [`BlockSubset`], never edited in place.
///
/// # Examples
///
/// ```
/// use cpset_core::Subset;
/// use cpset_hash::{HashSubset, OptimalHashSubset};
///
/// let hashed = HashSubset::from_ranges([(0x100, 0x1FF), (0x4100, 0x41FF)]);
/// let optimal = OptimalHashSubset::from(&hashed);
/// assert!(optimal.contains(0x4150));
/// assert!(!optimal.contains(0x8150));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptimalHashSubset {
    slots: Box<[Option<Slot>]>,
    keys: Box<[u32]>,
}

impl OptimalHashSubset {
    /// Lay out `(key, ranges)` blocks one per slot. Keys must be ascending
    /// and distinct.
    fn from_sorted_blocks<'a>(blocks: impl Iterator<Item = (u32, &'a [u16])>) -> Self {
        let blocks: Vec<(u32, &[u16])> = blocks.filter(|(_, words)| !words.is_empty()).collect();
        let keys: Box<[u32]> = blocks.iter().map(|&(key, _)| key).collect();
        let bucket_count = optimal_bucket_count(&keys);
        let mut slots = vec![None; bucket_count as usize].into_boxed_slice();
        for (key, words) in blocks {
            slots[bucket_index(key, bucket_count)] = Some(Slot {
                key,
                words: words.into(),
            });
        }
        Self { slots, keys }
    }

    /// Build directly from a table of inclusive `(from, to)` pairs.
    pub fn from_ranges<I: IntoIterator<Item = (u32, u32)>>(ranges: I) -> Self {
        let mut acc = OptimalHashedBlockRanges::new();
        for (from, to) in ranges {
            acc.add_range(from, to);
        }
        acc.finish()
    }

    /// Number of slots.
    pub fn bucket_count(&self) -> u32 {
        self.slots.len() as u32
    }

    /// Sorted keys of every stored block.
    pub fn keys(&self) -> &[u32] {
        &self.keys
    }

    /// Packed offset ranges of block `key`, if present.
    #[inline]
    pub fn block(&self, key: u32) -> Option<&[u16]> {
        match &self.slots[bucket_index(key, self.bucket_count())] {
            Some(slot) if slot.key == key => Some(&*slot.words),
            _ => None,
        }
    }

    /// `(key, offset ranges)` for every block, ascending by key.
    pub fn blocks(&self) -> impl Iterator<Item = (u32, &[u16])> + '_ {
        self.keys
            .iter()
            .filter_map(|&key| self.block(key).map(|words| (key, words)))
    }
}

impl From<&HashSubset> for OptimalHashSubset {
    fn from(subset: &HashSubset) -> Self {
        Self::from_sorted_blocks(subset.blocks())
    }
}

impl From<&BlockSubset> for OptimalHashSubset {
    fn from(subset: &BlockSubset) -> Self {
        Self::from_sorted_blocks(subset.blocks())
    }
}

impl Subset for OptimalHashSubset {
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
        OptimalHashedBlockRanges::ENCODING
    }
}

/// Smallest bucket count `n >= max(1, keys.len())` under which every
/// `key mod n` is distinct.
///
/// Terminates for distinct keys: at `n = max_key + 1` every key is its own
/// residue.
pub fn optimal_bucket_count(keys: &[u32]) -> u32 {
    let mut n = (keys.len() as u32).max(1);
    let mut seen = Vec::new();
    loop {
        seen.clear();
        seen.resize(n as usize, false);
        let distinct = keys.iter().all(|&key| {
            let slot = &mut seen[bucket_index(key, n)];
            !std::mem::replace(slot, true)
        });
        if distinct {
            debug!(keys = keys.len(), buckets = n, "sized optimal hash table");
            return n;
        }
        n += 1;
    }
}
