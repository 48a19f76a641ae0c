//! A single 256-wide block and the splitting of ranges into blocks.

use cpset_core::codec::{block_base, block_key, block_offset, BLOCK_MASK};
use cpset_core::{PackedRanges, RangeCursor};

/// One block's key together with its 8-bit offset ranges.
///
/// The unit of storage for every block-split accumulator. Offsets are
/// relative to [`block_base`] of the key, so a block never needs more than
/// the 8-bit tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    key: u32,
    ranges: PackedRanges<u16>,
}

impl Block {
    /// An empty block for `key`.
    pub fn new(key: u32) -> Self {
        Self {
            key,
            ranges: PackedRanges::new(),
        }
    }

    /// The block key (`code_point >> 8`).
    pub fn key(&self) -> u32 {
        self.key
    }

    /// Stored offset ranges.
    pub fn words(&self) -> &[u16] {
        self.ranges.as_slice()
    }

    /// Append offsets `[lo, hi]`, both within `0..=0xFF`.
    pub fn push(&mut self, lo: u32, hi: u32) {
        self.ranges.push(lo, hi);
    }

    /// Append already-packed offset ranges.
    pub fn extend_from_slice(&mut self, words: &[u16]) {
        self.ranges.extend_from_slice(words);
    }

    /// Subtract offsets `[lo, hi]`. Returns whether anything changed.
    pub fn remove(&mut self, lo: u32, hi: u32) -> bool {
        self.ranges.remove(lo, hi)
    }

    /// Sort and merge the offset ranges.
    pub fn compact(&mut self) {
        self.ranges.compact();
    }

    /// Whether no offsets are stored.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Decoded absolute ranges of this block.
    pub fn ranges(&self) -> RangeCursor<'_, u16> {
        self.ranges.ranges(block_base(self.key))
    }

    /// Move the offsets out as an exact-size slice.
    pub fn into_words(self) -> Box<[u16]> {
        self.ranges.into_boxed_slice()
    }
}

/// Split `[from, to]` into `(key, lo, hi)` pieces, one per spanned block.
///
/// Interior blocks get the full `0x00..=0xFF` offset span; the first and
/// last are clipped to the input bounds. Bounds must already be ordered.
///
/// ```
/// use cpset_block::block::split_blocks;
///
/// let pieces: Vec<_> = split_blocks(0x41F0, 0x4305).collect();
/// assert_eq!(pieces, vec![(0x41, 0xF0, 0xFF), (0x42, 0x00, 0xFF), (0x43, 0x00, 0x05)]);
/// ```
pub fn split_blocks(from: u32, to: u32) -> impl Iterator<Item = (u32, u32, u32)> {
    debug_assert!(from <= to);
    (block_key(from)..=block_key(to)).map(move |key| {
        let (lo, hi) = clip_to_block(key, from, to);
        (key, lo, hi)
    })
}

/// Offsets of `[from, to]` within block `key`, substituting `0x00` or
/// `0xFF` where the range runs past the block's edge.
pub fn clip_to_block(key: u32, from: u32, to: u32) -> (u32, u32) {
    let lo = if block_key(from) < key { 0 } else { block_offset(from) };
    let hi = if block_key(to) > key { BLOCK_MASK } else { block_offset(to) };
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpset_core::CodePointRange;

    #[test]
    fn split_within_one_block() {
        let pieces: Vec<_> = split_blocks(0x4150, 0x4160).collect();
        assert_eq!(pieces, vec![(0x41, 0x50, 0x60)]);
    }

    #[test]
    fn split_on_exact_block_edges() {
        let pieces: Vec<_> = split_blocks(0x4100, 0x42FF).collect();
        assert_eq!(pieces, vec![(0x41, 0x00, 0xFF), (0x42, 0x00, 0xFF)]);
    }

    #[test]
    fn block_ranges_are_absolute() {
        let mut b = Block::new(0x41);
        b.push(0xF0, 0xFF);
        b.push(0x00, 0x0F);
        b.compact();
        let ranges: Vec<_> = b.ranges().collect();
        assert_eq!(
            ranges,
            vec![
                CodePointRange::new(0x4100, 0x410F),
                CodePointRange::new(0x41F0, 0x41FF)
            ]
        );
    }

    #[test]
    fn removing_everything_empties_block() {
        let mut b = Block::new(0x10);
        b.push(0x20, 0x30);
        assert!(b.remove(0x00, 0xFF));
        assert!(b.is_empty());
    }
}
