//! Packed range codec.
//!
//! A range `[from, to]` is stored as one word of width `2n` bits,
//! `(from << n) | to`, in one of three tiers:
//!
//! | Word  | Bound width | Stores code points |
//! |-------|-------------|--------------------|
//! | `u16` | 8 bits      | `0x0..=0xFF`       |
//! | `u32` | 16 bits     | `0x100..=0xFFFF`   |
//! | `u64` | 32 bits     | `0x10000..=0x10FFFF` |
//!
//! Because `from` occupies the high half, numeric order of packed words is
//! order by `from`. Every array of packed words handed to
//! [`contains_in`] must be sorted, disjoint and non-adjacent.

use std::fmt;
use std::hash::Hash;

use crate::range::{CodePointRange, MutableCodePointRange, MAX_CODE_POINT};

/// Bits of a code point addressing the position inside a block.
pub const BLOCK_SHIFT: u32 = 8;

/// Mask selecting a code point's offset within its block.
pub const BLOCK_MASK: u32 = 0xFF;

/// Block key (`code_point >> 8`) of a code point.
#[inline]
pub fn block_key(code_point: u32) -> u32 {
    code_point >> BLOCK_SHIFT
}

/// Offset of a code point inside its 256-wide block.
#[inline]
pub fn block_offset(code_point: u32) -> u32 {
    code_point & BLOCK_MASK
}

/// First code point of a block.
#[inline]
pub fn block_base(key: u32) -> u32 {
    key << BLOCK_SHIFT
}

/// A range packed into a single fixed-width word.
pub trait PackedRange: Copy + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// Width of one bound in bits.
    const BOUND_BITS: u32;
    /// Mask selecting one bound.
    const BOUND_MASK: u32;
    /// Highest code point a flat set stores at this tier.
    const TIER_MAX: u32;

    /// Pack `[from, to]`. Both bounds must fit in `BOUND_BITS`.
    fn pack(from: u32, to: u32) -> Self;

    /// Unpack the lower bound.
    fn lo(self) -> u32;

    /// Unpack the upper bound.
    fn hi(self) -> u32;
}

macro_rules! impl_packed_range {
    ($word:ty, $bits:expr, $mask:expr, $tier_max:expr) => {
        impl PackedRange for $word {
            const BOUND_BITS: u32 = $bits;
            const BOUND_MASK: u32 = $mask;
            const TIER_MAX: u32 = $tier_max;

            #[inline]
            fn pack(from: u32, to: u32) -> Self {
                debug_assert!((u64::from(from) | u64::from(to)) >> $bits == 0);
                ((from as $word) << $bits) | (to as $word)
            }

            #[inline]
            fn lo(self) -> u32 {
                (self >> $bits) as u32
            }

            #[inline]
            fn hi(self) -> u32 {
                (self as u32) & $mask
            }
        }
    };
}

impl_packed_range!(u16, 8, 0xFF, 0xFF);
impl_packed_range!(u32, 16, 0xFFFF, 0xFFFF);
impl_packed_range!(u64, 32, u32::MAX, MAX_CODE_POINT);

/// Whether `code_point` lies in any range of a sorted, disjoint array.
///
/// The code point is masked to the tier's bound width first, so block
/// lookups may pass a full code point.
///
/// # Examples
///
/// ```
/// use cpset_core::codec::{contains_in, PackedRange};
///
/// let words = [u16::pack(0x30, 0x39), u16::pack(0x41, 0x5A)];
/// assert!(contains_in(&words, 0x41));
/// assert!(!contains_in(&words, 0x40));
/// // Only the low byte takes part in an 8-bit tier search.
/// assert!(contains_in(&words, 0x1235));
/// ```
#[inline]
pub fn contains_in<W: PackedRange>(words: &[W], code_point: u32) -> bool {
    let c = code_point & W::BOUND_MASK;
    let idx = words.partition_point(|w| w.lo() <= c);
    idx.checked_sub(1)
        .and_then(|i| words.get(i))
        .is_some_and(|w| c <= w.hi())
}

/// Whether a packed array satisfies the sorted, disjoint, non-adjacent rule.
pub fn is_minimal<W: PackedRange>(words: &[W]) -> bool {
    words
        .windows(2)
        .all(|pair| pair[0].hi().saturating_add(1) < pair[1].lo())
}

/// Streaming decoder over a packed array.
///
/// `base` is added to every unpacked bound: `0` for flat tiers, the block's
/// first code point for block arrays. Usable as an [`Iterator`], or through
/// [`advance`](Self::advance) to decode into a caller-owned cursor.
#[derive(Clone, Debug)]
pub struct RangeCursor<'a, W> {
    words: &'a [W],
    pos: usize,
    base: u32,
}

impl<'a, W: PackedRange> RangeCursor<'a, W> {
    /// Decode `words`, offsetting every bound by `base`.
    pub fn new(words: &'a [W], base: u32) -> Self {
        Self {
            words,
            pos: 0,
            base,
        }
    }

    /// Decode the next range into `out`. Returns `false` when exhausted.
    pub fn advance(&mut self, out: &mut MutableCodePointRange) -> bool {
        match self.words.get(self.pos) {
            Some(&w) => {
                self.pos += 1;
                out.set(self.base + w.lo(), self.base + w.hi());
                true
            }
            None => false,
        }
    }
}

impl<W: PackedRange> Iterator for RangeCursor<'_, W> {
    type Item = CodePointRange;

    fn next(&mut self) -> Option<CodePointRange> {
        let mut cursor = MutableCodePointRange::default();
        self.advance(&mut cursor).then(|| cursor.freeze())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.words.len() - self.pos;
        (left, Some(left))
    }
}

impl<W: PackedRange> ExactSizeIterator for RangeCursor<'_, W> {}
