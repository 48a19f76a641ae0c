//! The mutable side of an encoding.

use crate::range::assert_code_point;
use crate::subset::{RangeIter, Subset};

/// Builder-scoped mutable storage that produces one immutable encoding.
///
/// Edits arrive in any order; [`compact`](Self::compact) restores the
/// minimal form. An accumulator is owned by a single builder and dropped by
/// [`finish`](Self::finish).
pub trait RangeAccumulator: Send + 'static {
    /// The immutable encoding this accumulator produces.
    type Output: Subset;

    /// Short name of the produced encoding, used in logs.
    const ENCODING: &'static str;

    /// Add `[from, to]`. Reversed bounds are swapped.
    ///
    /// # Panics
    ///
    /// If either bound exceeds `U+10FFFF`.
    fn add_range(&mut self, from: u32, to: u32);

    /// Subtract `[from, to]` from everything added so far.
    ///
    /// # Panics
    ///
    /// If either bound exceeds `U+10FFFF`.
    fn remove_range(&mut self, from: u32, to: u32);

    /// Add the explicit ranges of another subset.
    ///
    /// The default decodes `subset.explicit().ranges()`. Implementations
    /// override it to copy their own encoding wholesale.
    fn add_subset(&mut self, subset: &dyn Subset) {
        for r in subset.explicit().ranges() {
            self.add_range(r.start(), r.end());
        }
    }

    /// Sort and merge every stored array, dropping empty blocks.
    fn compact(&mut self);

    /// Stored ranges in ascending order. Only valid after [`compact`](Self::compact).
    fn ranges(&self) -> RangeIter<'_>;

    /// Whether nothing is stored.
    fn is_empty(&self) -> bool;

    /// Compact and copy into exact-size immutable storage.
    fn finish(self) -> Self::Output;
}

/// Validate and order a `(from, to)` pair for an accumulator entry point.
#[inline]
#[track_caller]
pub fn normalize(from: u32, to: u32) -> (u32, u32) {
    assert_code_point(from);
    assert_code_point(to);
    if from <= to {
        (from, to)
    } else {
        (to, from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_swaps() {
        assert_eq!(normalize(9, 3), (3, 9));
        assert_eq!(normalize(3, 3), (3, 3));
    }

    #[test]
    #[should_panic(expected = "exceeds U+10FFFF")]
    fn normalize_rejects_out_of_range() {
        normalize(0x11_0000, 0);
    }
}
