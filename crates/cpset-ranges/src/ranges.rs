//! Mutable accumulator for [`RangedSubset`].

use cpset_core::codec::PackedRange;
use cpset_core::{normalize, Coalesce, PackedRanges, RangeAccumulator, RangeIter, Subset};
use tracing::trace;

use crate::subset::RangedSubset;

const TIER8_MAX: u32 = u16::TIER_MAX;
const TIER16_MAX: u32 = u32::TIER_MAX;

/// Growable per-tier arrays collecting edits for a [`RangedSubset`].
///
/// A range that crosses `0xFF` or `0xFFFF` is split into up to three
/// tier-local pieces on insertion, so every stored entry lives entirely in
/// one tier.
///
/// # Examples
///
/// ```
/// use cpset_core::{CodePointRange, RangeAccumulator};
/// use cpset_ranges::Ranges;
///
/// let mut acc = Ranges::new();
/// acc.add_range(0x0, 0x2FF);
/// acc.add_range(0x300, 0x3FF);
/// acc.compact();
/// let ranges: Vec<_> = acc.ranges().collect();
/// assert_eq!(ranges, vec![CodePointRange::new(0x0, 0x3FF)]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Ranges {
    tier8: PackedRanges<u16>,
    tier16: PackedRanges<u32>,
    tier32: PackedRanges<u64>,
}

impl Ranges {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total stored entries across all tiers.
    pub fn entry_count(&self) -> usize {
        self.tier8.len() + self.tier16.len() + self.tier32.len()
    }

    fn copy_tiers(&mut self, subset: &RangedSubset) {
        self.tier8.extend_from_slice(subset.tier8());
        self.tier16.extend_from_slice(subset.tier16());
        self.tier32.extend_from_slice(subset.tier32());
    }
}

impl RangeAccumulator for Ranges {
    type Output = RangedSubset;

    const ENCODING: &'static str = "ranged";

    fn add_range(&mut self, from: u32, to: u32) {
        let (from, to) = normalize(from, to);
        if from <= TIER8_MAX {
            self.tier8.push(from, to.min(TIER8_MAX));
        }
        if to > TIER8_MAX && from <= TIER16_MAX {
            self.tier16.push(from.max(TIER8_MAX + 1), to.min(TIER16_MAX));
        }
        if to > TIER16_MAX {
            self.tier32.push(from.max(TIER16_MAX + 1), to);
        }
    }

    fn remove_range(&mut self, from: u32, to: u32) {
        let (from, to) = normalize(from, to);
        // Stored entries are tier-local, so a removal only needs the tiers it
        // overlaps; remainders of a split stay within their tier.
        if from <= TIER8_MAX {
            self.tier8.remove(from, to);
        }
        if to > TIER8_MAX && from <= TIER16_MAX {
            self.tier16.remove(from, to);
        }
        if to > TIER16_MAX {
            self.tier32.remove(from, to);
        }
    }

    fn add_subset(&mut self, subset: &dyn Subset) {
        match subset.explicit().downcast_ref::<RangedSubset>() {
            Some(ranged) => self.copy_tiers(ranged),
            None => {
                for r in subset.explicit().ranges() {
                    self.add_range(r.start(), r.end());
                }
            }
        }
    }

    fn compact(&mut self) {
        let before = self.entry_count();
        self.tier8.compact();
        self.tier16.compact();
        self.tier32.compact();
        trace!(
            encoding = Self::ENCODING,
            before,
            after = self.entry_count(),
            "compacted"
        );
    }

    fn ranges(&self) -> RangeIter<'_> {
        Box::new(Coalesce::new(
            self.tier8
                .ranges(0)
                .chain(self.tier16.ranges(0))
                .chain(self.tier32.ranges(0)),
        ))
    }

    fn is_empty(&self) -> bool {
        self.tier8.is_empty() && self.tier16.is_empty() && self.tier32.is_empty()
    }

    fn finish(mut self) -> RangedSubset {
        self.compact();
        RangedSubset::from_tiers(
            self.tier8.into_boxed_slice(),
            self.tier16.into_boxed_slice(),
            self.tier32.into_boxed_slice(),
        )
    }
}
