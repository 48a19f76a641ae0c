//! Immutable flat ranged subset.

use cpset_core::codec::{contains_in, PackedRange, RangeCursor};
use cpset_core::{Coalesce, RangeAccumulator, RangeIter, Subset};

use crate::ranges::Ranges;

/// Three sorted, disjoint packed arrays, one per width tier.
///
/// A query picks exactly one tier by magnitude: `<= 0xFF` searches the
/// 8-bit tier, `<= 0xFFFF` the 16-bit tier, anything higher the 32-bit
/// tier. After compaction a code point can only live in its own tier.
///
/// # Examples
///
/// ```
/// use cpset_ranges::RangedSubset;
/// use cpset_core::Subset;
///
/// let s = RangedSubset::from_ranges([(0x41, 0x5A), (0x391, 0x3A9), (0x1F600, 0x1F64F)]);
/// assert!(s.contains('Q' as u32));
/// assert!(s.contains(0x3A3));
/// assert!(s.contains(0x1F60A));
/// assert!(!s.contains('q' as u32));
/// assert_eq!(s.tier8().len() + s.tier16().len() + s.tier32().len(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangedSubset {
    tier8: Box<[u16]>,
    tier16: Box<[u32]>,
    tier32: Box<[u64]>,
}

impl RangedSubset {
    pub(crate) fn from_tiers(tier8: Box<[u16]>, tier16: Box<[u32]>, tier32: Box<[u64]>) -> Self {
        Self {
            tier8,
            tier16,
            tier32,
        }
    }

    /// Build directly from a table of inclusive `(from, to)` pairs.
    pub fn from_ranges<I: IntoIterator<Item = (u32, u32)>>(ranges: I) -> Self {
        let mut acc = Ranges::new();
        for (from, to) in ranges {
            acc.add_range(from, to);
        }
        acc.finish()
    }

    /// Packed ranges within `0x0..=0xFF`.
    pub fn tier8(&self) -> &[u16] {
        &self.tier8
    }

    /// Packed ranges within `0x100..=0xFFFF`.
    pub fn tier16(&self) -> &[u32] {
        &self.tier16
    }

    /// Packed ranges within `0x10000..=0x10FFFF`.
    pub fn tier32(&self) -> &[u64] {
        &self.tier32
    }
}

impl Subset for RangedSubset {
    #[inline]
    fn contains(&self, code_point: u32) -> bool {
        if code_point <= u16::TIER_MAX {
            contains_in(&self.tier8, code_point)
        } else if code_point <= u32::TIER_MAX {
            contains_in(&self.tier16, code_point)
        } else {
            contains_in(&self.tier32, code_point)
        }
    }

    fn ranges(&self) -> RangeIter<'_> {
        Box::new(Coalesce::new(
            RangeCursor::new(&self.tier8, 0)
                .chain(RangeCursor::new(&self.tier16, 0))
                .chain(RangeCursor::new(&self.tier32, 0)),
        ))
    }

    fn is_empty(&self) -> bool {
        self.tier8.is_empty() && self.tier16.is_empty() && self.tier32.is_empty()
    }

    fn explicit(&self) -> &dyn Subset {
        self
    }

    fn encoding(&self) -> &'static str {
        Ranges::ENCODING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpset_core::CodePointRange;
    use cpset_test_utils::compliance;

    #[test]
    fn lowercase_latin_membership() {
        let s = RangedSubset::from_ranges([('a' as u32, 'z' as u32)]);
        assert!(s.contains('m' as u32));
        assert!(!s.contains('A' as u32));
        assert!(s.contains_char('a'));
        assert!(!s.contains_char('{'));
    }

    #[test]
    fn dispatch_uses_one_tier_per_magnitude() {
        let s = RangedSubset::from_ranges([(0xF0, 0x10F), (0xFFF0, 0x1000F)]);
        assert_eq!(s.tier8().len(), 1);
        assert_eq!(s.tier16().len(), 2);
        assert_eq!(s.tier32().len(), 1);
        for c in [0xF0, 0xFF, 0x100, 0x10F, 0xFFF0, 0xFFFF, 0x10000, 0x1000F] {
            assert!(s.contains(c), "{c:#X}");
        }
        for c in [0xEF, 0x110, 0xFFEF, 0x10010] {
            assert!(!s.contains(c), "{c:#X}");
        }
    }

    #[test]
    fn ranges_merge_across_tier_boundaries() {
        let s = RangedSubset::from_ranges([(0x0, 0x2FF), (0x300, 0x3FF)]);
        let ranges: Vec<_> = s.ranges().collect();
        assert_eq!(ranges, vec![CodePointRange::new(0x0, 0x3FF)]);
    }

    #[test]
    fn default_is_empty() {
        let s = RangedSubset::default();
        assert!(s.is_empty());
        assert!(!s.contains(0));
        assert_eq!(s.ranges().count(), 0);
    }

    #[test]
    fn full_code_space() {
        let s = RangedSubset::from_ranges([(0, cpset_core::MAX_CODE_POINT)]);
        assert!(s.contains(0));
        assert!(s.contains(0xFFFF));
        assert!(s.contains(cpset_core::MAX_CODE_POINT));
        assert_eq!(s.code_point_count(), 0x11_0000);
    }

    #[test]
    fn compliance_full() {
        let s = RangedSubset::from_ranges(cpset_test_utils::tables::MIXED_SCRIPTS.iter().copied());
        compliance::run_full_compliance(&s);
    }

    #[test]
    fn downcast_from_dyn() {
        let s: Box<dyn Subset> = Box::new(RangedSubset::default());
        assert!(s.downcast_ref::<RangedSubset>().is_some());
        assert!(s.downcast_ref::<cpset_core::EmptySubset>().is_none());
    }
}
