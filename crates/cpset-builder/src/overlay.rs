//! Category overlay over any encoding.

use cpset_core::{CategoryMask, CategoryTerm, RangeIter, Subset, TermIter, UnicodeCategory};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Term<S> {
    mask: CategoryMask,
    carve_out: Option<S>,
}

/// An encoding plus one or more category terms.
///
/// A code point is a member if the wrapped encoding contains it, or if some
/// term admits it: its category is in the term's mask and the term's
/// carve-out does not contain it. Each carve-out holds code points excluded
/// from that term only; it is never consulted on the explicit path.
///
/// `ranges()` yields the wrapped encoding's explicit ranges only; category
/// members are never materialized.
///
/// # Examples
///
/// ```
/// use cpset_builder::CategorySubset;
/// use cpset_core::{CategoryMask, Subset, UnicodeCategory};
/// use cpset_ranges::RangedSubset;
///
/// let digits = CategoryMask::from(UnicodeCategory::DecimalDigitNumber);
/// let s = CategorySubset::new(RangedSubset::from_ranges([(0x41, 0x5A)]), digits, None);
/// assert!(s.contains('Q' as u32));
/// assert!(s.contains('7' as u32));
/// assert!(s.contains(0x0663)); // ARABIC-INDIC DIGIT THREE
/// assert!(!s.contains('q' as u32));
/// assert_eq!(s.ranges().count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategorySubset<S> {
    base: S,
    terms: Box<[Term<S>]>,
    mask: CategoryMask,
}

impl<S: Subset> CategorySubset<S> {
    /// Wrap `base` with a single category term.
    pub fn new(base: S, mask: CategoryMask, carve_out: Option<S>) -> Self {
        Self::with_terms(base, [(mask, carve_out)])
    }

    /// Wrap `base` with any number of `(mask, carve-out)` terms. Terms with
    /// an empty mask are dropped.
    pub fn with_terms(
        base: S,
        terms: impl IntoIterator<Item = (CategoryMask, Option<S>)>,
    ) -> Self {
        let terms: Box<[Term<S>]> = terms
            .into_iter()
            .filter(|(mask, _)| !mask.is_empty())
            .map(|(mask, carve_out)| Term { mask, carve_out })
            .collect();
        let mask = terms
            .iter()
            .fold(CategoryMask::EMPTY, |acc, term| acc | term.mask);
        Self { base, terms, mask }
    }

    /// The wrapped encoding.
    pub fn base(&self) -> &S {
        &self.base
    }

    /// Number of category terms.
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}

impl<S: Subset> Subset for CategorySubset<S> {
    #[inline]
    fn contains(&self, code_point: u32) -> bool {
        if self.base.contains(code_point) {
            return true;
        }
        if self.mask.is_empty() {
            return false;
        }
        let category = UnicodeCategory::of(code_point);
        self.terms.iter().any(|term| {
            term.mask.contains(category)
                && !term
                    .carve_out
                    .as_ref()
                    .is_some_and(|c| c.contains(code_point))
        })
    }

    fn ranges(&self) -> RangeIter<'_> {
        self.base.ranges()
    }

    fn is_empty(&self) -> bool {
        self.base.is_empty() && self.mask.is_empty()
    }

    fn category_terms(&self) -> TermIter<'_> {
        Box::new(self.terms.iter().map(|term| CategoryTerm {
            mask: term.mask,
            carve_out: term.carve_out.as_ref().map(|c| c as &dyn Subset),
        }))
    }

    fn categories(&self) -> CategoryMask {
        self.mask
    }

    fn explicit(&self) -> &dyn Subset {
        &self.base
    }

    fn encoding(&self) -> &'static str {
        self.base.encoding()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpset_block::BlockSubset;
    use cpset_ranges::RangedSubset;
    use cpset_test_utils::compliance;

    fn digits() -> CategoryMask {
        CategoryMask::from(UnicodeCategory::DecimalDigitNumber)
    }

    fn only(c: char) -> RangedSubset {
        RangedSubset::from_ranges([(c as u32, c as u32)])
    }

    #[test]
    fn carve_out_blocks_category_path_only() {
        let base = RangedSubset::from_ranges([('5' as u32, '5' as u32), (0x41, 0x5A)]);
        let carve = RangedSubset::from_ranges([('5' as u32, '5' as u32), ('A' as u32, 'A' as u32)]);
        let s = CategorySubset::new(base, digits(), Some(carve));
        // Explicit ranges win over the carve-out.
        assert!(s.contains('5' as u32));
        assert!(s.contains('A' as u32));
        assert!(s.contains('7' as u32));

        let s = CategorySubset::new(RangedSubset::default(), digits(), Some(only('5')));
        assert!(!s.contains('5' as u32));
        assert!(s.contains('4' as u32));
    }

    #[test]
    fn carve_out_is_local_to_its_term() {
        let s = CategorySubset::with_terms(
            RangedSubset::default(),
            [(digits(), Some(only('5'))), (digits(), None)],
        );
        assert!(s.contains('5' as u32));
        assert_eq!(s.term_count(), 2);

        let lower = CategoryMask::from(UnicodeCategory::LowercaseLetter);
        let s = CategorySubset::with_terms(
            RangedSubset::default(),
            [(digits(), Some(only('5'))), (lower, Some(only('q')))],
        );
        assert!(!s.contains('5' as u32));
        assert!(!s.contains('q' as u32));
        assert!(s.contains('6' as u32));
        assert!(s.contains('r' as u32));
        assert_eq!(s.categories(), digits() | lower);
    }

    #[test]
    fn empty_terms_are_dropped() {
        let s = CategorySubset::with_terms(
            RangedSubset::default(),
            [(CategoryMask::EMPTY, Some(only('5'))), (digits(), None)],
        );
        assert_eq!(s.term_count(), 1);
        let dynamic: &dyn Subset = &s;
        let terms: Vec<_> = dynamic.category_terms().collect();
        assert_eq!(terms.len(), 1);
        assert!(terms[0].carve_out.is_none());
    }

    #[test]
    fn mask_only_is_not_empty_but_has_no_ranges() {
        let s = CategorySubset::new(BlockSubset::default(), digits(), None);
        assert!(s.is_not_empty());
        assert_eq!(s.ranges().count(), 0);
        assert_eq!(s.code_point_count(), 0);
        compliance::run_full_compliance(&s);
    }

    #[test]
    fn explicit_is_the_base_encoding() {
        let s = CategorySubset::new(BlockSubset::from_ranges([(0x41, 0x5A)]), digits(), None);
        let dynamic: &dyn Subset = &s;
        assert!(dynamic.explicit().downcast_ref::<BlockSubset>().is_some());
        assert!(dynamic.downcast_ref::<BlockSubset>().is_none());
        assert_eq!(dynamic.categories(), digits());
        assert!(dynamic.category_terms().all(|t| t.carve_out.is_none()));
    }

    #[test]
    fn empty_mask_and_base_is_empty() {
        let s = CategorySubset::new(RangedSubset::default(), CategoryMask::EMPTY, None);
        assert!(s.is_empty());
        assert_eq!(s.term_count(), 0);
        assert!(!s.contains('7' as u32));
    }
}
