//! The `Subset` trait, its range iterator, and `dyn Subset` downcast support.

use std::any::Any;
use std::fmt;

use crate::category::CategoryMask;
use crate::range::{CodePointRange, MutableCodePointRange};

/// Lazy, finite sequence of ranges. Each call to [`Subset::ranges`] yields a
/// fresh one.
pub type RangeIter<'a> = Box<dyn Iterator<Item = CodePointRange> + 'a>;

/// The category terms of a subset. See [`Subset::category_terms`].
pub type TermIter<'a> = Box<dyn Iterator<Item = CategoryTerm<'a>> + 'a>;

/// One category source of a subset: every code point whose category is in
/// `mask`, except those in `carve_out`.
#[derive(Clone, Copy)]
pub struct CategoryTerm<'a> {
    /// Categories included wholesale.
    pub mask: CategoryMask,
    /// Code points removed from this term only.
    pub carve_out: Option<&'a dyn Subset>,
}

impl CategoryTerm<'_> {
    /// Whether this term contributes `code_point`.
    pub fn admits(&self, code_point: u32) -> bool {
        self.mask.matches(code_point) && !self.carve_out.is_some_and(|c| c.contains(code_point))
    }
}

impl fmt::Debug for CategoryTerm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryTerm")
            .field("mask", &self.mask)
            .field("carve_out", &self.carve_out.map(|c| c.ranges().count()))
            .finish()
    }
}

/// Read-only membership test over a subset of the code point space.
///
/// Every encoding implements this trait. A subset is produced once by a
/// builder and never mutated afterwards, so it may be shared across threads
/// without synchronization.
///
/// # Object Safety
///
/// Designed for use as `dyn Subset`. Builders call `downcast_ref` on the
/// trait object to copy known encodings without decoding them range by
/// range.
pub trait Subset: Any + Send + Sync + 'static {
    /// Whether `code_point` is a member. The hot path of every consumer.
    fn contains(&self, code_point: u32) -> bool;

    /// Whether `c` is a member.
    fn contains_char(&self, c: char) -> bool {
        self.contains(c as u32)
    }

    /// The explicit ranges, ascending, disjoint and non-adjacent.
    ///
    /// Members contributed by a category mask are not materialized here.
    fn ranges(&self) -> RangeIter<'_>;

    /// Whether the subset has no members at all.
    fn is_empty(&self) -> bool;

    /// Negation of [`is_empty`](Self::is_empty).
    fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Category sources, each with its own carve-out. A code point is a
    /// member if any term admits it, independent of the explicit ranges.
    fn category_terms(&self) -> TermIter<'_> {
        Box::new(std::iter::empty())
    }

    /// Union of every term's categories.
    fn categories(&self) -> CategoryMask {
        self.category_terms()
            .fold(CategoryMask::EMPTY, |mask, term| mask | term.mask)
    }

    /// The part of this subset that stores explicit ranges.
    ///
    /// Plain encodings return themselves; a category overlay returns the
    /// encoding it wraps. Builders downcast this for their fast path.
    fn explicit(&self) -> &dyn Subset;

    /// Number of code points in the explicit ranges.
    fn code_point_count(&self) -> u64 {
        self.ranges().map(|r| u64::from(r.len())).sum()
    }

    /// Short name of the storage encoding, used in logs.
    fn encoding(&self) -> &'static str;
}

impl dyn Subset {
    /// Attempt to downcast a trait object to a concrete encoding.
    pub fn downcast_ref<T: Subset>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}

impl fmt::Debug for dyn Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subset")
            .field("encoding", &self.encoding())
            .field("ranges", &self.ranges().collect::<Vec<_>>())
            .field("categories", &self.categories())
            .finish()
    }
}

/// Merges consecutive ranges that overlap or touch.
///
/// Encodings store ranges split across tiers or blocks; this adapter turns
/// their sorted output into the minimal sequence. Input must be sorted by
/// start.
#[derive(Clone, Debug)]
pub struct Coalesce<I> {
    inner: I,
    pending: Option<CodePointRange>,
}

impl<I: Iterator<Item = CodePointRange>> Coalesce<I> {
    /// Wrap a sorted range iterator.
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            pending: None,
        }
    }
}

impl<I: Iterator<Item = CodePointRange>> Iterator for Coalesce<I> {
    type Item = CodePointRange;

    fn next(&mut self) -> Option<CodePointRange> {
        let first = self.pending.take().or_else(|| self.inner.next())?;
        let mut cursor = MutableCodePointRange::from(first);
        for r in self.inner.by_ref() {
            if cursor.absorbs(r.start()) {
                cursor.extend_to(r.end());
            } else {
                self.pending = Some(r);
                break;
            }
        }
        Some(cursor.freeze())
    }
}

/// The subset with no members.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptySubset;

impl Subset for EmptySubset {
    fn contains(&self, _code_point: u32) -> bool {
        false
    }

    fn ranges(&self) -> RangeIter<'_> {
        Box::new(std::iter::empty())
    }

    fn is_empty(&self) -> bool {
        true
    }

    fn explicit(&self) -> &dyn Subset {
        self
    }

    fn encoding(&self) -> &'static str {
        "empty"
    }
}
