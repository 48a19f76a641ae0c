//! Include/exclude builder façade.

use std::sync::Arc;

use cpset_block::BlockRanges;
use cpset_core::{
    CategoryMask, CodePointRange, MutableCodePointRange, RangeAccumulator, RangeIter, Subset,
    UnicodeCategory,
};
use cpset_hash::{HashConfig, HashConfigError, HashedBlockRanges, OptimalHashedBlockRanges};
use cpset_ranges::{RangedSubset, Ranges};
use tracing::debug;

use crate::overlay::CategorySubset;

/// Builder over the flat three-tier encoding.
pub type RangedSubsetBuilder = SubsetBuilder<Ranges>;

/// Builder over the block-indexed encoding.
pub type BlockSubsetBuilder = SubsetBuilder<BlockRanges>;

/// Builder over the hash-bucketed block encoding.
pub type HashSubsetBuilder = SubsetBuilder<HashedBlockRanges>;

/// Builder over the one-block-per-bucket hash encoding.
pub type OptimalHashSubsetBuilder = SubsetBuilder<OptimalHashedBlockRanges>;

/// Collects includes and excludes, then produces an immutable subset.
///
/// Every operation is recorded; nothing is subtracted until
/// [`build`](Self::build), so the order of include and exclude calls does
/// not matter: the result is always the union of includes minus the union
/// of excludes. Reversed range bounds are swapped.
///
/// # Panics
///
/// Code point entry points panic on values above `U+10FFFF`.
///
/// # Examples
///
/// ```
/// use cpset_builder::RangedSubsetBuilder;
/// use cpset_core::UnicodeCategory;
///
/// let subset = RangedSubsetBuilder::new()
///     .include_char_range('a', 'z')
///     .include_unicode_category(UnicodeCategory::DecimalDigitNumber)
///     .exclude_char('q')
///     .exclude_code_point('5' as u32)
///     .build();
/// assert!(subset.contains_char('m'));
/// assert!(!subset.contains_char('q'));
/// assert!(subset.contains_char('7'));
/// assert!(!subset.contains_char('5'));
/// ```
#[derive(Debug)]
pub struct SubsetBuilder<A> {
    includes: A,
    excludes: A,
    include_mask: CategoryMask,
    exclude_mask: CategoryMask,
    include_terms: Vec<CarvedTerm>,
    exclude_terms: Vec<CarvedTerm>,
}

/// A category term taken from another subset, with a non-empty carve-out.
#[derive(Debug)]
struct CarvedTerm {
    mask: CategoryMask,
    carve_out: RangedSubset,
}

impl CarvedTerm {
    fn admits(&self, category: UnicodeCategory, code_point: u32) -> bool {
        self.mask.contains(category) && !self.carve_out.contains(code_point)
    }
}

/// Split `subset`'s category terms: carve-free masks are ORed into `mask`,
/// the rest are kept whole.
fn collect_terms(subset: &dyn Subset, mask: &mut CategoryMask, carved: &mut Vec<CarvedTerm>) {
    for term in subset.category_terms() {
        if term.mask.is_empty() {
            continue;
        }
        match term.carve_out.filter(|c| c.is_not_empty()) {
            None => *mask |= term.mask,
            Some(carve_out) => carved.push(CarvedTerm {
                mask: term.mask,
                carve_out: RangedSubset::from_ranges(
                    carve_out.ranges().map(|r| (r.start(), r.end())),
                ),
            }),
        }
    }
}

impl<A: RangeAccumulator + Default> SubsetBuilder<A> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::with_accumulators(A::default(), A::default())
    }
}

impl<A: RangeAccumulator + Default> Default for SubsetBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl SubsetBuilder<HashedBlockRanges> {
    /// Create an empty hash builder with a caller-chosen bucket count.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the bucket count is zero or above
    /// [`HashConfig::MAX_BUCKET_COUNT`].
    pub fn with_config(config: HashConfig) -> Result<Self, HashConfigError> {
        Ok(Self::with_accumulators(
            HashedBlockRanges::with_config(config)?,
            HashedBlockRanges::with_config(config)?,
        ))
    }
}

impl<A: RangeAccumulator> SubsetBuilder<A> {
    /// Create a builder over caller-supplied empty accumulators.
    pub fn with_accumulators(includes: A, excludes: A) -> Self {
        Self {
            includes,
            excludes,
            include_mask: CategoryMask::EMPTY,
            exclude_mask: CategoryMask::EMPTY,
            include_terms: Vec::new(),
            exclude_terms: Vec::new(),
        }
    }

    // ── Includes ────────────────────────────────────────────────

    /// Include one character.
    pub fn include_char(self, c: char) -> Self {
        self.include_code_point(c as u32)
    }

    /// Include every character yielded.
    pub fn include_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        for c in chars {
            self.includes.add_range(c as u32, c as u32);
        }
        self
    }

    /// Include every character of `s`.
    pub fn include_str(self, s: &str) -> Self {
        self.include_chars(s.chars())
    }

    /// Include the characters from `a` to `b`, inclusive.
    pub fn include_char_range(self, a: char, b: char) -> Self {
        self.include_code_point_range(a as u32, b as u32)
    }

    /// Include one code point.
    pub fn include_code_point(self, code_point: u32) -> Self {
        self.include_code_point_range(code_point, code_point)
    }

    /// Include every code point yielded.
    pub fn include_code_points(mut self, code_points: impl IntoIterator<Item = u32>) -> Self {
        for c in code_points {
            self.includes.add_range(c, c);
        }
        self
    }

    /// Include the code points from `from` to `to`, inclusive.
    pub fn include_code_point_range(mut self, from: u32, to: u32) -> Self {
        self.includes.add_range(from, to);
        self
    }

    /// Include a literal range table.
    pub fn include_code_point_ranges(mut self, ranges: &[(u32, u32)]) -> Self {
        for &(from, to) in ranges {
            self.includes.add_range(from, to);
        }
        self
    }

    /// Include another subset: its explicit ranges and each of its
    /// category terms, carve-outs kept per term.
    pub fn include_subset(mut self, subset: &dyn Subset) -> Self {
        self.includes.add_subset(subset);
        collect_terms(subset, &mut self.include_mask, &mut self.include_terms);
        self
    }

    /// Include every subset yielded.
    pub fn include_subsets<'a>(self, subsets: impl IntoIterator<Item = &'a dyn Subset>) -> Self {
        subsets
            .into_iter()
            .fold(self, |builder, subset| builder.include_subset(subset))
    }

    /// Include every code point of a general category.
    pub fn include_unicode_category(mut self, category: UnicodeCategory) -> Self {
        self.include_mask.insert(category);
        self
    }

    /// Include every code point of each category yielded.
    pub fn include_unicode_categories(
        mut self,
        categories: impl IntoIterator<Item = UnicodeCategory>,
    ) -> Self {
        self.include_mask |= categories.into_iter().collect::<CategoryMask>();
        self
    }

    // ── Excludes ────────────────────────────────────────────────

    /// Exclude one character.
    pub fn exclude_char(self, c: char) -> Self {
        self.exclude_code_point(c as u32)
    }

    /// Exclude every character yielded.
    pub fn exclude_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        for c in chars {
            self.excludes.add_range(c as u32, c as u32);
        }
        self
    }

    /// Exclude every character of `s`.
    pub fn exclude_str(self, s: &str) -> Self {
        self.exclude_chars(s.chars())
    }

    /// Exclude the characters from `a` to `b`, inclusive.
    pub fn exclude_char_range(self, a: char, b: char) -> Self {
        self.exclude_code_point_range(a as u32, b as u32)
    }

    /// Exclude one code point.
    pub fn exclude_code_point(self, code_point: u32) -> Self {
        self.exclude_code_point_range(code_point, code_point)
    }

    /// Exclude every code point yielded.
    pub fn exclude_code_points(mut self, code_points: impl IntoIterator<Item = u32>) -> Self {
        for c in code_points {
            self.excludes.add_range(c, c);
        }
        self
    }

    /// Exclude the code points from `from` to `to`, inclusive.
    pub fn exclude_code_point_range(mut self, from: u32, to: u32) -> Self {
        self.excludes.add_range(from, to);
        self
    }

    /// Exclude a literal range table.
    pub fn exclude_code_point_ranges(mut self, ranges: &[(u32, u32)]) -> Self {
        for &(from, to) in ranges {
            self.excludes.add_range(from, to);
        }
        self
    }

    /// Exclude another subset: its explicit ranges and each of its
    /// category terms. Code points a term carves out are not excluded by
    /// that term.
    pub fn exclude_subset(mut self, subset: &dyn Subset) -> Self {
        self.excludes.add_subset(subset);
        collect_terms(subset, &mut self.exclude_mask, &mut self.exclude_terms);
        self
    }

    /// Exclude every subset yielded.
    pub fn exclude_subsets<'a>(self, subsets: impl IntoIterator<Item = &'a dyn Subset>) -> Self {
        subsets
            .into_iter()
            .fold(self, |builder, subset| builder.exclude_subset(subset))
    }

    /// Exclude every code point of a general category.
    pub fn exclude_unicode_category(mut self, category: UnicodeCategory) -> Self {
        self.exclude_mask.insert(category);
        self
    }

    /// Exclude every code point of each category yielded.
    pub fn exclude_unicode_categories(
        mut self,
        categories: impl IntoIterator<Item = UnicodeCategory>,
    ) -> Self {
        self.exclude_mask |= categories.into_iter().collect::<CategoryMask>();
        self
    }
}

impl<A: RangeAccumulator + Clone> SubsetBuilder<A> {
    /// Subtract excludes from includes and freeze the result.
    ///
    /// A category touched by any excluded term is cleared from every
    /// included term. Members of such a category that every excluding term
    /// carves out, and that an included term admits, become explicit
    /// ranges instead. Then, in order: compact excludes, subtract them from
    /// the include ranges, remove include code points an excluded term
    /// admits, compact. Each remaining category term gets the exclude set
    /// plus its own carve-out as its carve-out.
    ///
    /// The result is the plain encoding when no category bits remain, a
    /// [`CategorySubset`] otherwise.
    pub fn build(self) -> Arc<dyn Subset> {
        let Self {
            mut includes,
            mut excludes,
            include_mask,
            exclude_mask,
            include_terms,
            exclude_terms,
        } = self;

        let cleared = exclude_terms
            .iter()
            .fold(exclude_mask, |acc, term| acc | term.mask);
        let excluded = |category: UnicodeCategory, c: u32| {
            exclude_mask.contains(category) || exclude_terms.iter().any(|t| t.admits(category, c))
        };
        let admitted = |category: UnicodeCategory, c: u32| {
            include_mask.contains(category) || include_terms.iter().any(|t| t.admits(category, c))
        };

        let mut rescued = 0usize;
        for term in &exclude_terms {
            for c in term.carve_out.ranges().flat_map(|r| r.code_points()) {
                let category = UnicodeCategory::of(c);
                if cleared.contains(category) && admitted(category, c) && !excluded(category, c) {
                    includes.add_range(c, c);
                    rescued += 1;
                }
            }
        }

        excludes.compact();
        let mut exclude_ranges = 0usize;
        for r in excludes.ranges() {
            includes.remove_range(r.start(), r.end());
            exclude_ranges += 1;
        }

        let mut removed_by_category = 0u64;
        if !cleared.is_empty() {
            includes.compact();
            let doomed = matching_runs(includes.ranges(), |c| {
                let category = UnicodeCategory::of(c);
                cleared.contains(category) && excluded(category, c)
            });
            for r in doomed {
                includes.remove_range(r.start(), r.end());
                removed_by_category += u64::from(r.len());
            }
        }
        includes.compact();

        let mut terms = Vec::new();
        let own = include_mask.without(cleared);
        if !own.is_empty() {
            terms.push((own, carve_out_of(&excludes, None)));
        }
        for term in &include_terms {
            let mask = term.mask.without(cleared);
            if !mask.is_empty() {
                terms.push((mask, carve_out_of(&excludes, Some(&term.carve_out))));
            }
        }
        let categories = terms
            .iter()
            .fold(CategoryMask::EMPTY, |acc, (mask, _)| acc | *mask);
        debug!(
            encoding = A::ENCODING,
            exclude_ranges,
            removed_by_category,
            rescued,
            terms = terms.len(),
            categories = ?categories,
            "built subset"
        );

        if terms.is_empty() {
            return Arc::new(includes.finish());
        }
        Arc::new(CategorySubset::with_terms(includes.finish(), terms))
    }
}

/// Carve-out of one category term: the compacted exclude set plus the
/// term's own carve-out, or `None` when both are empty.
fn carve_out_of<A: RangeAccumulator + Clone>(
    excludes: &A,
    own: Option<&RangedSubset>,
) -> Option<A::Output> {
    let mut carve_out = excludes.clone();
    if let Some(own) = own {
        carve_out.add_subset(own);
    }
    if carve_out.is_empty() {
        None
    } else {
        Some(carve_out.finish())
    }
}

/// Maximal runs of code points within `ranges` that satisfy `hit`.
fn matching_runs(ranges: RangeIter<'_>, hit: impl Fn(u32) -> bool) -> Vec<CodePointRange> {
    let mut runs = Vec::new();
    let mut run: Option<MutableCodePointRange> = None;
    for r in ranges {
        for c in r.code_points() {
            if !hit(c) {
                continue;
            }
            match run.as_mut() {
                Some(cursor) if cursor.absorbs(c) => cursor.extend_to(c),
                _ => {
                    runs.extend(run.take().map(|cursor| cursor.freeze()));
                    run = Some(MutableCodePointRange { from: c, to: c });
                }
            }
        }
    }
    runs.extend(run.map(|cursor| cursor.freeze()));
    runs
}
