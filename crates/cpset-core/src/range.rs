//! Inclusive code point ranges.

use std::fmt;

use crate::error::CodePointError;

/// The highest Unicode code point, `U+10FFFF`.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// Validate a raw code point value.
///
/// # Examples
///
/// ```
/// use cpset_core::{check_code_point, CodePointError};
///
/// assert_eq!(check_code_point(0x41), Ok(0x41));
/// assert_eq!(
///     check_code_point(0x110000),
///     Err(CodePointError::OutOfRange { value: 0x110000 })
/// );
/// ```
pub fn check_code_point(value: u32) -> Result<u32, CodePointError> {
    if value > MAX_CODE_POINT {
        return Err(CodePointError::OutOfRange { value });
    }
    Ok(value)
}

/// Panics unless `value` is a code point. Used by infallible entry points.
#[inline]
#[track_caller]
pub fn assert_code_point(value: u32) {
    assert!(
        value <= MAX_CODE_POINT,
        "code point {value:#X} exceeds U+10FFFF"
    );
}

/// An inclusive `[from, to]` range of code points.
///
/// Always normalized: `from <= to <= MAX_CODE_POINT`.
///
/// # Examples
///
/// ```
/// use cpset_core::CodePointRange;
///
/// // Reversed bounds are swapped, not rejected.
/// let r = CodePointRange::new(0x5A, 0x41);
/// assert_eq!((r.start(), r.end()), (0x41, 0x5A));
/// assert_eq!(r.len(), 26);
/// assert!(r.contains(0x4D));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodePointRange {
    from: u32,
    to: u32,
}

impl CodePointRange {
    /// Create a range, swapping the bounds if they are reversed.
    ///
    /// # Panics
    ///
    /// If either bound exceeds `U+10FFFF`.
    #[track_caller]
    pub fn new(from: u32, to: u32) -> Self {
        assert_code_point(from);
        assert_code_point(to);
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        Self { from, to }
    }

    /// Fallible variant of [`new`](Self::new).
    pub fn try_new(from: u32, to: u32) -> Result<Self, CodePointError> {
        check_code_point(from)?;
        check_code_point(to)?;
        Ok(Self::new(from, to))
    }

    /// A range holding a single code point.
    #[track_caller]
    pub fn single(code_point: u32) -> Self {
        Self::new(code_point, code_point)
    }

    /// Range between two chars, in either order.
    pub fn from_chars(a: char, b: char) -> Self {
        Self::new(a as u32, b as u32)
    }

    /// Inclusive lower bound.
    #[inline]
    pub fn start(&self) -> u32 {
        self.from
    }

    /// Inclusive upper bound.
    #[inline]
    pub fn end(&self) -> u32 {
        self.to
    }

    /// Number of code points in the range. Never zero.
    pub fn len(&self) -> u32 {
        self.to - self.from + 1
    }

    /// Always `false`: a range holds at least one code point.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `code_point` lies within the range.
    #[inline]
    pub fn contains(&self, code_point: u32) -> bool {
        self.from <= code_point && code_point <= self.to
    }

    /// Iterate every code point in the range.
    pub fn code_points(&self) -> std::ops::RangeInclusive<u32> {
        self.from..=self.to
    }
}

impl fmt::Debug for CodePointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#X}, {:#X}]", self.from, self.to)
    }
}

impl fmt::Display for CodePointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from == self.to {
            write!(f, "U+{:04X}", self.from)
        } else {
            write!(f, "U+{:04X}..U+{:04X}", self.from, self.to)
        }
    }
}

impl From<CodePointRange> for (u32, u32) {
    fn from(r: CodePointRange) -> Self {
        (r.from, r.to)
    }
}

impl From<std::ops::RangeInclusive<char>> for CodePointRange {
    fn from(r: std::ops::RangeInclusive<char>) -> Self {
        Self::from_chars(*r.start(), *r.end())
    }
}

/// A reusable range cursor.
///
/// Decoders and compaction sweeps overwrite the same value on every step
/// instead of allocating. Callers that need a value past the current step
/// must [`freeze`](Self::freeze) it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MutableCodePointRange {
    /// Inclusive lower bound.
    pub from: u32,
    /// Inclusive upper bound.
    pub to: u32,
}

impl MutableCodePointRange {
    /// Overwrite both bounds.
    #[inline]
    pub fn set(&mut self, from: u32, to: u32) {
        self.from = from;
        self.to = to;
    }

    /// Copy the current value out as an immutable range.
    #[inline]
    pub fn freeze(&self) -> CodePointRange {
        CodePointRange::new(self.from, self.to)
    }

    /// Extend the upper bound to cover `to` if `to` lies beyond it.
    #[inline]
    pub fn extend_to(&mut self, to: u32) {
        if to > self.to {
            self.to = to;
        }
    }

    /// Whether `[from, to]` overlaps or directly follows this range.
    ///
    /// Assumes `from >= self.from`, which holds in a sorted sweep.
    #[inline]
    pub fn absorbs(&self, from: u32) -> bool {
        from <= self.to.saturating_add(1)
    }
}

impl From<CodePointRange> for MutableCodePointRange {
    fn from(r: CodePointRange) -> Self {
        Self {
            from: r.from,
            to: r.to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_swaps_reversed_bounds() {
        let r = CodePointRange::new(0x7A, 0x61);
        assert_eq!(r.start(), 0x61);
        assert_eq!(r.end(), 0x7A);
    }

    #[test]
    #[should_panic(expected = "exceeds U+10FFFF")]
    fn new_panics_beyond_max() {
        let _ = CodePointRange::new(0, 0x110000);
    }

    #[test]
    fn try_new_reports_out_of_range() {
        assert_eq!(
            CodePointRange::try_new(0x110005, 3),
            Err(CodePointError::OutOfRange { value: 0x110005 })
        );
        assert!(CodePointRange::try_new(0, MAX_CODE_POINT).is_ok());
    }

    #[test]
    fn display_uses_unicode_notation() {
        assert_eq!(CodePointRange::single(0x41).to_string(), "U+0041");
        assert_eq!(
            CodePointRange::new(0x41, 0x1F600).to_string(),
            "U+0041..U+1F600"
        );
    }

    #[test]
    fn cursor_absorbs_adjacent_and_extends() {
        let mut cursor = MutableCodePointRange::default();
        cursor.set(0x100, 0x1FF);
        assert!(cursor.absorbs(0x200));
        assert!(!cursor.absorbs(0x201));
        cursor.extend_to(0x2FF);
        cursor.extend_to(0x150);
        assert_eq!(cursor.freeze(), CodePointRange::new(0x100, 0x2FF));
    }
}
