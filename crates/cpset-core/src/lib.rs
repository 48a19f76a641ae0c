//! Core types and traits for cpset.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! pieces every encoding is built from:
//!
//! - [`CodePointRange`] and the reusable [`MutableCodePointRange`] cursor
//! - the packed range [`codec`]: three word widths, binary search, decoding
//! - [`PackedRanges`], the growable per-tier array accumulators compose
//! - the [`Subset`] query trait and the [`RangeAccumulator`] build trait
//! - [`UnicodeCategory`] classification and the [`CategoryMask`] bitset

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod accumulator;
pub mod category;
pub mod codec;
pub mod error;
pub mod packed;
pub mod range;
pub mod subset;

pub use accumulator::{normalize, RangeAccumulator};
pub use category::{CategoryMask, UnicodeCategory};
pub use codec::{contains_in, PackedRange, RangeCursor};
pub use error::CodePointError;
pub use packed::PackedRanges;
pub use range::{
    assert_code_point, check_code_point, CodePointRange, MutableCodePointRange, MAX_CODE_POINT,
};
pub use subset::{CategoryTerm, Coalesce, EmptySubset, RangeIter, Subset, TermIter};
