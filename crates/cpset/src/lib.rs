//! cpset: compact membership sets over the Unicode code point space.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all cpset sub-crates. For most users, adding `cpset` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use cpset::prelude::*;
//!
//! // Letters of a username alphabet: ASCII lowercase, any decimal digit,
//! // and the underscore, but never the look-alike digit zero.
//! let alphabet = BlockSubsetBuilder::new()
//!     .include_char_range('a', 'z')
//!     .include_char('_')
//!     .include_unicode_category(UnicodeCategory::DecimalDigitNumber)
//!     .exclude_char('0')
//!     .build();
//!
//! assert!("user_42".chars().all(|c| alphabet.contains_char(c)));
//! assert!(!alphabet.contains_char('0'));
//! assert!(!alphabet.contains_char('A'));
//!
//! // Explicit ranges are enumerable; category members are not.
//! let ranges: Vec<_> = alphabet.ranges().collect();
//! assert_eq!(ranges.len(), 2);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `cpset-core` | Ranges, range codec, `Subset` and accumulator traits, categories |
//! | [`ranges`] | `cpset-ranges` | Flat three-tier encoding |
//! | [`block`] | `cpset-block` | Block-indexed encoding |
//! | [`hash`] | `cpset-hash` | Hash-bucketed and optimal hash encodings |
//! | [`builder`] | `cpset-builder` | Builders and the category overlay |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`cpset-core`).
///
/// Contains [`types::CodePointRange`], the packed range
/// [`codec`](types::codec), the [`types::Subset`] and
/// [`types::RangeAccumulator`] traits, and Unicode category classification.
pub use cpset_core as types;

/// Flat three-tier range encoding (`cpset-ranges`).
pub use cpset_ranges as ranges;

/// Block-indexed encoding (`cpset-block`).
///
/// [`block::BlockSubset`] and its accumulator [`block::BlockRanges`].
pub use cpset_block as block;

/// Hash-bucketed block encodings (`cpset-hash`).
///
/// [`hash::HashSubset`] with a configurable bucket count and
/// [`hash::OptimalHashSubset`] with one block per bucket.
pub use cpset_hash as hash;

/// Subset builders and the category overlay (`cpset-builder`).
pub use cpset_builder as builder;

/// Common imports for typical cpset usage.
///
/// ```rust
/// use cpset::prelude::*;
/// ```
///
/// This imports the builders, the `Subset` trait, range and category
/// types, and the encodings.
pub mod prelude {
    // Core types and traits
    pub use cpset_core::{
        CategoryMask, CodePointError, CodePointRange, RangeAccumulator, Subset, UnicodeCategory,
        MAX_CODE_POINT,
    };

    // Encodings
    pub use cpset_block::BlockSubset;
    pub use cpset_hash::{HashConfig, HashConfigError, HashSubset, OptimalHashSubset};
    pub use cpset_ranges::RangedSubset;

    // Builders
    pub use cpset_builder::{
        BlockSubsetBuilder, CategorySubset, HashSubsetBuilder, OptimalHashSubsetBuilder,
        RangedSubsetBuilder, SubsetBuilder,
    };
}
