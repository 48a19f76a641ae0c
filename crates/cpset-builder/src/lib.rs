//! Subset builders and the Unicode category overlay for cpset.
//!
//! [`SubsetBuilder`] records include and exclude operations over
//! characters, code points, ranges, categories and other subsets, then
//! [`build`](SubsetBuilder::build)s an immutable, shareable subset in the
//! chosen encoding. Subsets that keep category bits are wrapped in a
//! [`CategorySubset`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod overlay;

pub use builder::{
    BlockSubsetBuilder, HashSubsetBuilder, OptimalHashSubsetBuilder, RangedSubsetBuilder,
    SubsetBuilder,
};
pub use overlay::CategorySubset;
