//! Block-indexed subset encoding for cpset.
//!
//! Code points are split into 256-wide blocks keyed by `code_point >> 8`.
//! [`BlockSubset`] binary searches a sorted key array and then the block's
//! 8-bit ranges; [`BlockRanges`] is the accumulator that builds one. The
//! [`block`] module holds the per-block record and range splitting shared
//! with the hashed encodings.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod ranges;
pub mod subset;

pub use block::Block;
pub use ranges::BlockRanges;
pub use subset::BlockSubset;
