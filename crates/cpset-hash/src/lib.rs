//! Hash-bucketed block encodings for cpset.
//!
//! Blocks (256-wide bands keyed by `code_point >> 8`) are dispatched into a
//! fixed bucket array by `key mod bucket_count`.
//!
//! - [`HashSubset`] / [`HashedBlockRanges`]: configurable bucket count,
//!   small buckets scanned linearly
//! - [`OptimalHashSubset`] / [`OptimalHashedBlockRanges`]: bucket count
//!   derived so each bucket holds at most one block
//!
//! [`HashConfig`] carries the bucket count and is validated when an
//! accumulator is created.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod optimal;
pub mod ranges;
pub mod subset;

pub use config::HashConfig;
pub use error::HashConfigError;
pub use optimal::{optimal_bucket_count, OptimalHashSubset};
pub use ranges::{HashedBlockRanges, OptimalHashedBlockRanges};
pub use subset::HashSubset;
