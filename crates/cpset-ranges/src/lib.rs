//! Flat ranged subset encoding for cpset.
//!
//! [`RangedSubset`] stores a subset as three sorted packed arrays selected by
//! code point magnitude; [`Ranges`] is the accumulator that builds one. Best
//! suited to subsets made of a few long runs, such as script tables.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod ranges;
pub mod subset;

pub use ranges::Ranges;
pub use subset::RangedSubset;
