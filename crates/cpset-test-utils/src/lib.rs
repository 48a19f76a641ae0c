//! Test utilities for cpset development.
//!
//! Provides trait compliance assertions shared by every encoding
//! ([`compliance`]), a reference model with proptest strategies for
//! property tests ([`model`]), and sample code point tables ([`tables`]).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod compliance;
pub mod model;
pub mod tables;
