//! Hash encoding configuration errors.

use std::error::Error;
use std::fmt;

/// Errors from validating a [`HashConfig`](crate::HashConfig).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HashConfigError {
    /// A bucket count of zero leaves nowhere to place a block.
    ZeroBuckets,
    /// More buckets than there are blocks in the code space.
    TooManyBuckets {
        /// The bucket count asked for.
        requested: u32,
        /// The largest accepted bucket count.
        max: u32,
    },
}

impl fmt::Display for HashConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroBuckets => write!(f, "bucket count must be at least 1"),
            Self::TooManyBuckets { requested, max } => {
                write!(f, "bucket count {requested} exceeds maximum {max}")
            }
        }
    }
}

impl Error for HashConfigError {}
