//! Error types for code point validation.

use std::error::Error;
use std::fmt;

use crate::range::MAX_CODE_POINT;

/// Errors from the fallible code point and range constructors.
///
/// Builders never return this: they treat out-of-range input as a
/// contract violation and panic. The `try_*` constructors exist for
/// callers that receive numbers from untrusted sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodePointError {
    /// The value lies above `U+10FFFF`.
    OutOfRange {
        /// The offending value.
        value: u32,
    },
}

impl fmt::Display for CodePointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { value } => write!(
                f,
                "code point {value:#X} is outside the Unicode range [0x0, {MAX_CODE_POINT:#X}]"
            ),
        }
    }
}

impl Error for CodePointError {}
