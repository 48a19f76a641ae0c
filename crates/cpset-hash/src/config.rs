//! Hash table configuration.

use crate::error::HashConfigError;

/// Configuration for a hash-bucketed block encoding.
///
/// Validated when handed to an accumulator; immutable afterwards. The
/// bucket count is fixed for the lifetime of the table, there is no
/// rehashing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashConfig {
    /// Number of buckets blocks are spread over by `key mod bucket_count`.
    ///
    /// Default: 64. Must be in `1..=0x1100`.
    pub bucket_count: u32,
}

impl HashConfig {
    /// Default bucket count.
    pub const DEFAULT_BUCKET_COUNT: u32 = 64;

    /// One bucket per possible block key (`0x10FFFF >> 8` plus one).
    pub const MAX_BUCKET_COUNT: u32 = 0x1100;

    /// Config with the given bucket count. Not validated until used.
    pub fn new(bucket_count: u32) -> Self {
        Self { bucket_count }
    }

    /// Check the bucket count is usable.
    pub fn validate(&self) -> Result<(), HashConfigError> {
        if self.bucket_count == 0 {
            return Err(HashConfigError::ZeroBuckets);
        }
        if self.bucket_count > Self::MAX_BUCKET_COUNT {
            return Err(HashConfigError::TooManyBuckets {
                requested: self.bucket_count,
                max: Self::MAX_BUCKET_COUNT,
            });
        }
        Ok(())
    }
}

impl Default for HashConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUCKET_COUNT)
    }
}

/// Bucket slot for `key` in a table of `bucket_count` buckets.
#[inline]
pub fn bucket_index(key: u32, bucket_count: u32) -> usize {
    debug_assert!(bucket_count > 0);
    ((key & 0x7FFF_FFFF) % bucket_count) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = HashConfig::default();
        assert_eq!(config.bucket_count, 64);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_buckets_rejected() {
        assert_eq!(
            HashConfig::new(0).validate(),
            Err(HashConfigError::ZeroBuckets)
        );
    }

    #[test]
    fn too_many_buckets_rejected() {
        let err = HashConfig::new(0x1101).validate().unwrap_err();
        assert_eq!(
            err,
            HashConfigError::TooManyBuckets {
                requested: 0x1101,
                max: 0x1100
            }
        );
        assert_eq!(err.to_string(), "bucket count 4353 exceeds maximum 4352");
    }

    #[test]
    fn max_is_accepted() {
        assert!(HashConfig::new(HashConfig::MAX_BUCKET_COUNT).validate().is_ok());
    }

    #[test]
    fn index_wraps_by_modulus() {
        assert_eq!(bucket_index(0x41, 64), 1);
        assert_eq!(bucket_index(0x10FF, 0x1100), 0x10FF);
        assert_eq!(bucket_index(7, 1), 0);
    }
}
