//! Slab configuration parameters.

use crate::error::ConfigError;

/// Configuration for a [`Slab`](crate::Slab).
///
/// The block size is the only tunable. It is validated at construction and
/// is immutable for the lifetime of the slab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlabConfig {
    /// Capacity of every block, in bytes.
    ///
    /// Default: 67_108_864 (64MB). Also the upper bound on a single
    /// allocation request.
    pub block_size: usize,
}

impl SlabConfig {
    /// Default block size: 64MB.
    pub const DEFAULT_BLOCK_SIZE: usize = 64 * 1024 * 1024;

    /// Smallest accepted block size.
    pub const MIN_BLOCK_SIZE: usize = 1;

    /// Largest accepted block size. Offsets must fit a 32-bit cursor.
    pub const MAX_BLOCK_SIZE: usize = u32::MAX as usize;

    /// Create a config with the given block size in bytes.
    pub fn new(block_size: usize) -> Self {
        Self { block_size }
    }

    /// Check that the block size is within `MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size < Self::MIN_BLOCK_SIZE {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.block_size > Self::MAX_BLOCK_SIZE {
            return Err(ConfigError::BlockSizeTooLarge {
                requested: self.block_size,
                max: Self::MAX_BLOCK_SIZE,
            });
        }
        Ok(())
    }
}

impl Default for SlabConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BLOCK_SIZE)
    }
}
