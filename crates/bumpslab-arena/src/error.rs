//! Slab-specific error types.
//!
//! Only recoverable conditions live here. Contract violations (oversized
//! requests, shrinking past the active block's offset) are programming
//! errors and panic instead.

use thiserror::Error;

/// Errors that can occur while constructing or growing a [`Slab`](crate::Slab).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SlabError {
    /// The system allocator could not provide a new block.
    ///
    /// The slab is left exactly as it was before the failing call.
    #[error("out of memory: could not allocate a {bytes} byte block")]
    OutOfMemory {
        /// Size of the block that was requested.
        bytes: usize,
    },
    /// The configuration was rejected before any block was allocated.
    #[error("invalid slab configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Reasons a [`SlabConfig`](crate::SlabConfig) fails validation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Blocks must hold at least one byte.
    #[error("block size must be non-zero")]
    ZeroBlockSize,
    /// Offsets within a block are tracked as 32-bit values.
    #[error("block size {requested} exceeds the maximum of {max} bytes")]
    BlockSizeTooLarge {
        /// The requested block size.
        requested: usize,
        /// The largest accepted block size.
        max: usize,
    },
}
