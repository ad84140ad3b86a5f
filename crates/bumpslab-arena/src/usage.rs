//! Process-wide memory accounting for slab blocks.
//!
//! Every block a [`Slab`](crate::Slab) creates adds its size to a
//! [`MemoryUsage`] counter, and every block it releases subtracts it again.
//! The counter is read by telemetry only; it never gates allocation.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Atomic byte counter shared between slabs.
///
/// All operations use `Ordering::Relaxed`: the value has no ordering
/// relationship with the memory it describes.
#[derive(Debug, Default)]
pub struct MemoryUsage {
    bytes: AtomicUsize,
}

impl MemoryUsage {
    /// Create a counter starting at zero.
    pub const fn new() -> Self {
        Self {
            bytes: AtomicUsize::new(0),
        }
    }

    /// Record `bytes` newly held.
    #[inline]
    pub fn add(&self, bytes: usize) {
        self.bytes.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record `bytes` released.
    #[inline]
    pub fn sub(&self, bytes: usize) {
        self.bytes.fetch_sub(bytes, Ordering::Relaxed);
    }

    /// Bytes currently held by every block reporting into this counter.
    #[inline]
    pub fn get(&self) -> usize {
        self.bytes.load(Ordering::Relaxed)
    }
}

/// The process-wide counter. Slabs report here unless built with
/// [`Slab::with_counter`](crate::Slab::with_counter).
pub static MEMORY_USAGE: MemoryUsage = MemoryUsage::new();

/// Total bytes held by live blocks of all slabs using [`MEMORY_USAGE`].
pub fn memory_usage() -> usize {
    MEMORY_USAGE.get()
}
