//! Fixed-size owned memory blocks.
//!
//! A [`Block`] is the unit of storage a slab carves allocations from. It is
//! an owned, `BLOCK_ALIGN`-aligned byte buffer obtained from the global
//! allocator and returned to it on drop. The storage address never changes
//! while the block is alive, even if the `Block` value itself is moved.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::ptr::NonNull;

use crate::error::SlabError;

/// Alignment of every block's base address, in bytes.
///
/// Typed allocations may request any alignment up to this value.
pub const BLOCK_ALIGN: usize = 16;

/// One owned, uninitialised buffer of exactly `capacity` usable bytes.
pub(crate) struct Block {
    ptr: NonNull<u8>,
    layout: Layout,
}

// SAFETY: a Block uniquely owns its allocation; nothing else aliases it.
unsafe impl Send for Block {}

impl Block {
    /// Allocate a block of `size` bytes.
    ///
    /// Returns `SlabError::OutOfMemory` if the global allocator refuses.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub(crate) fn new(size: usize) -> Result<Self, SlabError> {
        assert!(size > 0, "blocks must hold at least one byte");
        let layout = Layout::from_size_align(size, BLOCK_ALIGN)
            .map_err(|_| SlabError::OutOfMemory { bytes: size })?;
        // SAFETY: `layout` has a non-zero size.
        let raw = unsafe { alloc::alloc(layout) };
        let ptr = NonNull::new(raw).ok_or(SlabError::OutOfMemory { bytes: size })?;
        Ok(Self { ptr, layout })
    }

    /// Base address of the block's storage.
    #[inline]
    pub(crate) fn as_ptr(&self) -> NonNull<u8> {
        self.ptr
    }

    /// Usable bytes in this block.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.layout.size()
    }
}

impl Drop for Block {
    fn drop(&mut self) {
        // SAFETY: `ptr` was returned by `alloc::alloc` with exactly `layout`
        // and is released only here.
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) };
    }
}
