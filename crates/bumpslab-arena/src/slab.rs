//! The fixed-block-size bump arena.
//!
//! A [`Slab`] owns an ordered list of equally sized blocks. Allocations
//! are carved from the last ("active") block by bumping an offset. A request
//! that does not fit in the active block's remaining space goes to a freshly
//! appended block; the old block's tail is abandoned, never revisited.
//!
//! Memory is only released in bulk: [`Slab::reset`] drops every block but
//! the first, and dropping the slab releases everything.

#![allow(unsafe_code)]

use std::alloc::Layout;
use std::cell::{Cell, UnsafeCell};
use std::fmt;
use std::mem::MaybeUninit;
use std::ptr::NonNull;
use std::slice;

use tracing::{debug, trace};

use crate::block::{Block, BLOCK_ALIGN};
use crate::config::SlabConfig;
use crate::error::SlabError;
use crate::usage::{MemoryUsage, MEMORY_USAGE};

/// Bump arena over a chain of fixed-size blocks.
///
/// Every view handed out borrows the slab for as long as it is used. This
/// is a hard invariant of the type: while any view is alive the slab can be
/// neither reset, shrunk through [`unalloc`](Slab::unalloc), moved nor
/// dropped. `Slab` implements neither `Clone` nor `Copy`.
///
/// ```compile_fail
/// use bumpslab_arena::Slab;
///
/// let mut slab = Slab::with_block_size(64).unwrap();
/// let view = slab.alloc::<u32>(7).unwrap();
/// slab.reset();
/// *view = 8;
/// ```
///
/// ```compile_fail
/// use bumpslab_arena::Slab;
///
/// let slab = Slab::with_block_size(64).unwrap();
/// let view = slab.alloc::<u32>(7).unwrap();
/// let moved = slab;
/// *view = 8;
/// ```
///
/// Allocation takes `&self`, so `Slab` is deliberately `!Sync`: use one slab
/// per producer thread. It is `Send`, so a thread can take ownership of one.
///
/// Values placed in the slab are never dropped. Types with a meaningful
/// `Drop` leak their resources when the slab is reset or dropped.
pub struct Slab {
    block_size: usize,
    /// Owned blocks. Index 0 lives until the slab is dropped.
    blocks: UnsafeCell<Vec<Block>>,
    /// Base of the active block, always `blocks.last()`.
    active: Cell<NonNull<u8>>,
    /// Bytes consumed in the active block. Never exceeds `block_size`.
    offset: Cell<usize>,
    usage: &'static MemoryUsage,
}

// SAFETY: the slab exclusively owns its blocks and `active` only ever points
// into one of them. Views borrow the slab, so it cannot be sent while any are
// alive.
unsafe impl Send for Slab {}

impl Slab {
    /// Create a slab with one block, reporting into [`MEMORY_USAGE`].
    pub fn new(config: SlabConfig) -> Result<Self, SlabError> {
        Self::with_counter(config, &MEMORY_USAGE)
    }

    /// Shorthand for `Slab::new(SlabConfig::new(block_size))`.
    pub fn with_block_size(block_size: usize) -> Result<Self, SlabError> {
        Self::new(SlabConfig::new(block_size))
    }

    /// Create a slab with one block, reporting into `usage`.
    ///
    /// Fails with `SlabError::InvalidConfig` before allocating anything if
    /// the config is rejected, or with `SlabError::OutOfMemory` if the first
    /// block cannot be allocated.
    pub fn with_counter(
        config: SlabConfig,
        usage: &'static MemoryUsage,
    ) -> Result<Self, SlabError> {
        config.validate()?;
        let block_size = config.block_size;
        let first = Block::new(block_size)?;
        let active = first.as_ptr();
        let blocks = vec![first];
        usage.add(block_size);
        debug!(block_size, "slab created");
        Ok(Self {
            block_size,
            blocks: UnsafeCell::new(blocks),
            active: Cell::new(active),
            offset: Cell::new(0),
            usage,
        })
    }

    /// Reserve `size` bytes with no alignment requirement.
    ///
    /// The returned bytes are uninitialised and never overlap any other live
    /// view. If the active block lacks room, a new block is appended first.
    ///
    /// # Panics
    ///
    /// Panics if `size` exceeds the block size.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_raw(&self, size: usize) -> Result<&mut [MaybeUninit<u8>], SlabError> {
        let ptr = self.bump(size, 1)?;
        // SAFETY: `bump` reserved `size` bytes inside a live block that no
        // other view covers; the block outlives the `&self` borrow.
        Ok(unsafe { slice::from_raw_parts_mut(ptr.as_ptr().cast::<MaybeUninit<u8>>(), size) })
    }

    /// Reserve aligned, uninitialised storage for one `T`.
    ///
    /// For callers that fill every field themselves.
    ///
    /// # Panics
    ///
    /// Panics if `T` is larger than a block, or if `T` is aligned beyond
    /// [`BLOCK_ALIGN`](crate::BLOCK_ALIGN) and its size plus the padding a
    /// fresh block may need exceeds the block size.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_uninit<T>(&self) -> Result<&mut MaybeUninit<T>, SlabError> {
        let ptr = self.alloc_layout(Layout::new::<T>())?;
        // SAFETY: the region is sized and aligned for `T` and exclusively ours.
        Ok(unsafe { &mut *ptr.cast::<MaybeUninit<T>>().as_ptr() })
    }

    /// Move `value` into the slab.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc<T>(&self, value: T) -> Result<&mut T, SlabError> {
        Ok(self.alloc_uninit::<T>()?.write(value))
    }

    /// Allocate one default-initialised `T`.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_init<T: Default>(&self) -> Result<&mut T, SlabError> {
        self.alloc(T::default())
    }

    /// Reserve aligned, uninitialised storage for `count` contiguous `T`s.
    ///
    /// # Panics
    ///
    /// Panics if the array is larger than a block (including when its size
    /// overflows), or if the array plus the padding a fresh block may need
    /// for `T`'s alignment exceeds the block size.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_slice_uninit<T>(&self, count: usize) -> Result<&mut [MaybeUninit<T>], SlabError> {
        let layout = match Layout::array::<T>(count) {
            Ok(layout) => layout,
            Err(_) => panic!(
                "array of {count} elements exceeds block size of {} bytes",
                self.block_size
            ),
        };
        let ptr = self.alloc_layout(layout)?;
        // SAFETY: the region holds `count` properly aligned `T` slots.
        Ok(unsafe { slice::from_raw_parts_mut(ptr.cast::<MaybeUninit<T>>().as_ptr(), count) })
    }

    /// Allocate `count` default-initialised `T`s.
    #[allow(clippy::mut_from_ref)]
    pub fn alloc_slice_init<T: Default>(&self, count: usize) -> Result<&mut [T], SlabError> {
        let slots = self.alloc_slice_uninit::<T>(count)?;
        for slot in slots.iter_mut() {
            slot.write(T::default());
        }
        // SAFETY: every slot was initialised above.
        Ok(unsafe { &mut *(slots as *mut [MaybeUninit<T>] as *mut [T]) })
    }

    /// Roll back the most recent `size` bytes of the active block.
    ///
    /// Following `alloc_raw(n)` with `unalloc(n)` makes the next allocation
    /// start at the same address again. Rolling back across a block boundary
    /// is not possible: only bytes of the active block can be returned.
    ///
    /// # Panics
    ///
    /// Panics if `size` exceeds the bytes allocated in the active block.
    pub fn unalloc(&mut self, size: usize) {
        self.shrink(size);
    }

    /// [`unalloc`](Slab::unalloc) for callers still holding other views.
    ///
    /// # Safety
    ///
    /// The caller must no longer use any view overlapping the last `size`
    /// bytes of the active block; those bytes will be handed out again.
    ///
    /// # Panics
    ///
    /// Panics if `size` exceeds the bytes allocated in the active block.
    pub unsafe fn unalloc_shared(&self, size: usize) {
        self.shrink(size);
    }

    /// Release every block but the first and rewind to its start.
    ///
    /// The first block's storage is kept, so a reset slab behaves like a
    /// fresh one without paying for a new allocation.
    pub fn reset(&mut self) {
        let blocks = self.blocks.get_mut();
        let released = blocks.len() - 1;
        if released > 0 {
            self.usage.sub(self.block_size * released);
            blocks.truncate(1);
            debug!(
                released,
                bytes = self.block_size * released,
                "slab reset"
            );
        }
        self.active.set(blocks[0].as_ptr());
        self.offset.set(0);
    }

    /// Capacity of every block in bytes.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of blocks currently owned.
    pub fn block_count(&self) -> usize {
        self.blocks().len()
    }

    /// Bytes consumed in the active block.
    pub fn offset(&self) -> usize {
        self.offset.get()
    }

    /// Bytes still free in the active block.
    pub fn remaining(&self) -> usize {
        self.block_size - self.offset.get()
    }

    /// Total bytes owned across all blocks.
    pub fn memory_bytes(&self) -> usize {
        self.blocks().iter().map(Block::capacity).sum()
    }

    /// The counter this slab reports into.
    pub fn counter(&self) -> &'static MemoryUsage {
        self.usage
    }

    fn blocks(&self) -> &Vec<Block> {
        // SAFETY: the only mutable access through `&self` is inside `grow`,
        // which never runs while this borrow is alive.
        unsafe { &*self.blocks.get() }
    }

    fn alloc_layout(&self, layout: Layout) -> Result<NonNull<u8>, SlabError> {
        self.bump(layout.size(), layout.align())
    }

    /// Reserve `size` bytes aligned to `align`, growing if needed.
    fn bump(&self, size: usize, align: usize) -> Result<NonNull<u8>, SlabError> {
        assert!(
            size <= self.block_size,
            "allocation of {size} bytes exceeds block size of {} bytes",
            self.block_size
        );
        // Block bases are only BLOCK_ALIGN-aligned, so a fresh block may
        // need up to `align - BLOCK_ALIGN` bytes of padding.
        let worst_padding = align.saturating_sub(BLOCK_ALIGN);
        assert!(
            size.checked_add(worst_padding)
                .is_some_and(|need| need <= self.block_size),
            "allocation of {size} bytes aligned to {align} cannot fit a {} byte block",
            self.block_size
        );

        let offset = self.offset.get();
        let start = match self.aligned_start(offset, size, align) {
            Some(start) => start,
            None => {
                self.grow(offset)?;
                match self.aligned_start(0, size, align) {
                    Some(start) => start,
                    None => unreachable!("a fresh block fits every size-checked request"),
                }
            }
        };

        // SAFETY: `start + size <= block_size`, so the range lies inside the
        // active block's allocation.
        let ptr = unsafe { self.active.get().add(start) };
        self.offset.set(start + size);
        Ok(ptr)
    }

    /// First offset at or after `offset` whose address in the active block
    /// is `align`-aligned and leaves room for `size` bytes.
    fn aligned_start(&self, offset: usize, size: usize, align: usize) -> Option<usize> {
        let base = self.active.get().as_ptr() as usize;
        let start = base.checked_add(offset)?.checked_next_multiple_of(align)? - base;
        start
            .checked_add(size)
            .filter(|&end| end <= self.block_size)
            .map(|_| start)
    }

    /// Append a fresh block and make it active.
    ///
    /// Either the block is fully committed (stored, counted and active) or
    /// an error is returned with the slab untouched.
    fn grow(&self, abandoned_from: usize) -> Result<(), SlabError> {
        // SAFETY: no other reference to the block list is alive during this
        // call. Views point into block storage, which `push` never moves.
        let blocks = unsafe { &mut *self.blocks.get() };
        blocks
            .try_reserve(1)
            .map_err(|_| SlabError::OutOfMemory {
                bytes: self.block_size,
            })?;
        let block = Block::new(self.block_size).inspect_err(|_| {
            debug!(
                block_size = self.block_size,
                blocks = blocks.len(),
                "slab block allocation failed"
            );
        })?;

        self.usage.add(self.block_size);
        self.active.set(block.as_ptr());
        blocks.push(block);
        self.offset.set(0);
        trace!(
            block = blocks.len() - 1,
            abandoned = self.block_size - abandoned_from,
            "slab grew"
        );
        Ok(())
    }

    fn shrink(&self, size: usize) {
        let offset = self.offset.get();
        assert!(
            size <= offset,
            "cannot unalloc {size} bytes: only {offset} bytes allocated in the active block"
        );
        self.offset.set(offset - size);
    }
}

impl Drop for Slab {
    fn drop(&mut self) {
        let held = self.block_size * self.blocks.get_mut().len();
        self.usage.sub(held);
    }
}

impl fmt::Debug for Slab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slab")
            .field("block_size", &self.block_size)
            .field("block_count", &self.block_count())
            .field("offset", &self.offset.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn isolated_counter() -> &'static MemoryUsage {
        Box::leak(Box::new(MemoryUsage::new()))
    }

    fn slab(block_size: usize) -> Slab {
        Slab::with_counter(SlabConfig::new(block_size), isolated_counter()).unwrap()
    }

    fn addr<T: ?Sized>(view: &T) -> usize {
        view as *const T as *const u8 as usize
    }

    #[test]
    fn new_slab_has_one_empty_block() {
        let slab = slab(128);
        assert_eq!(slab.block_count(), 1);
        assert_eq!(slab.offset(), 0);
        assert_eq!(slab.remaining(), 128);
        assert_eq!(slab.memory_bytes(), 128);
    }

    #[test]
    fn construction_reports_one_block() {
        let counter = isolated_counter();
        let _slab = Slab::with_counter(SlabConfig::new(256), counter).unwrap();
        assert_eq!(counter.get(), 256);
    }

    #[test]
    fn invalid_config_allocates_nothing() {
        let counter = isolated_counter();
        let err = Slab::with_counter(SlabConfig::new(0), counter).unwrap_err();
        assert!(matches!(err, SlabError::InvalidConfig(_)));
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn raw_allocs_are_contiguous() {
        let slab = slab(64);
        let a = addr(slab.alloc_raw(10).unwrap());
        let b = addr(slab.alloc_raw(20).unwrap());
        let c = addr(slab.alloc_raw(3).unwrap());
        assert_eq!(b - a, 10);
        assert_eq!(c - b, 20);
        assert_eq!(slab.offset(), 33);
    }

    #[test]
    fn full_block_request_fits_empty_block() {
        let slab = slab(64);
        let view = slab.alloc_raw(64).unwrap();
        assert_eq!(view.len(), 64);
        assert_eq!(slab.block_count(), 1);
        assert_eq!(slab.offset(), 64);
    }

    #[test]
    fn full_block_request_after_any_use_grows() {
        let slab = slab(64);
        slab.alloc_raw(1).unwrap();
        slab.alloc_raw(64).unwrap();
        assert_eq!(slab.block_count(), 2);
        assert_eq!(slab.offset(), 64);
    }

    #[test]
    fn overflow_abandons_the_old_tail() {
        let slab = slab(64);
        slab.alloc_raw(40).unwrap();
        slab.alloc_raw(40).unwrap();
        assert_eq!(slab.block_count(), 2);
        // A request that would have fit the abandoned 24-byte tail still
        // comes from the new block.
        let before = slab.offset();
        slab.alloc_raw(20).unwrap();
        assert_eq!(slab.block_count(), 2);
        assert_eq!(slab.offset(), before + 20);
    }

    #[test]
    fn zero_byte_alloc_does_not_move_offset() {
        let slab = slab(64);
        slab.alloc_raw(64).unwrap();
        let view = slab.alloc_raw(0).unwrap();
        assert!(view.is_empty());
        assert_eq!(slab.block_count(), 1);
        assert_eq!(slab.offset(), 64);
    }

    #[test]
    fn unalloc_returns_same_address() {
        let mut slab = slab(64);
        slab.alloc_raw(8).unwrap();
        let first = addr(slab.alloc_raw(16).unwrap());
        slab.unalloc(16);
        assert_eq!(slab.offset(), 8);
        let second = addr(slab.alloc_raw(16).unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn unalloc_shared_keeps_earlier_views_intact() {
        let slab = slab(64);
        let kept = slab.alloc::<u32>(0xDEAD_BEEF).unwrap();
        let speculative = addr(slab.alloc_raw(12).unwrap());
        // SAFETY: the speculative view is not used again.
        unsafe { slab.unalloc_shared(12) };
        let reused = addr(slab.alloc_raw(12).unwrap());
        assert_eq!(speculative, reused);
        assert_eq!(*kept, 0xDEAD_BEEF);
    }

    #[test]
    #[should_panic(expected = "cannot unalloc")]
    fn unalloc_past_active_block_panics() {
        let mut slab = slab(64);
        slab.alloc_raw(40).unwrap();
        slab.alloc_raw(40).unwrap();
        slab.unalloc(41);
    }

    #[test]
    #[should_panic(expected = "exceeds block size")]
    fn oversized_raw_alloc_panics() {
        let slab = slab(64);
        let _ = slab.alloc_raw(65);
    }

    #[test]
    #[should_panic(expected = "exceeds block size")]
    fn oversized_array_panics() {
        let slab = slab(64);
        let _ = slab.alloc_slice_uninit::<u64>(9);
    }

    #[test]
    #[should_panic(expected = "exceeds block size")]
    fn overflowing_array_panics() {
        let slab = slab(64);
        let _ = slab.alloc_slice_uninit::<u64>(usize::MAX);
    }

    #[repr(align(64))]
    #[derive(Default)]
    struct CacheLine([u64; 8]);

    #[test]
    fn cache_line_aligned_type_lands_on_cache_line() {
        let slab = slab(4096);
        slab.alloc_raw(1).unwrap();
        let first = slab.alloc_init::<CacheLine>().unwrap();
        assert_eq!(addr(first) % 64, 0);
        assert_eq!(first.0, [0; 8]);
        slab.alloc_raw(3).unwrap();
        let second = slab.alloc_init::<CacheLine>().unwrap();
        assert_eq!(addr(second) % 64, 0);
        assert!(addr(second) >= addr(first) + 64);
    }

    #[test]
    fn over_aligned_array_grows_into_aligned_block() {
        let slab = slab(256);
        slab.alloc_raw(200).unwrap();
        let lines = slab.alloc_slice_uninit::<CacheLine>(2).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(addr(lines) % 64, 0);
        assert_eq!(slab.block_count(), 2);
    }

    #[test]
    #[should_panic(expected = "cannot fit a 64 byte block")]
    fn over_aligned_type_filling_whole_block_panics() {
        let slab = slab(64);
        let _ = slab.alloc_uninit::<CacheLine>();
    }

    #[test]
    fn typed_alloc_pads_to_alignment() {
        let slab = slab(64);
        slab.alloc_raw(1).unwrap();
        let value = slab.alloc::<u64>(7).unwrap();
        assert_eq!(addr(value) % std::mem::align_of::<u64>(), 0);
        assert_eq!(slab.offset(), 16);
        assert_eq!(*value, 7);
    }

    #[test]
    fn padding_that_overflows_grows() {
        let slab = slab(16);
        slab.alloc_raw(9).unwrap();
        // 9 rounds up to 16, leaving no room for 8 more bytes.
        slab.alloc::<u64>(1).unwrap();
        assert_eq!(slab.block_count(), 2);
        assert_eq!(slab.offset(), 8);
    }

    #[test]
    fn alloc_init_runs_default() {
        #[derive(Debug, PartialEq)]
        struct Header {
            magic: u32,
            len: u16,
        }
        impl Default for Header {
            fn default() -> Self {
                Self { magic: 0x5AB, len: 3 }
            }
        }
        let slab = slab(64);
        let header = slab.alloc_init::<Header>().unwrap();
        assert_eq!(*header, Header { magic: 0x5AB, len: 3 });
        header.len = 9;
        assert_eq!(header.len, 9);
    }

    #[test]
    fn alloc_uninit_can_be_written_later() {
        let slab = slab(64);
        let slot = slab.alloc_uninit::<[u16; 4]>().unwrap();
        let value = slot.write([1, 2, 3, 4]);
        assert_eq!(*value, [1, 2, 3, 4]);
        assert_eq!(slab.offset(), 8);
    }

    #[test]
    fn slice_allocs_have_requested_length() {
        let slab = slab(128);
        let zeros = slab.alloc_slice_init::<u32>(5).unwrap();
        assert_eq!(zeros, &[0, 0, 0, 0, 0]);
        let raw = slab.alloc_slice_uninit::<u64>(3).unwrap();
        assert_eq!(raw.len(), 3);
        assert_eq!(addr(raw) % 8, 0);
        assert_eq!(slab.offset(), 24 + 24);
    }

    #[test]
    fn views_survive_growth() {
        let slab = slab(32);
        let first = slab.alloc::<u64>(11).unwrap();
        for i in 0..16u64 {
            slab.alloc(i).unwrap();
        }
        assert!(slab.block_count() > 1);
        assert_eq!(*first, 11);
    }

    #[test]
    fn reset_keeps_only_first_block() {
        let counter = isolated_counter();
        let mut slab = Slab::with_counter(SlabConfig::new(64), counter).unwrap();
        let first_block = addr(slab.alloc_raw(1).unwrap());
        for _ in 0..5 {
            slab.alloc_raw(64).unwrap();
        }
        assert_eq!(slab.block_count(), 6);
        assert_eq!(counter.get(), 6 * 64);

        slab.reset();
        assert_eq!(slab.block_count(), 1);
        assert_eq!(slab.offset(), 0);
        assert_eq!(counter.get(), 64);
        assert_eq!(addr(slab.alloc_raw(1).unwrap()), first_block);
    }

    #[test]
    fn reset_single_block_only_rewinds() {
        let counter = isolated_counter();
        let mut slab = Slab::with_counter(SlabConfig::new(64), counter).unwrap();
        slab.alloc_raw(30).unwrap();
        slab.reset();
        assert_eq!(slab.offset(), 0);
        assert_eq!(slab.block_count(), 1);
        assert_eq!(counter.get(), 64);
    }

    #[test]
    fn drop_releases_every_block() {
        let counter = isolated_counter();
        {
            let slab = Slab::with_counter(SlabConfig::new(64), counter).unwrap();
            slab.alloc_raw(64).unwrap();
            slab.alloc_raw(64).unwrap();
            slab.alloc_raw(64).unwrap();
            assert_eq!(counter.get(), 3 * 64);
        }
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn debug_output_names_geometry() {
        let slab = slab(64);
        slab.alloc_raw(5).unwrap();
        let out = format!("{slab:?}");
        assert!(out.contains("block_size: 64"));
        assert!(out.contains("offset: 5"));
    }

    #[test]
    fn slab_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Slab>();
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn typed_allocs_honour_alignment(
                ops in proptest::collection::vec((0usize..=40, 0u32..7), 1..100),
            ) {
                let slab = slab(512);
                for (raw, shift) in ops {
                    slab.alloc_raw(raw).unwrap();
                    let align = 1usize << shift;
                    let layout = Layout::from_size_align(align, align).unwrap();
                    let ptr = slab.alloc_layout(layout).unwrap();
                    prop_assert_eq!(ptr.as_ptr() as usize % align, 0);
                    prop_assert!(slab.offset() <= slab.block_size());
                }
            }

            #[test]
            fn raw_views_never_overlap(
                sizes in proptest::collection::vec(0usize..=64, 1..200),
            ) {
                let slab = slab(64);
                let mut ranges: Vec<(usize, usize)> = sizes
                    .iter()
                    .map(|&size| (addr(slab.alloc_raw(size).unwrap()), size))
                    .filter(|&(_, size)| size > 0)
                    .collect();
                ranges.sort_unstable();
                for pair in ranges.windows(2) {
                    prop_assert!(pair[0].0 + pair[0].1 <= pair[1].0);
                }
            }

            #[test]
            fn counter_tracks_block_count(
                sizes in proptest::collection::vec(1usize..=48, 1..100),
            ) {
                let counter = isolated_counter();
                let slab = Slab::with_counter(SlabConfig::new(48), counter).unwrap();
                for &size in &sizes {
                    slab.alloc_raw(size).unwrap();
                    prop_assert!(slab.offset() <= slab.block_size());
                }
                prop_assert_eq!(counter.get(), 48 * slab.block_count());
                prop_assert_eq!(slab.memory_bytes(), counter.get());
            }

            #[test]
            fn reset_always_returns_to_one_block(
                sizes in proptest::collection::vec(1usize..=32, 0..100),
            ) {
                let counter = isolated_counter();
                let mut slab = Slab::with_counter(SlabConfig::new(32), counter).unwrap();
                for &size in &sizes {
                    slab.alloc_raw(size).unwrap();
                }
                slab.reset();
                prop_assert_eq!(slab.block_count(), 1);
                prop_assert_eq!(slab.offset(), 0);
                prop_assert_eq!(counter.get(), 32);
            }

            #[test]
            fn unalloc_after_alloc_restores_offset(
                prefix in 0usize..=64,
                size in 0usize..=64,
            ) {
                let mut slab = slab(64);
                slab.alloc_raw(prefix).unwrap();
                let before = slab.offset();
                let first = addr(slab.alloc_raw(size).unwrap());
                let grew = slab.block_count() > 1;
                slab.unalloc(size);
                if !grew {
                    prop_assert_eq!(slab.offset(), before);
                }
                prop_assert_eq!(addr(slab.alloc_raw(size).unwrap()), first);
            }
        }
    }
}
