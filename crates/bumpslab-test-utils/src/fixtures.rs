//! Reusable slab fixtures.
//!
//! - [`EventRecord`]: a plain-old-data record, 32 bytes, 8-byte aligned.
//! - [`isolated_counter`] / [`isolated_slab`]: slabs that report into a
//!   private counter instead of the process-wide one.
//! - [`fill_events`]: a producer burst writing `n` records into a slab.

use bumpslab_arena::{MemoryUsage, Slab, SlabConfig, SlabError};

/// Kind tag carried by an [`EventRecord`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum EventKind {
    /// A profiling zone was entered.
    #[default]
    ZoneBegin,
    /// A profiling zone was left.
    ZoneEnd,
    /// A free-form log message.
    Message,
    /// A sampled plot value.
    Plot,
}

impl EventKind {
    /// Kind for the `i`-th event of a synthetic burst.
    pub fn cycle(i: usize) -> Self {
        match i % 4 {
            0 => Self::ZoneBegin,
            1 => Self::ZoneEnd,
            2 => Self::Message,
            _ => Self::Plot,
        }
    }
}

/// A fixed-size event record as a producer thread would emit it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(C)]
pub struct EventRecord {
    /// Clock reading when the event was emitted.
    pub timestamp: u64,
    /// Id of the emitting thread.
    pub thread: u32,
    /// What happened.
    pub kind: EventKind,
    /// Frames captured with the event; 0 means none.
    pub callstack_depth: u8,
    /// Source line of the emitting site.
    pub line: u16,
    /// Payload, e.g. a plot sample.
    pub value: i64,
    /// Opaque id of the source location.
    pub source: u64,
}

/// `size_of::<EventRecord>()`.
pub const EVENT_RECORD_SIZE: usize = std::mem::size_of::<EventRecord>();

impl EventRecord {
    /// Deterministic record for the `i`-th event on `thread`.
    pub fn synthetic(thread: u32, i: usize) -> Self {
        Self {
            timestamp: 1_000 + i as u64 * 17,
            thread,
            kind: EventKind::cycle(i),
            callstack_depth: (i % 8) as u8,
            line: (i % 4096) as u16,
            value: i as i64 - 512,
            source: 0x5EED_0000 + i as u64,
        }
    }
}

/// A fresh counter that lives for the rest of the process.
///
/// Each call leaks one small allocation; intended for tests.
pub fn isolated_counter() -> &'static MemoryUsage {
    Box::leak(Box::new(MemoryUsage::new()))
}

/// A slab of `block_size` bytes reporting into its own counter.
pub fn isolated_slab(block_size: usize) -> Result<(Slab, &'static MemoryUsage), SlabError> {
    let counter = isolated_counter();
    let slab = Slab::with_counter(SlabConfig::new(block_size), counter)?;
    Ok((slab, counter))
}

/// Write `n` synthetic records for `thread` into `slab`, mirroring a
/// producer burst. Records are written through uninitialised storage.
///
/// Returns the sum of the written timestamps so callers can keep the work
/// observable.
pub fn fill_events(slab: &Slab, thread: u32, n: usize) -> Result<u64, SlabError> {
    let mut checksum = 0u64;
    for i in 0..n {
        let record = slab
            .alloc_uninit::<EventRecord>()?
            .write(EventRecord::synthetic(thread, i));
        checksum = checksum.wrapping_add(record.timestamp);
    }
    Ok(checksum)
}
