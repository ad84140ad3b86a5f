//! Benchmark profiles and utilities for the bumpslab allocator.
//!
//! Provides pre-built [`ProducerProfile`]s for benchmarking and examples:
//!
//! - [`reference_profile`]: 64KB blocks, 10K events per frame
//! - [`stress_profile`]: 4KB blocks, 100K events per frame (heavy block churn)
//! - [`run_profile`]: drive a profile through fill/reset frames on one slab

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use bumpslab_arena::{MemoryUsage, Slab, SlabConfig, SlabError};
use bumpslab_test_utils::fill_events;

/// A producer workload: `frames` bursts of `events_per_frame` records, with
/// the slab reset between bursts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProducerProfile {
    /// Size of every slab block, in bytes.
    pub block_size: usize,
    /// Records written between two resets.
    pub events_per_frame: usize,
    /// Number of fill/reset rounds.
    pub frames: usize,
}

/// What a profile run observed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProfileReport {
    /// Most blocks held at once (just before a reset).
    pub peak_blocks: usize,
    /// Most bytes the counter reported at once.
    pub peak_bytes: usize,
    /// Wrapping sum of every written timestamp.
    pub checksum: u64,
}

/// Build a reference profile: 64KB blocks, 10K events per frame.
pub fn reference_profile() -> ProducerProfile {
    ProducerProfile {
        block_size: 64 * 1024,
        events_per_frame: 10_000,
        frames: 16,
    }
}

/// Build a stress profile: 4KB blocks, 100K events per frame.
///
/// Small blocks against a large burst exercise the growth path far more
/// often than [`reference_profile`].
pub fn stress_profile() -> ProducerProfile {
    ProducerProfile {
        block_size: 4 * 1024,
        events_per_frame: 100_000,
        frames: 4,
    }
}

/// Run `profile` on a fresh slab reporting into `counter`.
pub fn run_profile(
    profile: ProducerProfile,
    counter: &'static MemoryUsage,
) -> Result<ProfileReport, SlabError> {
    let mut slab = Slab::with_counter(SlabConfig::new(profile.block_size), counter)?;
    let mut report = ProfileReport::default();
    for frame in 0..profile.frames {
        let sum = fill_events(&slab, frame as u32, profile.events_per_frame)?;
        report.checksum = report.checksum.wrapping_add(sum);
        report.peak_blocks = report.peak_blocks.max(slab.block_count());
        report.peak_bytes = report.peak_bytes.max(counter.get());
        slab.reset();
    }
    Ok(report)
}
