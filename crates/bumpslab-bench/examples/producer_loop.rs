//! Producer loop example.
//!
//! Demonstrates: create a slab → emit a burst of records per frame →
//! roll back a rejected record → report memory usage → reset → repeat.
//!
//! Run with `RUST_LOG=bumpslab_arena=trace` to see block growth and resets.

use bumpslab_arena::{memory_usage, Slab, SlabConfig};
use bumpslab_test_utils::{EventKind, EventRecord, EVENT_RECORD_SIZE};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut slab = Slab::new(SlabConfig::new(EVENT_RECORD_SIZE * 256)).unwrap();
    info!(block_size = slab.block_size(), "producer started");

    for frame in 0..5u32 {
        let mut accepted = 0usize;
        let mut rejected = 0usize;
        for i in 0..1_000usize {
            let record = slab
                .alloc_uninit::<EventRecord>()
                .unwrap()
                .write(EventRecord::synthetic(frame, i));
            // Plot samples arriving in the same frame are dropped.
            if record.kind == EventKind::Plot && i % 3 == 0 {
                slab.unalloc(EVENT_RECORD_SIZE);
                rejected += 1;
            } else {
                accepted += 1;
            }
        }

        info!(
            frame,
            accepted,
            rejected,
            blocks = slab.block_count(),
            memory_usage = memory_usage(),
            "frame complete"
        );
        slab.reset();
    }

    info!(memory_usage = memory_usage(), "producer finished");
}
