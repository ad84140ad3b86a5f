//! Test utilities and fixtures for bumpslab development.
//!
//! Provides an [`EventRecord`] shaped like the fixed-size records a profiler
//! or message producer emits, isolated [`MemoryUsage`] counters so tests can
//! assert exact byte counts while running in parallel, and small workload
//! helpers shared by tests and benchmarks.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    fill_events, isolated_counter, isolated_slab, EventKind, EventRecord, EVENT_RECORD_SIZE,
};
