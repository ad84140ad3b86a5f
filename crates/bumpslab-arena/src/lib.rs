//! Fixed-block-size bump arena for high-volume, same-lifetime records.
//!
//! A [`Slab`] hands out byte ranges from pre-reserved blocks of one fixed
//! size by bumping an offset, so producers emitting many short-lived,
//! append-only records avoid a general-purpose allocator call per record.
//! Memory is released only in bulk, on [`Slab::reset`] or drop. This is the
//! only crate in the workspace that may contain `unsafe` code.
//!
//! # Architecture
//!
//! ```text
//! Slab
//! ├── Block[0]        (allocated at construction, kept across reset)
//! ├── Block[1..n]     (appended on overflow, released on reset)
//! ├── offset          (bytes consumed in the active block, blocks[n])
//! └── &'static MemoryUsage  (process-wide byte counter, relaxed atomics)
//! ```
//!
//! # Error model
//!
//! - **Contract violations** (a request larger than a block, rolling back
//!   more than the active block holds, an over-aligned request that cannot
//!   fit a fresh block once padded) panic.
//! - **Resource exhaustion** is returned as [`SlabError::OutOfMemory`] with
//!   the slab left unchanged.
//!
//! # Example
//!
//! ```rust
//! use bumpslab_arena::{memory_usage, Slab, SlabConfig};
//!
//! let mut slab = Slab::new(SlabConfig::new(4096)).unwrap();
//! assert!(memory_usage() >= 4096);
//!
//! let ids = slab.alloc_slice_init::<u32>(16).unwrap();
//! ids[3] = 42;
//! let name = slab.alloc_raw(5).unwrap();
//! for (dst, src) in name.iter_mut().zip(b"event") {
//!     dst.write(*src);
//! }
//!
//! slab.reset();
//! assert_eq!(slab.block_count(), 1);
//! assert_eq!(slab.offset(), 0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

mod block;
pub mod config;
pub mod error;
pub mod slab;
pub mod usage;

// Public re-exports for the primary API surface.
pub use block::BLOCK_ALIGN;
pub use config::SlabConfig;
pub use error::{ConfigError, SlabError};
pub use slab::Slab;
pub use usage::{memory_usage, MemoryUsage, MEMORY_USAGE};
