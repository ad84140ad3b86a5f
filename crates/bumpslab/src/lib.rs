//! bumpslab: a fixed-block-size slab allocator for producer-side code that
//! emits many short-lived, append-only records.
//!
//! This is the top-level facade crate that re-exports the public API of
//! `bumpslab-arena`. For most users, adding `bumpslab` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use bumpslab::prelude::*;
//!
//! #[derive(Default)]
//! struct Message {
//!     timestamp: u64,
//!     thread: u32,
//! }
//!
//! let mut slab = Slab::new(SlabConfig::new(64 * 1024)).unwrap();
//!
//! // Default-initialised record.
//! let msg = slab.alloc_init::<Message>().unwrap();
//! msg.timestamp = 1_000;
//!
//! // Uninitialised record, filled by the caller.
//! let slot = slab.alloc_uninit::<Message>().unwrap();
//! slot.write(Message { timestamp: 1_001, thread: 3 });
//!
//! assert!(memory_usage() >= slab.memory_bytes());
//!
//! // Release everything but the first block.
//! slab.reset();
//! assert_eq!(slab.offset(), 0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `bumpslab-arena` | `Slab`, `SlabConfig`, errors, memory accounting |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Slab allocator, configuration and memory accounting (`bumpslab-arena`).
pub use bumpslab_arena as arena;

/// Common imports for typical bumpslab usage.
///
/// ```rust
/// use bumpslab::prelude::*;
/// ```
pub mod prelude {
    pub use bumpslab_arena::{
        memory_usage, ConfigError, MemoryUsage, Slab, SlabConfig, SlabError, BLOCK_ALIGN,
        MEMORY_USAGE,
    };
}
