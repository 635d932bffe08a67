//! Core identifiers and pool contracts for the ludus game-playing engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! fundamental abstractions shared by the rest of the workspace: the
//! rule-language identifier types ([`Sentence`], [`Role`]), the slot handle
//! type ([`SlotRef`]) used in place of pointers throughout the pooled data
//! structures, and the [`Pool`]/[`ItemAllocator`] contracts implemented by
//! the allocator strategies in `ludus-pool`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod traits;

pub use error::PoolError;
pub use id::{Role, Sentence, SlotRef};
pub use traits::{ItemAllocator, Pool};
