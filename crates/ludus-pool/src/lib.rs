//! Bounded-capacity object pools for the ludus game-playing engine.
//!
//! The search engine simulates millions of game-state transitions per
//! decision; per-item heap allocation on that path is unaffordable. The
//! pools here hand out reusable items addressed by
//! [`SlotRef`](ludus_core::SlotRef) handles and recycle them on free or
//! bulk eviction, so the hot path never allocates.
//!
//! # Strategies
//!
//! Three implementations of the [`Pool`](ludus_core::Pool) contract:
//!
//! | Strategy | Growth | Recycling | `clear` |
//! |----------|--------|-----------|---------|
//! | [`CappedPool`] | lazy, up to a fixed capacity | LIFO free list | yes |
//! | [`UncappedPool`] | unbounded | bounded free cache | panics |
//! | [`SlotPool`] | whole store materialized up front | free-slot index array | yes |
//!
//! `CappedPool` is the default for search-tree nodes: memory is bounded
//! and allocate/free are amortized O(1). `UncappedPool` suits workloads
//! whose true capacity is unknowable in advance. `SlotPool` is the arena
//! variant: one contiguous backing store of typed slots, initialized by
//! cloning a prototype item, with no per-item allocation ever.
//!
//! # Ownership discipline
//!
//! One pool instance is owned by exactly one worker thread at a time.
//! There is no internal locking; concurrent use of a single instance is
//! prevented by Rust's ownership rules rather than detected at runtime.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod capped;
pub mod slot;
pub mod uncapped;

pub use capped::CappedPool;
pub use slot::SlotPool;
pub use uncapped::UncappedPool;
