//! Pool-backed proposition network (propnet) compiler and lazy evaluator.
//!
//! A propnet is a directed graph of boolean gate nodes compiled from
//! declarative game rules. The search engine walks it billions of times:
//! it sets base (current-state) and input (chosen-action) proposition
//! values, then reads legal, goal, and terminal propositions to drive
//! simulation. This crate provides:
//!
//! - the circuit node model ([`Node`], [`NodeKind`]) — a closed sum over
//!   AND, OR, NOT, CONSTANT, PROPOSITION, and TRANSITION, with ordered
//!   edge lists and a cached value per node;
//! - the reference-network boundary ([`ReferenceNet`]) produced by the
//!   (out-of-scope) rule parser;
//! - the compiler ([`compile`]) that copies a reference network,
//!   node-for-node and edge-for-edge, into a fresh [`Circuit`] whose
//!   nodes are drawn from a chosen [`Pool`](ludus_core::Pool) strategy;
//! - dirty-bit bidirectional propagation: a value change invalidates
//!   downstream nodes lazily, and reads recompute only along dirty paths
//!   via an explicit work-list (no recursion, depth-independent stack).
//!
//! Compiled circuits are independent of their reference: compile one
//! instance per search worker rather than sharing one across threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod circuit;
pub mod compile;
pub mod error;
pub mod node;
pub mod reference;

mod dot;
mod propagate;

pub use circuit::Circuit;
pub use compile::{compile, NodeAllocator};
pub use error::CompileError;
pub use node::{Node, NodeKind};
pub use reference::{ReferenceKind, ReferenceNet, ReferenceNode};
