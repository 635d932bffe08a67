//! ludus: pooled allocation and boolean-circuit core for general game
//! playing.
//!
//! This is the top-level facade crate re-exporting the public API of the
//! ludus sub-crates. For most users, adding `ludus` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use ludus::prelude::*;
//!
//! // Build a tiny reference network: p, q → AND → terminal.
//! // In production this comes from the rule-parsing layer.
//! let mut net = ReferenceNet::new();
//! let p = net.add_proposition(Sentence::new("p"));
//! let q = net.add_proposition(Sentence::new("q"));
//! let gate = net.add_and();
//! let terminal = net.add_proposition(Sentence::new("(terminal)"));
//! let init = net.add_proposition(Sentence::new("(init)"));
//! net.connect(p, gate);
//! net.connect(q, gate);
//! net.connect(gate, terminal);
//! net.set_init(init);
//! net.set_terminal(terminal);
//!
//! // Compile it onto a fixed-capacity pool and simulate.
//! let mut circuit = compile(&net, CappedPool::new(16)).unwrap();
//! let (p, q) = (circuit.nodes()[p], circuit.nodes()[q]);
//! let terminal = circuit.terminal_proposition();
//!
//! circuit.set_value(p, true);
//! assert!(!circuit.value(terminal));
//! circuit.set_value(q, true);
//! assert!(circuit.value(terminal));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for items not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ludus-core` | Identifiers, the `Pool`/`ItemAllocator` contracts, `PoolError` |
//! | [`pool`] | `ludus-pool` | `CappedPool`, `UncappedPool`, `SlotPool` |
//! | [`propnet`] | `ludus-propnet` | `Circuit`, `ReferenceNet`, the compiler, `CompileError` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use ludus_core as types;
pub use ludus_pool as pool;
pub use ludus_propnet as propnet;

/// The commonly-used subset of the API, intended for glob import.
pub mod prelude {
    pub use ludus_core::{ItemAllocator, Pool, PoolError, Role, Sentence, SlotRef};
    pub use ludus_pool::{CappedPool, SlotPool, UncappedPool};
    pub use ludus_propnet::{compile, Circuit, CompileError, Node, NodeKind, ReferenceNet};
}
