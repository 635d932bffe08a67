//! The compiled circuit: pool-backed nodes plus role-indexed views.

use indexmap::IndexMap;
use ludus_core::{Pool, Role, Sentence, SlotRef};

use crate::node::{Node, NodeKind};

/// A compiled proposition network.
///
/// Owns its node pool and the indexed views built during compilation:
/// base and input propositions keyed by sentence, legal and goal
/// propositions grouped by role, the unique init and terminal
/// propositions, and the legal↔input correspondence. Every view
/// iterates in the deterministic order inherited from the reference
/// network.
///
/// One circuit instance belongs to one worker: there is no internal
/// synchronization, and reads are consistent only once the caller has
/// finished the generation's value-setting calls and forces the nodes it
/// cares about (see [`Circuit::value`]).
pub struct Circuit<P: Pool<Node>> {
    pub(crate) pool: P,
    pub(crate) nodes: Vec<SlotRef>,
    pub(crate) roles: Vec<Role>,
    pub(crate) base: IndexMap<Sentence, SlotRef>,
    pub(crate) input: IndexMap<Sentence, SlotRef>,
    pub(crate) legal: IndexMap<Role, Vec<SlotRef>>,
    pub(crate) goal: IndexMap<Role, Vec<SlotRef>>,
    pub(crate) init: SlotRef,
    pub(crate) terminal: SlotRef,
    pub(crate) legal_input: IndexMap<SlotRef, SlotRef>,
}

impl<P: Pool<Node>> Circuit<P> {
    /// The node behind a handle.
    pub fn node(&self, slot: SlotRef) -> &Node {
        self.pool.get(slot)
    }

    /// Handles of every node, in reference order.
    pub fn nodes(&self) -> &[SlotRef] {
        &self.nodes
    }

    /// Number of nodes in the circuit.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The ordered role list.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// The base proposition named by a sentence.
    pub fn base_proposition(&self, name: &Sentence) -> Option<SlotRef> {
        self.base.get(name).copied()
    }

    /// All base propositions, keyed by sentence.
    pub fn base_propositions(&self) -> impl Iterator<Item = (&Sentence, SlotRef)> {
        self.base.iter().map(|(name, &slot)| (name, slot))
    }

    /// The input proposition named by a sentence.
    pub fn input_proposition(&self, name: &Sentence) -> Option<SlotRef> {
        self.input.get(name).copied()
    }

    /// All input propositions, keyed by sentence.
    pub fn input_propositions(&self) -> impl Iterator<Item = (&Sentence, SlotRef)> {
        self.input.iter().map(|(name, &slot)| (name, slot))
    }

    /// Legal propositions for a role, in reference order. Empty for an
    /// unknown role.
    pub fn legal_propositions(&self, role: &Role) -> &[SlotRef] {
        self.legal.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Goal propositions for a role, in reference order. Empty for an
    /// unknown role.
    pub fn goal_propositions(&self, role: &Role) -> &[SlotRef] {
        self.goal.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The unique init proposition.
    pub fn init_proposition(&self) -> SlotRef {
        self.init
    }

    /// The unique terminal proposition.
    pub fn terminal_proposition(&self) -> SlotRef {
        self.terminal
    }

    /// The input proposition paired with a legal proposition, or the
    /// legal paired with an input — the correspondence is symmetric.
    pub fn legal_input_pairing(&self, slot: SlotRef) -> Option<SlotRef> {
        self.legal_input.get(&slot).copied()
    }

    /// Look a proposition up by name across the base and input views.
    pub fn proposition_by_name(&self, name: &Sentence) -> Option<SlotRef> {
        self.base_proposition(name)
            .or_else(|| self.input_proposition(name))
    }

    /// Whether a node's cached value may be stale.
    pub fn is_dirty(&self, slot: SlotRef) -> bool {
        self.pool.get(slot).dirty
    }

    /// The node pool, for instrumentation (`usage_percent` and friends).
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Reset the circuit to a generation boundary: every proposition
    /// value cleared to false, every non-constant node marked dirty so
    /// the next read recomputes it.
    pub fn reset(&mut self) {
        for &slot in &self.nodes {
            let node = self.pool.get_mut(slot);
            match &mut node.kind {
                NodeKind::Constant { value } => {
                    node.cached = *value;
                    node.dirty = false;
                }
                NodeKind::Proposition { value, .. } => {
                    *value = false;
                    node.cached = false;
                    node.dirty = true;
                }
                _ => {
                    node.dirty = true;
                }
            }
        }
    }
}
