//! The compiler: copies a reference network into a pool-backed circuit.

use indexmap::IndexMap;
use ludus_core::{ItemAllocator, Pool, PoolError, SlotRef};

use crate::circuit::Circuit;
use crate::error::CompileError;
use crate::node::{Node, NodeKind};
use crate::reference::{ReferenceKind, ReferenceNet};

/// Allocator for circuit nodes.
///
/// The pool contract constructs items without knowing which variant the
/// compiler wants, so `new_item` yields a blank node and the compiler
/// assigns the variant afterwards. Reset restores the blank state, edges
/// and all, leaving a recycled slot indistinguishable from a fresh one.
pub struct NodeAllocator;

impl ItemAllocator<Node> for NodeAllocator {
    fn new_item(&mut self, _slot: SlotRef) -> Result<Node, PoolError> {
        Ok(Node::blank())
    }

    fn reset_item(&mut self, item: &mut Node, _free: bool) {
        *item = Node::blank();
    }

    fn should_reset(&self, _item: &Node) -> bool {
        // Circuit nodes live as long as their circuit; eviction is always
        // unconditional.
        true
    }
}

/// Compile a reference network into a circuit drawing its nodes from the
/// given pool strategy.
///
/// The copy is structural and total: one circuit node per reference node
/// (same variant), edges re-wired through the old→new mapping preserving
/// order exactly, and every role-indexed view (base/input/legal/goal,
/// init, terminal, the legal↔input correspondence, the ordered role
/// list) mapped through the same mapping. The reference is not mutated;
/// compiling it again yields a wholly independent instance, which is how
/// each search worker gets its own circuit.
///
/// The compiled circuit starts at a generation boundary: propositions
/// false, everything non-constant dirty.
///
/// # Errors
///
/// [`CompileError::MissingInit`]/[`MissingTerminal`](CompileError::MissingTerminal)
/// if the reference lacks a required singleton, and
/// [`CompileError::Allocation`] if the pool cannot produce a node.
/// Malformed wiring is unrepresentable: [`ReferenceNet::connect`] rejects
/// unknown node indices at construction time.
pub fn compile<P: Pool<Node>>(
    reference: &ReferenceNet,
    mut pool: P,
) -> Result<Circuit<P>, CompileError> {
    let init_index = reference.init().ok_or(CompileError::MissingInit)?;
    let terminal_index = reference.terminal().ok_or(CompileError::MissingTerminal)?;

    let mut allocator = NodeAllocator;

    // Pass 1: create one node per reference node, recording the mapping.
    let mut map: Vec<SlotRef> = Vec::with_capacity(reference.node_count());
    for node in reference.nodes() {
        let slot = pool
            .allocate(&mut allocator)
            .map_err(|source| CompileError::Allocation { source })?;
        pool.get_mut(slot).kind = match node.kind() {
            ReferenceKind::And => NodeKind::And,
            ReferenceKind::Or => NodeKind::Or,
            ReferenceKind::Not => NodeKind::Not,
            ReferenceKind::Constant(value) => NodeKind::Constant { value: *value },
            ReferenceKind::Proposition(name) => NodeKind::Proposition {
                name: name.clone(),
                value: false,
            },
            ReferenceKind::Transition => NodeKind::Transition,
        };
        map.push(slot);
    }

    // Pass 2: re-wire through the mapping, preserving edge order.
    for (index, node) in reference.nodes().iter().enumerate() {
        let slot = map[index];
        for &input in node.inputs() {
            pool.get_mut(slot).add_input(map[input]);
        }
        for &output in node.outputs() {
            pool.get_mut(slot).add_output(map[output]);
        }
    }

    // Pass 3: map the views.
    let base = reference
        .base_propositions()
        .map(|(name, index)| (name.clone(), map[index]))
        .collect::<IndexMap<_, _>>();
    let input = reference
        .input_propositions()
        .map(|(name, index)| (name.clone(), map[index]))
        .collect::<IndexMap<_, _>>();
    let legal = reference
        .legal_propositions()
        .map(|(role, indices)| {
            (
                role.clone(),
                indices.iter().map(|&i| map[i]).collect::<Vec<_>>(),
            )
        })
        .collect::<IndexMap<_, _>>();
    let goal = reference
        .goal_propositions()
        .map(|(role, indices)| {
            (
                role.clone(),
                indices.iter().map(|&i| map[i]).collect::<Vec<_>>(),
            )
        })
        .collect::<IndexMap<_, _>>();

    // The correspondence is recorded once per pair but queried from both
    // ends, so store both directions.
    let mut legal_input = IndexMap::new();
    for &(legal_index, input_index) in reference.legal_input_pairs() {
        legal_input.insert(map[legal_index], map[input_index]);
        legal_input.insert(map[input_index], map[legal_index]);
    }

    let mut circuit = Circuit {
        pool,
        init: map[init_index],
        terminal: map[terminal_index],
        nodes: map,
        roles: reference.roles().to_vec(),
        base,
        input,
        legal,
        goal,
        legal_input,
    };
    circuit.reset();
    Ok(circuit)
}
