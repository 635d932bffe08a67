//! The circuit node: a tagged variant with ordered edges and a cached
//! value.

use ludus_core::{Sentence, SlotRef};
use smallvec::SmallVec;

/// Edge list type. Most gates have fan-in/fan-out of one or two; larger
/// lists spill to the heap transparently.
pub(crate) type EdgeList = SmallVec<[SlotRef; 2]>;

/// The six node variants of a proposition network.
///
/// A closed sum: the compiler dispatches on the tag, and an unrecognized
/// variant is unrepresentable. Only propositions carry caller-visible
/// state — a rule-language [`Sentence`] name and a mutable truth value;
/// every other variant derives its value from its inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// True iff every input is true.
    And,
    /// True iff any input is true.
    Or,
    /// Inverts its single input.
    Not,
    /// A fixed logical value; never dirty.
    Constant {
        /// The fixed value.
        value: bool,
    },
    /// A named latch. Base and input propositions are set by the caller;
    /// propositions fed by gate logic (legal, goal, terminal) pass their
    /// single input through.
    Proposition {
        /// Rule-language sentence identity.
        name: Sentence,
        /// Caller-set truth value.
        value: bool,
    },
    /// Passes its single input through, one generation later: reads go
    /// through the usual force path, but dirtiness never propagates past
    /// a transition, so downstream state only advances on the caller's
    /// schedule.
    Transition,
}

/// A node in a compiled circuit.
///
/// Nodes live in a [`Pool`](ludus_core::Pool) and refer to each other by
/// [`SlotRef`]. Edge lists are ordered, mirroring the reference network
/// exactly; algorithms that assign positional meaning to inputs can rely
/// on that order surviving compilation.
///
/// The `dirty`/`cached` pair implements the lazy evaluation contract: a
/// node's cached value is guaranteed correct only after it has been
/// forced, not eagerly on every upstream change.
#[derive(Clone, Debug)]
pub struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) inputs: EdgeList,
    pub(crate) outputs: EdgeList,
    pub(crate) dirty: bool,
    pub(crate) cached: bool,
}

impl Node {
    /// A blank node, as handed out by the pool before the compiler
    /// assigns its variant: a false constant with no edges.
    pub fn blank() -> Self {
        Self {
            kind: NodeKind::Constant { value: false },
            inputs: EdgeList::new(),
            outputs: EdgeList::new(),
            dirty: false,
            cached: false,
        }
    }

    /// The node's variant.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Ordered input edges.
    pub fn inputs(&self) -> &[SlotRef] {
        &self.inputs
    }

    /// Ordered output edges.
    pub fn outputs(&self) -> &[SlotRef] {
        &self.outputs
    }

    /// The single input.
    ///
    /// To be used only when the node is known to have exactly one input
    /// (NOT, TRANSITION, and wired propositions).
    ///
    /// # Panics
    ///
    /// Panics if the node has no inputs.
    pub fn single_input(&self) -> SlotRef {
        self.inputs[0]
    }

    /// The single output.
    ///
    /// To be used only when the node is known to have exactly one output.
    ///
    /// # Panics
    ///
    /// Panics if the node has no outputs.
    pub fn single_output(&self) -> SlotRef {
        self.outputs[0]
    }

    /// Append an input edge, preserving insertion order.
    pub fn add_input(&mut self, input: SlotRef) {
        self.inputs.push(input);
    }

    /// Append an output edge, preserving insertion order.
    pub fn add_output(&mut self, output: SlotRef) {
        self.outputs.push(output);
    }

    /// The cached value.
    ///
    /// Correct only if the node is not dirty; use
    /// [`Circuit::value`](crate::Circuit::value) to force first.
    pub fn cached_value(&self) -> bool {
        self.cached
    }

    /// Whether the cached value may be stale.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The proposition's name, if this node is a proposition.
    pub fn name(&self) -> Option<&Sentence> {
        match &self.kind {
            NodeKind::Proposition { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Rename a proposition. Rarely used; a proposition's name is
    /// normally constant over its lifetime.
    ///
    /// # Panics
    ///
    /// Panics if the node is not a proposition.
    pub fn set_name(&mut self, new_name: Sentence) {
        match &mut self.kind {
            NodeKind::Proposition { name, .. } => *name = new_name,
            other => panic!("set_name on a {other:?} node"),
        }
    }
}
