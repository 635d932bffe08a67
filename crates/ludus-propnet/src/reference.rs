//! The reference network: the compiler's immutable input.
//!
//! A [`ReferenceNet`] is what the rule-parsing layer hands this crate: a
//! fully-wired node graph plus the role-indexed views over its
//! propositions. This layer treats it as already validated game
//! semantics — the only checks performed at compile time are structural
//! (singletons present, edges in bounds).
//!
//! The mutation methods here are the surface the parser layer builds
//! against; once a net is handed to [`compile`](crate::compile) it is
//! never modified.

use indexmap::IndexMap;
use ludus_core::{Role, Sentence};

/// Node variants as they appear in a reference network.
///
/// Mirrors [`NodeKind`](crate::NodeKind) without the runtime state: a
/// reference proposition has a name but no mutable value, and no node
/// carries dirty bits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Logical AND gate.
    And,
    /// Logical OR gate.
    Or,
    /// Logical NOT gate.
    Not,
    /// Fixed logical value.
    Constant(bool),
    /// Named proposition.
    Proposition(Sentence),
    /// Generation-boundary pass-through.
    Transition,
}

/// A node in a reference network, with ordered edge index lists.
#[derive(Clone, Debug)]
pub struct ReferenceNode {
    kind: ReferenceKind,
    inputs: Vec<usize>,
    outputs: Vec<usize>,
}

impl ReferenceNode {
    /// The node's variant.
    pub fn kind(&self) -> &ReferenceKind {
        &self.kind
    }

    /// Ordered input node indices.
    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }

    /// Ordered output node indices.
    pub fn outputs(&self) -> &[usize] {
        &self.outputs
    }
}

/// A complete reference network: nodes, wiring, and role-indexed views.
///
/// Views use [`IndexMap`] so that iteration order is deterministic — it
/// follows the order in which the parser registered each proposition,
/// and the compiler preserves it in the compiled circuit.
#[derive(Clone, Debug, Default)]
pub struct ReferenceNet {
    nodes: Vec<ReferenceNode>,
    roles: Vec<Role>,
    base: IndexMap<Sentence, usize>,
    input: IndexMap<Sentence, usize>,
    legal: IndexMap<Role, Vec<usize>>,
    goal: IndexMap<Role, Vec<usize>>,
    init: Option<usize>,
    terminal: Option<usize>,
    legal_input: Vec<(usize, usize)>,
}

impl ReferenceNet {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    // --- construction surface (parser-facing) ---

    /// Register a role. Role order is the game's turn order and is
    /// preserved through compilation.
    pub fn add_role(&mut self, role: Role) {
        self.roles.push(role);
    }

    /// Add an AND gate, returning its node index.
    pub fn add_and(&mut self) -> usize {
        self.push_node(ReferenceKind::And)
    }

    /// Add an OR gate, returning its node index.
    pub fn add_or(&mut self) -> usize {
        self.push_node(ReferenceKind::Or)
    }

    /// Add a NOT gate, returning its node index.
    pub fn add_not(&mut self) -> usize {
        self.push_node(ReferenceKind::Not)
    }

    /// Add a constant, returning its node index.
    pub fn add_constant(&mut self, value: bool) -> usize {
        self.push_node(ReferenceKind::Constant(value))
    }

    /// Add a named proposition, returning its node index.
    pub fn add_proposition(&mut self, name: Sentence) -> usize {
        self.push_node(ReferenceKind::Proposition(name))
    }

    /// Add a transition, returning its node index.
    pub fn add_transition(&mut self) -> usize {
        self.push_node(ReferenceKind::Transition)
    }

    /// Wire an edge from `from` to `to`, appending to both nodes' edge
    /// lists. Edge order is meaningful and preserved by the compiler.
    ///
    /// # Panics
    ///
    /// Panics if either index has not been returned by an `add_*` call.
    pub fn connect(&mut self, from: usize, to: usize) {
        assert!(from < self.nodes.len(), "connect from unknown node {from}");
        assert!(to < self.nodes.len(), "connect to unknown node {to}");
        self.nodes[from].outputs.push(to);
        self.nodes[to].inputs.push(from);
    }

    /// Mark a proposition as a base (current-state) proposition.
    ///
    /// # Panics
    ///
    /// Panics if the index does not name a proposition.
    pub fn mark_base(&mut self, index: usize) {
        let name = self.proposition_name(index);
        self.base.insert(name, index);
    }

    /// Mark a proposition as an input (chosen-action) proposition.
    ///
    /// # Panics
    ///
    /// Panics if the index does not name a proposition.
    pub fn mark_input(&mut self, index: usize) {
        let name = self.proposition_name(index);
        self.input.insert(name, index);
    }

    /// Mark a proposition as a legal-move flag for a role.
    pub fn mark_legal(&mut self, role: Role, index: usize) {
        self.legal.entry(role).or_default().push(index);
    }

    /// Mark a proposition as a goal flag for a role.
    pub fn mark_goal(&mut self, role: Role, index: usize) {
        self.goal.entry(role).or_default().push(index);
    }

    /// Record the unique init proposition.
    pub fn set_init(&mut self, index: usize) {
        self.init = Some(index);
    }

    /// Record the unique terminal proposition.
    pub fn set_terminal(&mut self, index: usize) {
        self.terminal = Some(index);
    }

    /// Record that a legal proposition authorizes the action named by an
    /// input proposition.
    pub fn pair_legal_input(&mut self, legal: usize, input: usize) {
        self.legal_input.push((legal, input));
    }

    // --- query surface (compiler-facing) ---

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes, in index order.
    pub fn nodes(&self) -> &[ReferenceNode] {
        &self.nodes
    }

    /// The node at an index.
    pub fn node(&self, index: usize) -> &ReferenceNode {
        &self.nodes[index]
    }

    /// Registered roles, in registration order.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Base propositions, keyed by sentence.
    pub fn base_propositions(&self) -> impl Iterator<Item = (&Sentence, usize)> {
        self.base.iter().map(|(name, &index)| (name, index))
    }

    /// Input propositions, keyed by sentence.
    pub fn input_propositions(&self) -> impl Iterator<Item = (&Sentence, usize)> {
        self.input.iter().map(|(name, &index)| (name, index))
    }

    /// Legal propositions grouped by role.
    pub fn legal_propositions(&self) -> impl Iterator<Item = (&Role, &[usize])> {
        self.legal.iter().map(|(role, v)| (role, v.as_slice()))
    }

    /// Goal propositions grouped by role.
    pub fn goal_propositions(&self) -> impl Iterator<Item = (&Role, &[usize])> {
        self.goal.iter().map(|(role, v)| (role, v.as_slice()))
    }

    /// The init proposition, if one was recorded.
    pub fn init(&self) -> Option<usize> {
        self.init
    }

    /// The terminal proposition, if one was recorded.
    pub fn terminal(&self) -> Option<usize> {
        self.terminal
    }

    /// Legal↔input pairs, as recorded.
    pub fn legal_input_pairs(&self) -> &[(usize, usize)] {
        &self.legal_input
    }

    fn push_node(&mut self, kind: ReferenceKind) -> usize {
        let index = self.nodes.len();
        self.nodes.push(ReferenceNode {
            kind,
            inputs: Vec::new(),
            outputs: Vec::new(),
        });
        index
    }

    fn proposition_name(&self, index: usize) -> Sentence {
        match &self.nodes[index].kind {
            ReferenceKind::Proposition(name) => name.clone(),
            other => panic!("node {index} is a {other:?}, not a proposition"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_appends_to_both_edge_lists_in_order() {
        let mut net = ReferenceNet::new();
        let a = net.add_proposition(Sentence::new("a"));
        let b = net.add_proposition(Sentence::new("b"));
        let gate = net.add_and();
        net.connect(a, gate);
        net.connect(b, gate);

        assert_eq!(net.node(gate).inputs(), &[a, b]);
        assert_eq!(net.node(a).outputs(), &[gate]);
        assert_eq!(net.node(b).outputs(), &[gate]);
    }

    #[test]
    fn views_record_registration_order() {
        let mut net = ReferenceNet::new();
        let white = Role::new("white");
        net.add_role(white.clone());

        let p = net.add_proposition(Sentence::new("(true p)"));
        let q = net.add_proposition(Sentence::new("(true q)"));
        net.mark_base(q);
        net.mark_base(p);

        let order: Vec<usize> = net.base_propositions().map(|(_, i)| i).collect();
        assert_eq!(order, vec![q, p]);

        let l = net.add_proposition(Sentence::new("(legal white noop)"));
        net.mark_legal(white.clone(), l);
        let (role, legals) = net.legal_propositions().next().unwrap();
        assert_eq!(role, &white);
        assert_eq!(legals, &[l]);
    }

    #[test]
    #[should_panic(expected = "not a proposition")]
    fn mark_base_on_gate_panics() {
        let mut net = ReferenceNet::new();
        let gate = net.add_and();
        net.mark_base(gate);
    }

    #[test]
    fn singletons_default_to_absent() {
        let net = ReferenceNet::new();
        assert_eq!(net.init(), None);
        assert_eq!(net.terminal(), None);
    }
}
