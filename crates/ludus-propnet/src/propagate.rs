//! Bidirectional dirty-bit propagation.
//!
//! Value changes travel forward as dirtiness (cheap: one flag per node,
//! stopping at transitions and at nodes that are already dirty); values
//! travel backward on demand, when a read forces a dirty node. Both
//! directions use explicit work-lists, so stack depth never grows with
//! circuit depth.

use ludus_core::{Pool, Sentence, SlotRef};

use crate::circuit::Circuit;
use crate::node::{Node, NodeKind};

/// A pending evaluation: a node and the input position to resume from
/// once the input being forced below it settles.
#[derive(Clone, Copy)]
struct Frame {
    slot: SlotRef,
    cursor: usize,
}

/// One evaluation decision for the node on top of the stack.
enum Step {
    /// The node's value is determined; settle and pop.
    Settle(bool),
    /// A dirty input must be forced first; remember where to resume.
    Descend(SlotRef, usize),
}

impl<P: Pool<Node>> Circuit<P> {
    /// Set a proposition's value.
    ///
    /// No-op if the value is unchanged. Otherwise the proposition's
    /// cached value is updated in place and everything downstream is
    /// marked dirty — not recomputed. Constants are never dirtied, and
    /// the dirty wave stops at transitions: state beyond a generation
    /// boundary only advances when the caller forces it.
    ///
    /// # Panics
    ///
    /// Panics if the slot does not hold a proposition.
    pub fn set_value(&mut self, slot: SlotRef, value: bool) {
        let node = self.pool.get_mut(slot);
        let NodeKind::Proposition { value: stored, .. } = &mut node.kind else {
            panic!("set_value on a non-proposition node {slot}");
        };
        if *stored == value {
            return;
        }
        *stored = value;
        node.cached = value;
        node.dirty = false;
        self.mark_outputs_dirty(slot);
    }

    /// Set a proposition's value, addressing it by name across the base
    /// and input views. Returns false if no such proposition exists.
    pub fn set_value_by_name(&mut self, name: &Sentence, value: bool) -> bool {
        match self.proposition_by_name(name) {
            Some(slot) => {
                self.set_value(slot, value);
                true
            }
            None => false,
        }
    }

    /// Read a node's value, forcing recomputation along dirty paths
    /// first.
    ///
    /// Evaluation is iterative over an explicit stack. AND and OR gates
    /// short-circuit: already-clean inputs are scanned for a determinant
    /// first, then inputs are walked in order, forcing dirty ones as
    /// they are reached — so every input actually consulted has been
    /// forced, and inputs past a determinant are left untouched (and
    /// possibly still dirty).
    pub fn value(&mut self, slot: SlotRef) -> bool {
        if self.pool.get(slot).dirty {
            self.force(slot);
        }
        self.pool.get(slot).cached
    }

    /// Read a node's value by proposition name.
    pub fn value_by_name(&mut self, name: &Sentence) -> Option<bool> {
        let slot = self.proposition_by_name(name)?;
        Some(self.value(slot))
    }

    fn force(&mut self, target: SlotRef) {
        let mut stack = vec![Frame {
            slot: target,
            cursor: 0,
        }];
        while let Some(&Frame { slot, cursor }) = stack.last() {
            if !self.pool.get(slot).dirty {
                stack.pop();
                continue;
            }
            match self.eval_step(slot, cursor) {
                Step::Settle(value) => {
                    let node = self.pool.get_mut(slot);
                    node.cached = value;
                    node.dirty = false;
                    stack.pop();
                }
                Step::Descend(input, resume) => {
                    if let Some(top) = stack.last_mut() {
                        top.cursor = resume;
                    }
                    stack.push(Frame {
                        slot: input,
                        cursor: 0,
                    });
                }
            }
        }
    }

    /// Decide the next move for a dirty node: settle if its value is
    /// determined by forced inputs, otherwise name the first dirty input
    /// that must be forced.
    fn eval_step(&self, slot: SlotRef, cursor: usize) -> Step {
        let node = self.pool.get(slot);
        match &node.kind {
            NodeKind::Constant { value } => Step::Settle(*value),
            NodeKind::Proposition { value, .. } => match node.inputs.first() {
                // An unwired proposition, or one latched behind a
                // transition, reports its caller-set value.
                None => Step::Settle(*value),
                Some(&input) => {
                    let input_node = self.pool.get(input);
                    if matches!(input_node.kind, NodeKind::Transition) {
                        Step::Settle(*value)
                    } else if input_node.dirty {
                        Step::Descend(input, cursor)
                    } else {
                        Step::Settle(input_node.cached)
                    }
                }
            },
            NodeKind::Not => {
                let input = node.single_input();
                let input_node = self.pool.get(input);
                if input_node.dirty {
                    Step::Descend(input, cursor)
                } else {
                    Step::Settle(!input_node.cached)
                }
            }
            NodeKind::Transition => {
                let input = node.single_input();
                let input_node = self.pool.get(input);
                if input_node.dirty {
                    Step::Descend(input, cursor)
                } else {
                    Step::Settle(input_node.cached)
                }
            }
            NodeKind::And => self.eval_gate(node, cursor, false),
            NodeKind::Or => self.eval_gate(node, cursor, true),
        }
    }

    /// Short-circuiting gate evaluation. `determinant` is the input value
    /// that decides the gate outright: false for AND, true for OR.
    fn eval_gate(&self, node: &Node, cursor: usize, determinant: bool) -> Step {
        // Already-clean inputs first: a settled determinant decides the
        // gate without forcing anything.
        for &input in &node.inputs {
            let input_node = self.pool.get(input);
            if !input_node.dirty && input_node.cached == determinant {
                return Step::Settle(determinant);
            }
        }
        // Walk inputs in order, forcing dirty ones as they are reached.
        for (index, &input) in node.inputs.iter().enumerate().skip(cursor) {
            let input_node = self.pool.get(input);
            if input_node.dirty {
                return Step::Descend(input, index);
            }
            if input_node.cached == determinant {
                return Step::Settle(determinant);
            }
        }
        Step::Settle(!determinant)
    }

    /// Forward wave: mark everything downstream of `slot` dirty without
    /// recomputing it.
    fn mark_outputs_dirty(&mut self, slot: SlotRef) {
        let mut work: Vec<SlotRef> = self.pool.get(slot).outputs.iter().copied().collect();
        while let Some(next) = work.pop() {
            let node = self.pool.get_mut(next);
            let cascade = match node.kind {
                NodeKind::Constant { .. } => false,
                // Transitions go dirty but hold the wave: their outputs
                // belong to the next generation.
                NodeKind::Transition => {
                    node.dirty = true;
                    false
                }
                _ => {
                    if node.dirty {
                        false
                    } else {
                        node.dirty = true;
                        true
                    }
                }
            };
            if cascade {
                work.extend(self.pool.get(next).outputs.iter().copied());
            }
        }
    }
}
