//! Graphviz rendering for offline circuit debugging.

use std::fmt::{self, Write};

use ludus_core::Pool;

use crate::circuit::Circuit;
use crate::node::{Node, NodeKind};

impl<P: Pool<Node>> Circuit<P> {
    /// Render the circuit as a Graphviz digraph.
    ///
    /// Propositions are circles (filled red when currently true), gates
    /// keep their traditional shapes. Purely a debugging aid; the output
    /// is stable because node handles follow reference order.
    pub fn render_dot<W: Write>(&self, out: &mut W) -> fmt::Result {
        writeln!(out, "digraph propnet {{")?;
        for &slot in &self.nodes {
            let node = self.pool.get(slot);
            let (shape, fill, label) = match &node.kind {
                NodeKind::And => ("invhouse", "grey", "AND".to_string()),
                NodeKind::Or => ("ellipse", "grey", "OR".to_string()),
                NodeKind::Not => ("invtriangle", "grey", "NOT".to_string()),
                NodeKind::Constant { value } => {
                    ("doublecircle", "grey", value.to_string().to_uppercase())
                }
                NodeKind::Proposition { name, value } => {
                    ("circle", if *value { "red" } else { "white" }, name.to_string())
                }
                NodeKind::Transition => ("box", "grey", "TRANSITION".to_string()),
            };
            writeln!(
                out,
                "  n{slot} [shape={shape}, style=filled, fillcolor={fill}, label=\"{label}\"];"
            )?;
            for &input in node.inputs.iter() {
                writeln!(out, "  n{input} -> n{slot};")?;
            }
        }
        writeln!(out, "}}")
    }
}
