//! Test fixtures for ludus development.
//!
//! Small, fully-wired reference networks used by tests and benches
//! across the workspace. Each fixture documents its topology so tests
//! can address nodes by role rather than by magic index.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use ludus_core::{Role, Sentence};
use ludus_propnet::ReferenceNet;

/// The minimal three-proposition circuit: `p, q → AND → r`, with `r` the
/// terminal proposition and a free-standing init proposition.
///
/// Node indices: 0 = p, 1 = q, 2 = AND, 3 = r, 4 = init.
pub fn and_terminal_net() -> ReferenceNet {
    let mut net = ReferenceNet::new();
    let p = net.add_proposition(Sentence::new("p"));
    let q = net.add_proposition(Sentence::new("q"));
    let gate = net.add_and();
    let r = net.add_proposition(Sentence::new("r"));
    let init = net.add_proposition(Sentence::new("(init)"));
    net.connect(p, gate);
    net.connect(q, gate);
    net.connect(gate, r);
    net.set_init(init);
    net.set_terminal(r);
    net
}

/// A complete single-role game: a light that toggles.
///
/// One base proposition `(true on)` latched behind a transition, two
/// input propositions (`toggle`, `noop`) with always-true legals, a goal
/// that fires when the light is on, and a terminal that mirrors the
/// light. The next-state logic is an XOR built from AND/OR/NOT:
///
/// ```text
/// next(on) = (on AND NOT toggle) OR (NOT on AND toggle)
/// ```
pub fn switched_light_net() -> ReferenceNet {
    let robot = Role::new("robot");
    let mut net = ReferenceNet::new();
    net.add_role(robot.clone());

    let on = net.add_proposition(Sentence::new("(true on)"));
    let toggle = net.add_proposition(Sentence::new("(does robot toggle)"));
    let noop = net.add_proposition(Sentence::new("(does robot noop)"));

    let not_toggle = net.add_not();
    let not_on = net.add_not();
    let keep = net.add_and();
    let flip = net.add_and();
    let next_on = net.add_or();
    let trans = net.add_transition();

    net.connect(toggle, not_toggle);
    net.connect(on, not_on);
    net.connect(on, keep);
    net.connect(not_toggle, keep);
    net.connect(not_on, flip);
    net.connect(toggle, flip);
    net.connect(keep, next_on);
    net.connect(flip, next_on);
    net.connect(next_on, trans);
    net.connect(trans, on);

    let always = net.add_constant(true);
    let legal_toggle = net.add_proposition(Sentence::new("(legal robot toggle)"));
    let legal_noop = net.add_proposition(Sentence::new("(legal robot noop)"));
    net.connect(always, legal_toggle);
    net.connect(always, legal_noop);

    let goal = net.add_proposition(Sentence::new("(goal robot 100)"));
    net.connect(on, goal);

    let terminal = net.add_proposition(Sentence::new("(terminal)"));
    net.connect(on, terminal);

    let init = net.add_proposition(Sentence::new("(init)"));

    net.mark_base(on);
    net.mark_input(toggle);
    net.mark_input(noop);
    net.mark_legal(robot.clone(), legal_toggle);
    net.mark_legal(robot.clone(), legal_noop);
    net.mark_goal(robot, goal);
    net.set_init(init);
    net.set_terminal(terminal);
    net.pair_legal_input(legal_toggle, toggle);
    net.pair_legal_input(legal_noop, noop);

    net
}

/// Names used by [`switched_light_net`], for convenient lookups.
pub mod light {
    use ludus_core::{Role, Sentence};

    pub fn role() -> Role {
        Role::new("robot")
    }

    pub fn on() -> Sentence {
        Sentence::new("(true on)")
    }

    pub fn toggle() -> Sentence {
        Sentence::new("(does robot toggle)")
    }

    pub fn noop() -> Sentence {
        Sentence::new("(does robot noop)")
    }

    pub fn legal_toggle() -> Sentence {
        Sentence::new("(legal robot toggle)")
    }

    pub fn legal_noop() -> Sentence {
        Sentence::new("(legal robot noop)")
    }

    pub fn goal() -> Sentence {
        Sentence::new("(goal robot 100)")
    }
}
