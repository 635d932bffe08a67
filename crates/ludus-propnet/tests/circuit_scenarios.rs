//! Cross-strategy circuit scenarios: compilation fidelity, view mapping,
//! and full simulation generations over the switched-light fixture.

use ludus_core::{Pool, Sentence};
use ludus_propnet::{compile, Circuit, CompileError, Node, ReferenceNet};
use ludus_pool::{CappedPool, SlotPool, UncappedPool};
use ludus_test_utils::{and_terminal_net, light, switched_light_net};

/// Force the terminal three-node scenario through any strategy.
fn exercise_and_terminal<P: Pool<Node>>(pool: P) {
    let net = and_terminal_net();
    let mut circuit = compile(&net, pool).unwrap();
    let p = circuit.nodes()[0];
    let q = circuit.nodes()[1];
    let r = circuit.terminal_proposition();

    circuit.set_value(p, true);
    circuit.set_value(q, false);
    assert!(!circuit.value(r));

    circuit.set_value(q, true);
    assert!(circuit.is_dirty(r), "r must be invalidated, not stale");
    assert!(circuit.value(r));
}

#[test]
fn and_terminal_scenario_on_capped_pool() {
    exercise_and_terminal(CappedPool::new(8));
}

#[test]
fn and_terminal_scenario_on_uncapped_pool() {
    exercise_and_terminal(UncappedPool::new(8));
}

#[test]
fn and_terminal_scenario_on_slot_pool() {
    exercise_and_terminal(SlotPool::new(8));
}

#[test]
fn compiled_views_mirror_the_reference() {
    let net = switched_light_net();
    let circuit = compile(&net, CappedPool::new(32)).unwrap();

    assert_eq!(circuit.roles(), &[light::role()]);
    assert_eq!(circuit.node_count(), net.node_count());

    let on = circuit.base_proposition(&light::on()).unwrap();
    assert_eq!(circuit.node(on).name(), Some(&light::on()));

    let toggle = circuit.input_proposition(&light::toggle()).unwrap();
    let noop = circuit.input_proposition(&light::noop()).unwrap();
    assert_ne!(toggle, noop);

    let legals = circuit.legal_propositions(&light::role());
    assert_eq!(legals.len(), 2);
    assert_eq!(
        circuit.node(legals[0]).name(),
        Some(&light::legal_toggle()),
        "legal view preserves registration order"
    );

    let goals = circuit.goal_propositions(&light::role());
    assert_eq!(goals.len(), 1);
    assert_eq!(circuit.node(goals[0]).name(), Some(&light::goal()));

    let terminal = circuit.terminal_proposition();
    assert_eq!(
        circuit.node(terminal).name(),
        Some(&Sentence::new("(terminal)"))
    );
    let init = circuit.init_proposition();
    assert_eq!(circuit.node(init).name(), Some(&Sentence::new("(init)")));

    // The legal↔input correspondence answers from both ends.
    assert_eq!(circuit.legal_input_pairing(legals[0]), Some(toggle));
    assert_eq!(circuit.legal_input_pairing(toggle), Some(legals[0]));
    assert_eq!(circuit.legal_input_pairing(legals[1]), Some(noop));
    assert_eq!(circuit.legal_input_pairing(on), None);
}

#[test]
fn compiler_preserves_edge_order() {
    let mut net = ReferenceNet::new();
    let a = net.add_proposition(Sentence::new("a"));
    let b = net.add_proposition(Sentence::new("b"));
    let c = net.add_proposition(Sentence::new("c"));
    let gate = net.add_or();
    let out = net.add_proposition(Sentence::new("out"));
    let init = net.add_proposition(Sentence::new("(init)"));
    // Deliberately wire out of index order.
    net.connect(c, gate);
    net.connect(a, gate);
    net.connect(b, gate);
    net.connect(gate, out);
    net.set_init(init);
    net.set_terminal(out);

    let circuit = compile(&net, CappedPool::new(8)).unwrap();
    let gate_inputs = circuit.node(circuit.nodes()[gate]).inputs();
    let expected = [
        circuit.nodes()[c],
        circuit.nodes()[a],
        circuit.nodes()[b],
    ];
    assert_eq!(gate_inputs, expected);
}

#[test]
fn compiled_instances_are_independent() {
    let net = switched_light_net();
    let mut first = compile(&net, CappedPool::new(32)).unwrap();
    let mut second = compile(&net, CappedPool::new(32)).unwrap();

    let toggle = light::toggle();
    assert!(first.set_value_by_name(&toggle, true));
    assert_eq!(first.value_by_name(&toggle), Some(true));
    assert_eq!(
        second.value_by_name(&toggle),
        Some(false),
        "sibling instance must be unaffected"
    );

    // The reference itself is untouched and still compiles.
    assert!(compile(&net, CappedPool::new(32)).is_ok());
}

#[test]
fn missing_singletons_are_fatal() {
    let mut net = ReferenceNet::new();
    let p = net.add_proposition(Sentence::new("p"));
    net.set_terminal(p);
    assert!(matches!(
        compile(&net, CappedPool::new(8)),
        Err(CompileError::MissingInit)
    ));

    let mut net = ReferenceNet::new();
    let p = net.add_proposition(Sentence::new("p"));
    net.set_init(p);
    assert!(matches!(
        compile(&net, CappedPool::new(8)),
        Err(CompileError::MissingTerminal)
    ));
}

/// Advance the light game one generation: read every base proposition's
/// next value off its feeding transition, then latch them in.
fn advance_generation(circuit: &mut Circuit<CappedPool<Node>>) {
    let base: Vec<_> = circuit.base_propositions().map(|(_, slot)| slot).collect();
    let next: Vec<bool> = base
        .iter()
        .map(|&slot| {
            let trans = circuit.node(slot).single_input();
            circuit.value(trans)
        })
        .collect();
    for (&slot, &value) in base.iter().zip(&next) {
        circuit.set_value(slot, value);
    }
}

#[test]
fn light_game_plays_two_turns() {
    let net = switched_light_net();
    let mut circuit = compile(&net, CappedPool::new(32)).unwrap();

    let role = light::role();
    let goal = circuit.goal_propositions(&role)[0];
    let terminal = circuit.terminal_proposition();

    // Both moves legal from the start.
    let legals: Vec<_> = circuit.legal_propositions(&role).to_vec();
    for legal in legals {
        assert!(circuit.value(legal));
    }
    assert!(!circuit.value(terminal), "light starts off");
    assert!(!circuit.value(goal));

    // Turn 1: toggle.
    circuit.set_value_by_name(&light::toggle(), true);
    advance_generation(&mut circuit);
    circuit.set_value_by_name(&light::toggle(), false);

    assert_eq!(circuit.value_by_name(&light::on()), Some(true));
    assert!(circuit.value(goal), "goal follows the light");
    assert!(circuit.value(terminal));

    // Turn 2: noop keeps the light on.
    circuit.set_value_by_name(&light::noop(), true);
    advance_generation(&mut circuit);
    circuit.set_value_by_name(&light::noop(), false);

    assert_eq!(circuit.value_by_name(&light::on()), Some(true));

    // Turn 3: toggle switches it back off.
    circuit.set_value_by_name(&light::toggle(), true);
    advance_generation(&mut circuit);

    assert_eq!(circuit.value_by_name(&light::on()), Some(false));
    assert!(!circuit.value(goal));
}

#[test]
fn reset_returns_the_circuit_to_a_generation_boundary() {
    let net = switched_light_net();
    let mut circuit = compile(&net, CappedPool::new(32)).unwrap();

    circuit.set_value_by_name(&light::toggle(), true);
    advance_generation(&mut circuit);
    assert_eq!(circuit.value_by_name(&light::on()), Some(true));

    circuit.reset();
    assert_eq!(circuit.value_by_name(&light::on()), Some(false));
    assert_eq!(circuit.value_by_name(&light::toggle()), Some(false));

    // Constants keep their value across resets.
    let legal = circuit.legal_propositions(&light::role())[0];
    assert!(circuit.value(legal));
}

#[test]
fn pool_usage_is_observable_through_the_circuit() {
    let net = and_terminal_net();
    let circuit = compile(&net, CappedPool::new(10)).unwrap();
    // Five reference nodes → five live pool slots.
    assert_eq!(circuit.pool().in_use(), 5);
    assert_eq!(circuit.pool().usage_percent(), 50);
}
