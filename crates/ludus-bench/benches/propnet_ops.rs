//! Criterion micro-benchmarks for circuit compilation and propagation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ludus_pool::CappedPool;
use ludus_propnet::compile;
use ludus_test_utils::{light, switched_light_net};

fn bench_compile(c: &mut Criterion) {
    let net = switched_light_net();
    c.bench_function("compile_switched_light", |b| {
        b.iter(|| {
            let circuit = compile(black_box(&net), CappedPool::new(32)).unwrap();
            black_box(circuit.node_count());
        });
    });
}

fn bench_propagation(c: &mut Criterion) {
    let net = switched_light_net();
    c.bench_function("toggle_and_read_terminal", |b| {
        let mut circuit = compile(&net, CappedPool::new(32)).unwrap();
        let toggle = circuit.input_proposition(&light::toggle()).unwrap();
        let terminal = circuit.terminal_proposition();
        let mut value = false;
        b.iter(|| {
            value = !value;
            circuit.set_value(toggle, value);
            black_box(circuit.value(terminal));
        });
    });
}

criterion_group!(benches, bench_compile, bench_propagation);
criterion_main!(benches);
