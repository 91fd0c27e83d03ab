use criterion::{criterion_group, criterion_main, Criterion};

use qrerank_quantum::{build_circuit, similarity_batch, StateSimulator, StatevectorSimulator};

fn angles(seed: usize, k: usize) -> Vec<f64> {
    (0..k)
        .map(|i| ((seed * 31 + i * 7) % 100) as f64 / 100.0 * std::f64::consts::PI)
        .collect()
}

fn bench_simulate_six_qubits(c: &mut Criterion) {
    let sim = StatevectorSimulator::new();
    let circuit = build_circuit(&angles(1, 6)).unwrap();

    c.bench_function("simulate_6_qubits", |b| {
        b.iter(|| sim.simulate(&circuit).unwrap());
    });
}

fn bench_simulate_twelve_qubits(c: &mut Criterion) {
    let sim = StatevectorSimulator::new();
    let circuit = build_circuit(&angles(1, 12)).unwrap();

    c.bench_function("simulate_12_qubits", |b| {
        b.iter(|| sim.simulate(&circuit).unwrap());
    });
}

/// One query against a default-sized shortlist.
fn bench_similarity_batch_20(c: &mut Criterion) {
    let sim = StatevectorSimulator::new();
    let query = sim.simulate(&build_circuit(&angles(0, 6)).unwrap()).unwrap();
    let candidates: Vec<_> = (1..=20)
        .map(|seed| sim.simulate(&build_circuit(&angles(seed, 6)).unwrap()).unwrap())
        .collect();

    c.bench_function("similarity_batch_20_candidates", |b| {
        b.iter(|| similarity_batch(&query, &candidates));
    });
}

criterion_group!(
    benches,
    bench_simulate_six_qubits,
    bench_simulate_twelve_qubits,
    bench_similarity_batch_20
);
criterion_main!(benches);
