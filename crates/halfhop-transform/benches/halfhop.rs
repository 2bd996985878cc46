use criterion::{black_box, criterion_group, criterion_main, Criterion};
use halfhop_core::rng::RngHandle;
use halfhop_graph::gen_random_graph;
use halfhop_transform::HalfHop;

fn halfhop_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(42);
    let graph = gen_random_graph::<f32>(10_000, 50_000, 64, 0.05, &mut rng).unwrap();

    let full = HalfHop::new(0.5, 1.0).unwrap();
    c.bench_function("halfhop_full_10k", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(7);
            black_box(full.apply_to_copy(&graph, &mut rng).unwrap());
        });
    });

    let partial = HalfHop::new(0.5, 0.5).unwrap();
    c.bench_function("halfhop_partial_10k", |b| {
        b.iter(|| {
            let mut rng = RngHandle::from_seed(7);
            black_box(partial.apply_to_copy(&graph, &mut rng).unwrap());
        });
    });
}

criterion_group!(benches, halfhop_bench);
criterion_main!(benches);
