use coverage::{evaluate, rsrp::Transmitter, summarize, SampleGrid};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn field_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Field Evaluation");
    let tx = Transmitter::default();

    for step in [20.0, 10.0, 5.0] {
        let grid = SampleGrid::new(-1000.0, 1000.0, -1000.0, 1000.0, step).unwrap();
        group.bench_with_input(BenchmarkId::new("evaluate", grid.len()), &grid, |b, g| {
            b.iter(|| evaluate(g, &tx))
        });
        let field = evaluate(&grid, &tx);
        group.bench_with_input(BenchmarkId::new("summarize", grid.len()), &field, |b, f| {
            b.iter(|| summarize(f))
        });
    }
}

criterion_group!(benches, field_evaluation);
criterion_main!(benches);
