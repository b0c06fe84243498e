//! Criterion benchmarks for variations over a 100x100 grid.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ifs::variation::{unit_grid, Blend, Variation};

fn bench_variations(c: &mut Criterion) {
    let mut group = c.benchmark_group("variation");
    let pts = unit_grid(100);
    for v in Variation::ALL {
        group.bench_with_input(BenchmarkId::new("transform", v.name()), &v, |b, &v| {
            b.iter(|| v.transform(&pts))
        });
    }
    let blend = Blend::new(Variation::Linear, Variation::Disc, &pts);
    group.bench_function(BenchmarkId::new("blend_at", "linear-disc"), |b| {
        b.iter(|| blend.at(0.5).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_variations);
criterion_main!(benches);
