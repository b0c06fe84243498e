//! Criterion microbenches for the point generators.
//!
//! - chaos game on 3/5/8-gons,
//! - Barnsley fern,
//! - Sierpinski triangle with coupled RGB colors,
//! - parallel independent chains.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ifs::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

fn bench_chaos(c: &mut Criterion) {
    let mut group = c.benchmark_group("chaos");
    for &n in &[3usize, 5, 8] {
        group.bench_with_input(BenchmarkId::new("iterate_10k", n), &n, |b, &n| {
            b.iter_batched(
                || ChaosGame::seeded(n, 0.5, 42).unwrap(),
                |mut game| {
                    let _ = game.iterate(10_000, 5);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.bench_function(BenchmarkId::new("par_chains", "8x10k"), |b| {
        let cfg = ChaosCfg {
            n: 5,
            ratio: 0.5,
            steps: 10_000,
            discard: 5,
        };
        let tokens: Vec<ReplayToken> = (0..8).map(|i| ReplayToken::new(7, i)).collect();
        b.iter(|| ChaosGame::par_chains(cfg, &tokens).unwrap())
    });
    group.finish();
}

fn bench_fern_and_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("ifs");
    group.bench_function(BenchmarkId::new("fern", "50k"), |b| {
        b.iter_batched(
            || AffineIfs::barnsley_fern_seeded(1),
            |mut fern| {
                let _ = fern.iterate(0.0, 0.0, 50_000);
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function(BenchmarkId::new("triangle_rgb", "10k"), |b| {
        b.iter_batched(
            || Triangle::unit(StdRng::seed_from_u64(2)),
            |mut tri| {
                let _ = tri.iterate_colored(10_000, 5, ColorScheme::Rgb(RgbCoupling::Trace));
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_chaos, bench_fern_and_triangle);
criterion_main!(benches);
