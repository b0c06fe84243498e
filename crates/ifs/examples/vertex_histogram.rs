//! Print how often each vertex was chosen in a chaos-game run, and the
//! touching ratio used for it.
//!
//! Usage:
//!   cargo run -p ifs --example vertex_histogram -- 5
//!   cargo run -p ifs --example vertex_histogram -- 8 0.6

use ifs::prelude::*;

fn main() {
    let mut args = std::env::args().skip(1);
    let n: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(5);
    let ratio: Option<f64> = args.next().and_then(|s| s.parse().ok());
    let rng = ifs::rng::seeded(2025);
    let game = match ratio {
        Some(r) => ChaosGame::new(n, r, rng),
        None => ChaosGame::with_optimal_ratio(n, rng),
    };
    let mut game = match game {
        Ok(g) => g,
        Err(err) => {
            eprintln!("usage: vertex_histogram [n >= 3] [ratio in (0,1)]: {err}");
            return;
        }
    };
    let run = game.iterate(100_000, 5);
    let mut counts = vec![0usize; n];
    for &j in &run.trace {
        counts[j] += 1;
    }
    println!("n={n} ratio={:.4} points={}", game.ratio(), run.len());
    for (j, (c, v)) in counts.iter().zip(game.corners()).enumerate() {
        println!("vertex {j} at ({:+.3}, {:+.3}): {c}", v.x, v.y);
    }
}
