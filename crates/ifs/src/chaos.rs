//! Chaos game on a regular n-gon.
//!
//! Each step picks a vertex `j` uniformly from the `n` distinct corners and
//! moves to `r·prev + (1−r)·v[j]`. The seed is a random interior point, so the
//! first few points are transient and usually discarded.
//!
//! Independent chains share nothing and can be generated in parallel with
//! `par_chains`, one seeded `StdRng` per chain.

use crate::color::{rgb_gradient, ColorScheme, Rgb};
use crate::error::Result;
use crate::polygon::{
    optimal_contraction_ratio, regular_polygon, sample_interior_point, validate_ratio,
    validate_vertex_count,
};
use crate::rng::ReplayToken;
use crate::rules::RuleSet;
use crate::trajectory::{ColoredTrajectory, Trajectory};
use crate::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Run parameters; defaults give a Sierpinski triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChaosCfg {
    pub n: usize,
    pub ratio: f64,
    pub steps: usize,
    pub discard: usize,
}

impl Default for ChaosCfg {
    fn default() -> Self {
        Self {
            n: 3,
            ratio: 0.5,
            steps: 10_000,
            discard: 5,
        }
    }
}

/// Chaos-game engine; owns its polygon and random source.
#[derive(Clone, Debug)]
pub struct ChaosGame<R = StdRng> {
    n: usize,
    r: f64,
    rules: RuleSet,
    vertices: Vec<Vec2<f64>>,
    rng: R,
}

impl ChaosGame<StdRng> {
    pub fn seeded(n: usize, r: f64, seed: u64) -> Result<Self> {
        Self::new(n, r, StdRng::seed_from_u64(seed))
    }

    /// Run one chain per token in parallel; each chain draws from its own RNG.
    pub fn par_chains(cfg: ChaosCfg, tokens: &[ReplayToken]) -> Result<Vec<Trajectory>> {
        // Validate once up front so no chain starts on bad parameters.
        validate_vertex_count(cfg.n)?;
        validate_ratio(cfg.ratio)?;
        tokens
            .par_iter()
            .map(|tok| {
                let mut game = ChaosGame::new(cfg.n, cfg.ratio, tok.to_std_rng())?;
                Ok(game.iterate(cfg.steps, cfg.discard))
            })
            .collect()
    }
}

impl<R: Rng> ChaosGame<R> {
    /// Fails with `InvalidArgument` if `n < 3` or `r ∉ (0, 1)`.
    pub fn new(n: usize, r: f64, rng: R) -> Result<Self> {
        validate_ratio(r)?;
        let vertices = regular_polygon(n)?;
        Ok(Self {
            n,
            r,
            rules: RuleSet::uniform(n)?,
            vertices,
            rng,
        })
    }

    /// Engine using the ratio at which the n sub-copies just touch.
    pub fn with_optimal_ratio(n: usize, rng: R) -> Result<Self> {
        let r = optimal_contraction_ratio(n)?;
        Self::new(n, r, rng)
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn ratio(&self) -> f64 {
        self.r
    }

    /// Polygon vertices, closing duplicate included (`n + 1` entries).
    pub fn vertices(&self) -> &[Vec2<f64>] {
        &self.vertices
    }

    /// The `n` distinct corners.
    pub fn corners(&self) -> &[Vec2<f64>] {
        &self.vertices[..self.n]
    }

    pub fn starting_point(&mut self) -> Vec2<f64> {
        sample_interior_point(&self.vertices, self.n, &mut self.rng)
    }

    /// Generate `steps - discard` points (empty if `discard >= steps`).
    pub fn iterate(&mut self, steps: usize, discard: usize) -> Trajectory {
        let mut traj = self.run(steps);
        traj.trim_front(discard);
        traj
    }

    /// `iterate` plus one color per point, computed before trimming.
    pub fn iterate_colored(
        &mut self,
        steps: usize,
        discard: usize,
        scheme: ColorScheme,
    ) -> Result<ColoredTrajectory> {
        let traj = self.run(steps);
        let colors = scheme.assign(&traj.trace, &mut self.rng)?;
        Ok(ColoredTrajectory::trimmed(traj, colors, discard))
    }

    /// RGB gradient from draws independent of any geometric trace.
    pub fn gradient_color(&mut self, steps: usize, discard: usize) -> Vec<Rgb> {
        let mut colors = rgb_gradient(&mut self.rng, steps);
        colors.drain(..discard.min(colors.len()));
        colors
    }

    fn run(&mut self, steps: usize) -> Trajectory {
        let mut traj = Trajectory::with_capacity(steps);
        if steps == 0 {
            return traj;
        }
        let mut x = self.starting_point();
        traj.push(x, 0);
        for _ in 1..steps {
            let j = self.rules.sample(&mut self.rng);
            x = x * self.r + self.vertices[j] * (1.0 - self.r);
            traj.push(x, j);
        }
        traj
    }
}
