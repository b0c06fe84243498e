//! Sierpinski triangle: the chaos game fixed to three corners and r = 1/2.
//!
//! The corners come from two given points `c0, c1`; the apex is
//! `((c0.x + c1.x) / 2, |c0.x − c1.x|)`. For `(0,0), (1,0)` this is `(0.5, 1)`,
//! an isosceles triangle rather than an equilateral one.

use crate::color::{ColorScheme, RgbCoupling};
use crate::error::{IfsError, Result};
use crate::polygon::{combine, sample_barycentric};
use crate::rules::RuleSet;
use crate::trajectory::{ColoredTrajectory, Trajectory};
use crate::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Run parameters matching the plotting defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriangleCfg {
    pub steps: usize,
    pub discard: usize,
}

impl Default for TriangleCfg {
    fn default() -> Self {
        Self {
            steps: 10_000,
            discard: 5,
        }
    }
}

/// Three corners from two base points.
pub fn triangle_corners(c0: Vec2<f64>, c1: Vec2<f64>) -> [Vec2<f64>; 3] {
    let apex = Vec2::new((c0.x + c1.x) / 2.0, (c0.x - c1.x).abs());
    [c0, c1, apex]
}

#[derive(Clone, Debug)]
pub struct Triangle<R = StdRng> {
    corners: [Vec2<f64>; 3],
    rules: RuleSet,
    rng: R,
}

impl Triangle<StdRng> {
    pub fn seeded(c0: Vec2<f64>, c1: Vec2<f64>, seed: u64) -> Self {
        Self::new(c0, c1, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Triangle<R> {
    pub fn new(c0: Vec2<f64>, c1: Vec2<f64>, rng: R) -> Self {
        Self {
            corners: triangle_corners(c0, c1),
            rules: RuleSet::uniform_unchecked(3),
            rng,
        }
    }

    /// Corners `(0,0)`, `(1,0)`, `(0.5,1)`.
    pub fn unit(rng: R) -> Self {
        Self::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), rng)
    }

    pub fn corners(&self) -> &[Vec2<f64>; 3] {
        &self.corners
    }

    /// Convex combination of the corners with three normalized uniform weights.
    pub fn sample_interior_point(&mut self) -> Vec2<f64> {
        let w = sample_barycentric(3, &mut self.rng);
        combine(&self.corners, &w)
    }

    /// `steps − discard` midpoint-recursion points (empty if `discard >= steps`).
    pub fn iterate(&mut self, steps: usize, discard: usize) -> Trajectory {
        let mut traj = self.run(steps);
        traj.trim_front(discard);
        traj
    }

    /// Colored run. RGB colors must reuse the corner draw
    /// (`RgbCoupling::Trace`), so a point's color records the corners that
    /// produced it; `RgbCoupling::Independent` is rejected.
    pub fn iterate_colored(
        &mut self,
        steps: usize,
        discard: usize,
        scheme: ColorScheme,
    ) -> Result<ColoredTrajectory> {
        if scheme == ColorScheme::Rgb(RgbCoupling::Independent) {
            return Err(IfsError::invalid(
                "triangle rgb colors follow the corner draw; use RgbCoupling::Trace",
            ));
        }
        let traj = self.run(steps);
        let colors = scheme.assign(&traj.trace, &mut self.rng)?;
        Ok(ColoredTrajectory::trimmed(traj, colors, discard))
    }

    fn run(&mut self, steps: usize) -> Trajectory {
        let mut traj = Trajectory::with_capacity(steps);
        if steps == 0 {
            return traj;
        }
        let mut x = self.sample_interior_point();
        traj.push(x, 0);
        for _ in 1..steps {
            let j = self.rules.sample(&mut self.rng);
            x = (x + self.corners[j]) / 2.0;
            traj.push(x, j);
        }
        traj
    }
}
