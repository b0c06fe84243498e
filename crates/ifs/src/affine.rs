//! Affine-map IFS with a fixed probability vector (Barnsley fern).
//!
//! Each map carries six coefficients and updates a point as
//! `x' = a·x + b·y + e`, then `y' = c·x' + d·y + f`. The second line reads the
//! already-updated `x'`, so a map is a composition of two shears rather than a
//! plain matrix-plus-offset. Fern output depends on this ordering.

use crate::error::{IfsError, Result};
use crate::rules::RuleSet;
use crate::trajectory::Trajectory;
use crate::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Six-coefficient map with sequential coordinate updates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AffineMap {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineMap {
    pub const fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let x = self.a * x + self.b * y + self.e;
        let y = self.c * x + self.d * y + self.f;
        (x, y)
    }

    #[inline]
    pub fn apply_point(&self, p: Vec2<f64>) -> Vec2<f64> {
        let (x, y) = self.apply(p.x, p.y);
        Vec2::new(x, y)
    }
}

/// Barnsley fern maps: stem, successive leaflets, left leaf, right leaf.
pub const FERN_MAPS: [AffineMap; 4] = [
    AffineMap::new(0.0, 0.0, 0.0, 0.16, 0.0, 0.0),
    AffineMap::new(0.85, 0.04, -0.04, 0.85, 0.0, 1.60),
    AffineMap::new(0.2, -0.26, 0.23, 0.22, 0.0, 1.6),
    AffineMap::new(-0.15, 0.28, 0.26, 0.24, 0.0, 0.44),
];

pub const FERN_PROBABILITIES: [f64; 4] = [0.01, 0.85, 0.07, 0.07];

/// Weighted affine IFS; the probability table is validated once at construction.
#[derive(Clone, Debug)]
pub struct AffineIfs<R = StdRng> {
    maps: Vec<AffineMap>,
    rules: RuleSet,
    rng: R,
}

impl AffineIfs<StdRng> {
    pub fn barnsley_fern_seeded(seed: u64) -> Self {
        Self::barnsley_fern(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> AffineIfs<R> {
    /// Fails with `InvalidArgument` unless `probabilities` matches `maps` in
    /// length, is non-negative and sums to 1.
    pub fn new(maps: Vec<AffineMap>, probabilities: &[f64], rng: R) -> Result<Self> {
        let rules = RuleSet::from_probabilities(probabilities)?;
        if rules.len() != maps.len() {
            return Err(IfsError::invalid(format!(
                "{} probabilities for {} maps",
                rules.len(),
                maps.len()
            )));
        }
        Ok(Self { maps, rules, rng })
    }

    pub fn barnsley_fern(rng: R) -> Self {
        Self {
            maps: FERN_MAPS.to_vec(),
            rules: RuleSet::weighted_unchecked(&FERN_PROBABILITIES),
            rng,
        }
    }

    pub fn maps(&self) -> &[AffineMap] {
        &self.maps
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.rules.probabilities()
    }

    /// `n` points starting at `(x0, y0)`, seed included; no discard.
    pub fn iterate(&mut self, x0: f64, y0: f64, n: usize) -> Trajectory {
        let mut traj = Trajectory::with_capacity(n);
        if n == 0 {
            return traj;
        }
        let mut p = Vec2::new(x0, y0);
        traj.push(p, 0);
        for _ in 1..n {
            let j = self.rules.sample(&mut self.rng);
            p = self.maps[j].apply_point(p);
            traj.push(p, j);
        }
        traj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_update_is_sequential() {
        let m = AffineMap::new(1.0, 0.0, 1.0, 0.0, 2.0, 0.0);
        // x' = x + 2 = 3, y' = x' = 3 (not the old x = 1).
        assert_eq!(m.apply(1.0, 5.0), (3.0, 3.0));
        let stem = FERN_MAPS[0];
        assert_eq!(stem.apply(0.3, 2.0), (0.0, 0.32));
    }

    #[test]
    fn rejects_malformed_probabilities() {
        let maps = FERN_MAPS.to_vec();
        let rng = StdRng::seed_from_u64(0);
        assert!(AffineIfs::new(maps.clone(), &[0.5, 0.5, 0.5], rng.clone()).is_err());
        assert!(AffineIfs::new(maps.clone(), &[0.5, 0.5], rng.clone()).is_err());
        assert!(AffineIfs::new(maps.clone(), &[0.25; 4], rng.clone()).is_ok());
        assert!(AffineIfs::new(maps, &[-0.1, 0.9, 0.1, 0.1], rng).is_err());
    }

    #[test]
    fn fern_run_shape() {
        let mut fern = AffineIfs::barnsley_fern_seeded(1);
        let t = fern.iterate(0.0, 0.0, 20_000);
        assert_eq!(t.len(), 20_000);
        assert_eq!(t.points[0], Vec2::new(0.0, 0.0));
        assert!(t.trace.iter().all(|&j| j < 4));
        // The fern attractor fits in roughly [-3, 3] x [0, 10.5].
        for p in &t.points {
            assert!(p.x.abs() < 3.5 && p.y > -0.5 && p.y < 11.0, "{p:?}");
        }
        let leaflet = t.trace[1..].iter().filter(|&&j| j == 1).count() as f64;
        let frac = leaflet / (t.len() - 1) as f64;
        assert!((frac - 0.85).abs() < 0.02, "{frac}");
    }

    #[test]
    fn fern_degenerate_lengths() {
        let mut fern = AffineIfs::barnsley_fern_seeded(2);
        assert!(fern.iterate(0.0, 0.0, 0).is_empty());
        let one = fern.iterate(1.0, 2.0, 1);
        assert_eq!(one.points, vec![Vec2::new(1.0, 2.0)]);
        assert_eq!(one.trace, vec![0]);
    }

    #[test]
    fn each_point_is_its_map_image() {
        let mut fern = AffineIfs::barnsley_fern_seeded(3);
        let t = fern.iterate(0.0, 0.0, 200);
        for i in 1..t.len() {
            let expected = FERN_MAPS[t.trace[i]].apply_point(t.points[i - 1]);
            assert_eq!(t.points[i], expected);
        }
    }
}
