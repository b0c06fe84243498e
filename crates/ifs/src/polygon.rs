//! Regular polygons on the unit circle and random interior points.
//!
//! Model
//! - `regular_polygon(n)` samples the angles `2πk/n` for `k = 0..=n`, both
//!   ends included, so vertex `n` repeats vertex `0`. Callers that need the
//!   distinct corners use the first `n` entries.
//! - Vertices are `(sin θ, cos θ)`: vertex 0 sits at the top of the circle.
//! - Interior points are convex combinations of the distinct corners with
//!   normalized uniform weights, hence inside the hull by construction.

use crate::error::{IfsError, Result};
use crate::Vec2;
use rand::Rng;
use std::f64::consts::PI;

/// Smallest polygon the chaos game accepts.
pub const MIN_VERTICES: usize = 3;

/// `n + 1` points on the unit circle, closing vertex included.
pub fn regular_polygon(n: usize) -> Result<Vec<Vec2<f64>>> {
    validate_vertex_count(n)?;
    let step = 2.0 * PI / n as f64;
    Ok((0..=n)
        .map(|k| {
            let theta = step * k as f64;
            Vec2::new(theta.sin(), theta.cos())
        })
        .collect())
}

pub fn validate_vertex_count(n: usize) -> Result<()> {
    if n < MIN_VERTICES {
        return Err(IfsError::invalid(format!(
            "polygon needs at least {MIN_VERTICES} vertices, got {n}"
        )));
    }
    Ok(())
}

/// Contraction ratio must lie strictly inside (0, 1).
pub fn validate_ratio(r: f64) -> Result<()> {
    if !(r.is_finite() && r > 0.0 && r < 1.0) {
        return Err(IfsError::invalid(format!(
            "contraction ratio must lie in (0, 1), got {r}"
        )));
    }
    Ok(())
}

/// `n` uniform(0,1) weights normalized to sum to 1.
pub fn sample_barycentric<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<f64> {
    let mut w: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
    let total: f64 = w.iter().sum();
    if total > 0.0 {
        w.iter_mut().for_each(|x| *x /= total);
    } else {
        // All draws were exactly zero; use the centroid.
        w.iter_mut().for_each(|x| *x = 1.0 / n as f64);
    }
    w
}

/// Convex combination of `vertices[..n]` with random barycentric weights.
///
/// Pre: `vertices.len() >= n` and `n >= 1`.
pub fn sample_interior_point<R: Rng + ?Sized>(
    vertices: &[Vec2<f64>],
    n: usize,
    rng: &mut R,
) -> Vec2<f64> {
    let weights = sample_barycentric(n, rng);
    combine(&vertices[..n], &weights)
}

/// `Σ w_i v_i`.
#[inline]
pub fn combine(vertices: &[Vec2<f64>], weights: &[f64]) -> Vec2<f64> {
    vertices
        .iter()
        .zip(weights)
        .fold(Vec2::zeros(), |acc, (v, w)| acc + v * *w)
}

/// Ratio at which the `n` shrunken copies of an n-gon just touch.
///
/// `1 / (1 + α)` with α = tan(π/n) for n ≡ 0 (mod 4), 2·sin(π/2n) for odd n,
/// and sin(π/n) for n ≡ 2 (mod 4).
pub fn optimal_contraction_ratio(n: usize) -> Result<f64> {
    validate_vertex_count(n)?;
    let nf = n as f64;
    let alpha = match n % 4 {
        0 => (PI / nf).tan(),
        2 => (PI / nf).sin(),
        _ => 2.0 * (PI / (2.0 * nf)).sin(),
    };
    Ok(1.0 / (1.0 + alpha))
}

/// `true` if `p` lies in the convex polygon `vertices` (CCW or CW), within `eps`.
pub fn contains_eps(vertices: &[Vec2<f64>], p: Vec2<f64>, eps: f64) -> bool {
    let m = vertices.len();
    if m < 3 {
        return false;
    }
    let mut sign = 0.0;
    for i in 0..m {
        let a = vertices[i];
        let b = vertices[(i + 1) % m];
        let cross = (b - a).perp(&(p - a));
        if cross.abs() <= eps {
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn square_vertices_and_closing_duplicate() {
        let v = regular_polygon(4).unwrap();
        assert_eq!(v.len(), 5);
        assert!((v[0] - Vec2::new(0.0, 1.0)).norm() < 1e-12);
        assert!((v[1] - Vec2::new(1.0, 0.0)).norm() < 1e-12);
        assert!((v[2] - Vec2::new(0.0, -1.0)).norm() < 1e-12);
        assert!((v[4] - v[0]).norm() < 1e-12);
    }

    #[test]
    fn rejects_degenerate_inputs() {
        for n in 0..3 {
            assert!(regular_polygon(n).is_err());
        }
        for r in [0.0, 1.0, -1.5, 1.2, f64::NAN, f64::INFINITY] {
            assert!(validate_ratio(r).is_err(), "r={r}");
        }
        assert!(validate_ratio(0.5).is_ok());
    }

    #[test]
    fn optimal_ratio_known_values() {
        let tol = 0.005;
        let cases = [(3, 0.5), (5, 0.618), (6, 0.667), (7, 0.692), (8, 0.707), (10, 0.764)];
        for (n, expected) in cases {
            let r = optimal_contraction_ratio(n).unwrap();
            assert!((r - expected).abs() < tol, "n={n}: {r}");
        }
    }

    #[test]
    fn barycentric_weights_are_normalized() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let w = sample_barycentric(5, &mut rng);
            assert!(w.iter().all(|&x| x >= 0.0));
            assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        }
    }

    proptest! {
        #[test]
        fn vertices_lie_on_unit_circle(n in 3usize..64) {
            let v = regular_polygon(n).unwrap();
            prop_assert_eq!(v.len(), n + 1);
            for p in &v {
                prop_assert!((p.norm_squared() - 1.0).abs() < 1e-12);
            }
        }

        #[test]
        fn interior_points_inside_hull(n in 3usize..16, seed in any::<u64>()) {
            let v = regular_polygon(n).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let p = sample_interior_point(&v, n, &mut rng);
            prop_assert!(contains_eps(&v[..n], p, 1e-12));
        }
    }
}
