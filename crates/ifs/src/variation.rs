//! Nonlinear 2D variations applied to finished point sets.
//!
//! All kinds share `r = √(x² + y²)` and `θ = atan2(x, y)` (note the argument
//! order: θ is measured from the +y axis, matching the polygon layout).

use crate::error::{IfsError, Result};
use crate::Vec2;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variation {
    Linear,
    Handkerchief,
    Swirl,
    Disc,
    Diamond,
    Power,
}

impl Variation {
    pub const ALL: [Variation; 6] = [
        Variation::Linear,
        Variation::Handkerchief,
        Variation::Swirl,
        Variation::Disc,
        Variation::Diamond,
        Variation::Power,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variation::Linear => "linear",
            Variation::Handkerchief => "handkerchief",
            Variation::Swirl => "swirl",
            Variation::Disc => "disc",
            Variation::Diamond => "diamond",
            Variation::Power => "power",
        }
    }

    /// Fails with `InvalidArgument` for names outside `ALL`.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name() == name)
            .ok_or_else(|| IfsError::invalid(format!("unknown variation {name:?}")))
    }

    pub fn apply(self, p: Vec2<f64>) -> Vec2<f64> {
        let (x, y) = (p.x, p.y);
        let polar = || (x.hypot(y), x.atan2(y));
        match self {
            Variation::Linear => p,
            Variation::Handkerchief => {
                let (r, theta) = polar();
                Vec2::new(r * (theta + r).sin(), r * (theta - r).cos())
            }
            Variation::Swirl => {
                let (s, c) = (x * x + y * y).sin_cos();
                Vec2::new(x * s - y * c, x * c + y * s)
            }
            Variation::Disc => {
                let (r, theta) = polar();
                let k = theta / PI;
                Vec2::new(k * (PI * r).sin(), k * (PI * r).cos())
            }
            Variation::Diamond => {
                let (r, theta) = polar();
                Vec2::new(theta.sin() * r.cos(), theta.cos() * r.sin())
            }
            Variation::Power => {
                let (r, theta) = polar();
                let (s, c) = theta.sin_cos();
                let rs = r.powf(s);
                Vec2::new(rs * c, rs * s)
            }
        }
    }

    /// Elementwise `apply`.
    pub fn transform(self, points: &[Vec2<f64>]) -> Vec<Vec2<f64>> {
        points.iter().map(|&p| self.apply(p)).collect()
    }
}

impl fmt::Display for Variation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variation {
    type Err = IfsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

fn check_weight(w: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&w) {
        return Err(IfsError::invalid(format!(
            "blend weight must lie in [0, 1], got {w}"
        )));
    }
    Ok(())
}

/// `w·V1(p) + (1−w)·V2(p)` for every point.
pub fn linear_combination(
    v1: Variation,
    v2: Variation,
    points: &[Vec2<f64>],
    w: f64,
) -> Result<Vec<Vec2<f64>>> {
    check_weight(w)?;
    Ok(points
        .iter()
        .map(|&p| v1.apply(p) * w + v2.apply(p) * (1.0 - w))
        .collect())
}

/// Two variations evaluated once over a point set, blended on demand.
#[derive(Clone, Debug)]
pub struct Blend {
    first: Vec<Vec2<f64>>,
    second: Vec<Vec2<f64>>,
}

impl Blend {
    pub fn new(v1: Variation, v2: Variation, points: &[Vec2<f64>]) -> Self {
        Self {
            first: v1.transform(points),
            second: v2.transform(points),
        }
    }

    pub fn len(&self) -> usize {
        self.first.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    pub fn at(&self, w: f64) -> Result<Vec<Vec2<f64>>> {
        check_weight(w)?;
        Ok(self
            .first
            .iter()
            .zip(&self.second)
            .map(|(a, b)| a * w + b * (1.0 - w))
            .collect())
    }
}

/// `(x, y) → (x, −y)`; chaos-game output is mirrored this way before warping.
pub fn flip_y(points: &[Vec2<f64>]) -> Vec<Vec2<f64>> {
    points.iter().map(|p| Vec2::new(p.x, -p.y)).collect()
}

/// Regular `side × side` grid over `[-1, 1]²`, row-major in y.
pub fn unit_grid(side: usize) -> Vec<Vec2<f64>> {
    let coord = |i: usize| {
        if side <= 1 {
            -1.0
        } else {
            -1.0 + 2.0 * i as f64 / (side - 1) as f64
        }
    };
    let mut out = Vec::with_capacity(side * side);
    for iy in 0..side {
        for ix in 0..side {
            out.push(Vec2::new(coord(ix), coord(iy)));
        }
    }
    out
}
