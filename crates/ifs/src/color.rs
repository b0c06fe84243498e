//! Per-point colors derived from the rule sequence of a run.
//!
//! - Scalar: `C[0] = trace[0]`, `C[i+1] = (C[i] + trace[i+1]) / 2`.
//! - RGB: `C[0] = 0`, `C[i+1] = (C[i] + palette[j_{i+1}]) / 2` with the
//!   red/green/blue palette. The pick `j` is either the geometric rule
//!   (`RgbCoupling::Trace`) or a fresh draw (`RgbCoupling::Independent`).
//! - Corner: each point takes the pure palette color of its rule.

use crate::error::{IfsError, Result};
use nalgebra::Vector3;
use rand::Rng;

/// RGB triple with channels in [0, 1].
pub type Rgb = Vector3<f64>;

/// Palette entries for picks 0, 1, 2.
pub const PALETTE: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

#[inline]
pub fn palette(j: usize) -> Option<Rgb> {
    PALETTE.get(j).map(|c| Rgb::new(c[0], c[1], c[2]))
}

/// Which draw selects the palette entry in the RGB scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RgbCoupling {
    /// Fresh uniform pick in {0, 1, 2} per step, unrelated to the geometry.
    Independent,
    /// Reuse the rule index that moved the point.
    Trace,
}

/// Color scheme selected by the caller.
///
/// `Triangle::iterate_colored` only accepts `Rgb(RgbCoupling::Trace)` for RGB
/// output and returns `InvalidArgument` for `Rgb(RgbCoupling::Independent)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    Scalar,
    Rgb(RgbCoupling),
    Corner,
}

/// One color per trajectory point.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorSequence {
    Scalar(Vec<f64>),
    Rgb(Vec<Rgb>),
}

impl ColorSequence {
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(c) => c.len(),
            Self::Rgb(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the first `discard` colors (all of them if `discard >= len`).
    pub fn trim_front(&mut self, discard: usize) {
        match self {
            Self::Scalar(c) => {
                c.drain(..discard.min(c.len()));
            }
            Self::Rgb(c) => {
                c.drain(..discard.min(c.len()));
            }
        }
    }
}

impl ColorScheme {
    /// Colors for a full (untrimmed) trace.
    pub fn assign<R: Rng + ?Sized>(&self, trace: &[usize], rng: &mut R) -> Result<ColorSequence> {
        Ok(match self {
            Self::Scalar => ColorSequence::Scalar(scalar_blend(trace)),
            Self::Rgb(RgbCoupling::Independent) => ColorSequence::Rgb(rgb_gradient(rng, trace.len())),
            Self::Rgb(RgbCoupling::Trace) => ColorSequence::Rgb(rgb_blend(trace)?),
            Self::Corner => ColorSequence::Rgb(corner_colors(trace)?),
        })
    }
}

/// Running midpoint average of the rule indices.
pub fn scalar_blend(trace: &[usize]) -> Vec<f64> {
    let mut out = Vec::with_capacity(trace.len());
    let mut iter = trace.iter();
    if let Some(&first) = iter.next() {
        let mut c = first as f64;
        out.push(c);
        for &j in iter {
            c = (c + j as f64) / 2.0;
            out.push(c);
        }
    }
    out
}

/// RGB midpoint recursion driven by `picks`; `picks[0]` is the seed sentinel and is ignored.
pub fn rgb_blend(picks: &[usize]) -> Result<Vec<Rgb>> {
    let mut out = Vec::with_capacity(picks.len());
    if picks.is_empty() {
        return Ok(out);
    }
    let mut c = Rgb::zeros();
    out.push(c);
    for &j in &picks[1..] {
        let target = palette(j)
            .ok_or_else(|| IfsError::invalid(format!("palette index must be 0, 1 or 2, got {j}")))?;
        c = (c + target) / 2.0;
        out.push(c);
    }
    Ok(out)
}

/// `len` RGB colors from freshly drawn palette picks.
pub fn rgb_gradient<R: Rng + ?Sized>(rng: &mut R, len: usize) -> Vec<Rgb> {
    let mut out = Vec::with_capacity(len);
    if len == 0 {
        return out;
    }
    let mut c = Rgb::zeros();
    out.push(c);
    for _ in 1..len {
        let target = Rgb::from(PALETTE[rng.gen_range(0..PALETTE.len())]);
        c = (c + target) / 2.0;
        out.push(c);
    }
    out
}

/// Pure palette color of each point's rule.
pub fn corner_colors(trace: &[usize]) -> Result<Vec<Rgb>> {
    trace
        .iter()
        .map(|&j| {
            palette(j)
                .ok_or_else(|| IfsError::invalid(format!("palette index must be 0, 1 or 2, got {j}")))
        })
        .collect()
}
