//! Iterated-function-system point generators.
//!
//! Pipeline
//! - `polygon` builds the reference points; `chaos`, `affine` and `triangle`
//!   iterate a random rule and return a `Trajectory` (points + rule trace).
//! - `color` turns a rule trace into per-point colors.
//! - `variation` warps any finished point set.
//!
//! Every engine owns its random source and every call returns fresh, owned
//! data, so seeded runs are reproducible and independent runs can be spread
//! across threads.

pub mod affine;
pub mod chaos;
pub mod color;
mod error;
pub mod polygon;
pub mod rng;
pub mod rules;
pub mod trajectory;
pub mod triangle;
pub mod variation;

pub use error::{IfsError, Result};
pub use nalgebra::Vector2 as Vec2;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::affine::{AffineIfs, AffineMap, FERN_MAPS, FERN_PROBABILITIES};
    pub use crate::chaos::{ChaosCfg, ChaosGame};
    pub use crate::color::{ColorScheme, ColorSequence, Rgb, RgbCoupling};
    pub use crate::polygon::{optimal_contraction_ratio, regular_polygon, sample_interior_point};
    pub use crate::rng::ReplayToken;
    pub use crate::rules::RuleSet;
    pub use crate::trajectory::{ColoredTrajectory, Trajectory};
    pub use crate::triangle::{triangle_corners, Triangle, TriangleCfg};
    pub use crate::variation::{flip_y, linear_combination, Blend, Variation};
    pub use crate::{IfsError, Result, Vec2};
}

#[cfg(test)]
mod tests;
