//! End-to-end checks across engines, colors and variations.

use crate::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn chaos_to_variation_pipeline() {
    let mut game = ChaosGame::seeded(4, 0.3, 77).unwrap();
    let run = game
        .iterate_colored(2_000, 5, ColorScheme::Rgb(RgbCoupling::Independent))
        .unwrap();
    let pts = flip_y(&run.trajectory.points);
    for v in Variation::ALL {
        let warped = v.transform(&pts);
        assert_eq!(warped.len(), run.colors.len());
        assert!(warped.iter().all(|p| p.x.is_finite() && p.y.is_finite()), "{v}");
    }
    let blend = Blend::new(Variation::Linear, Variation::Disc, &pts);
    for w in [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0] {
        assert_eq!(blend.at(w).unwrap().len(), run.len());
    }
}

#[test]
fn errors_are_invalid_argument() {
    let err = ChaosGame::seeded(2, 0.5, 0).unwrap_err();
    assert!(matches!(err, IfsError::InvalidArgument { .. }));
    assert!(err.to_string().starts_with("invalid argument:"));

    let err = AffineIfs::new(FERN_MAPS.to_vec(), &[0.5, 0.5, 0.5], StdRng::seed_from_u64(0))
        .unwrap_err();
    assert!(matches!(err, IfsError::InvalidArgument { .. }));

    let err = "julia".parse::<Variation>().unwrap_err();
    assert!(err.to_string().contains("julia"));
}

#[test]
fn triangle_and_three_gon_share_the_recurrence() {
    // Same contraction, different corners: both stay inside their hulls and
    // cover all three corner regions.
    let mut tri = Triangle::unit(StdRng::seed_from_u64(1));
    let mut game = ChaosGame::seeded(3, 0.5, 1).unwrap();
    for trace in [tri.iterate(3_000, 5).trace, game.iterate(3_000, 5).trace] {
        let mut seen = [false; 3];
        trace.iter().for_each(|&j| seen[j] = true);
        assert!(seen.iter().all(|&s| s));
    }
}

#[test]
fn rule_history_drives_scalar_colors() {
    let mut fern = AffineIfs::barnsley_fern_seeded(4);
    let t = fern.iterate(0.0, 0.0, 1_000);
    let c = crate::color::scalar_blend(&t.trace);
    assert_eq!(c.len(), t.len());
    assert!(c.iter().all(|&x| (0.0..=3.0).contains(&x)));
}
