//! Discrete rule selection shared by the engines.
//!
//! A `RuleSet` is either uniform over `k` rules (polygon vertices, triangle
//! corners) or an explicit probability vector stored as a cumulative table
//! (affine maps). Weighted selection walks the table and returns the first
//! rule whose cumulative probability is strictly greater than `u`.

use crate::error::{IfsError, Result};
use rand::Rng;

/// Tolerance for "sums to one" checks on probability vectors.
pub const PROBABILITY_SUM_EPS: f64 = 1e-9;

#[derive(Clone, Debug, PartialEq)]
enum Kind {
    Uniform(usize),
    Cumulative(Vec<f64>),
}

/// Weighted discrete distribution over `len()` labeled rules.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleSet {
    kind: Kind,
}

impl RuleSet {
    /// Uniform weights over `k` rules; `k` must be positive.
    pub fn uniform(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(IfsError::invalid("rule set needs at least one rule"));
        }
        Ok(Self::uniform_unchecked(k))
    }

    /// Uniform table for a `k` already known to be positive.
    pub(crate) fn uniform_unchecked(k: usize) -> Self {
        Self {
            kind: Kind::Uniform(k),
        }
    }

    /// Non-uniform weights. Entries must be finite, non-negative and sum to 1.
    pub fn from_probabilities(probabilities: &[f64]) -> Result<Self> {
        if probabilities.is_empty() {
            return Err(IfsError::invalid("probability vector is empty"));
        }
        if let Some(p) = probabilities
            .iter()
            .find(|p| !p.is_finite() || **p < 0.0)
        {
            return Err(IfsError::invalid(format!(
                "probabilities must be finite and non-negative, got {p}"
            )));
        }
        let rules = Self::weighted_unchecked(probabilities);
        let total = match &rules.kind {
            Kind::Cumulative(c) => c[c.len() - 1],
            Kind::Uniform(_) => 1.0,
        };
        if (total - 1.0).abs() > PROBABILITY_SUM_EPS {
            return Err(IfsError::invalid(format!(
                "probabilities must sum to 1, got {total}"
            )));
        }
        Ok(rules)
    }

    /// Cumulative table for a vector already known to be valid.
    pub(crate) fn weighted_unchecked(probabilities: &[f64]) -> Self {
        let mut acc = 0.0;
        let cumulative = probabilities
            .iter()
            .map(|p| {
                acc += p;
                acc
            })
            .collect();
        Self {
            kind: Kind::Cumulative(cumulative),
        }
    }

    pub fn len(&self) -> usize {
        match &self.kind {
            Kind::Uniform(k) => *k,
            Kind::Cumulative(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-rule probabilities (differences of the cumulative table).
    pub fn probabilities(&self) -> Vec<f64> {
        match &self.kind {
            Kind::Uniform(k) => vec![1.0 / *k as f64; *k],
            Kind::Cumulative(c) => {
                let mut prev = 0.0;
                c.iter()
                    .map(|&x| {
                        let p = x - prev;
                        prev = x;
                        p
                    })
                    .collect()
            }
        }
    }

    /// Rule for a uniform draw `u ∈ [0, 1)`: first index with `u < cumulative[j]`.
    ///
    /// When rounding leaves the table total below `u`, falls back to the last
    /// rule with positive weight, never to a zero-probability rule.
    pub fn select(&self, u: f64) -> usize {
        match &self.kind {
            Kind::Uniform(k) => ((u * *k as f64) as usize).min(*k - 1),
            Kind::Cumulative(c) => c
                .iter()
                .position(|&p| u < p)
                .unwrap_or_else(|| last_positive(c)),
        }
    }

    /// Draw one rule index in `[0, len())`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        match &self.kind {
            Kind::Uniform(k) => rng.gen_range(0..*k),
            Kind::Cumulative(_) => self.select(rng.gen::<f64>()),
        }
    }
}

/// Index of the last step where the cumulative table increases.
fn last_positive(cumulative: &[f64]) -> usize {
    let mut prev = 0.0;
    let mut last = 0;
    for (j, &x) in cumulative.iter().enumerate() {
        if x > prev {
            last = j;
        }
        prev = x;
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn cumulative_selection_is_first_strict_match() {
        let rules = RuleSet::from_probabilities(&[0.01, 0.85, 0.07, 0.07]).unwrap();
        assert_eq!(rules.select(0.0), 0);
        assert_eq!(rules.select(0.009), 0);
        // 0.01 is not < 0.01, so the next rule wins.
        assert_eq!(rules.select(0.01), 1);
        assert_eq!(rules.select(0.5), 1);
        assert_eq!(rules.select(0.9), 2);
        assert_eq!(rules.select(0.95), 3);
        assert_eq!(rules.select(0.999_999_999_999), 3);
    }

    #[test]
    fn overflow_skips_trailing_zero_weights() {
        let rules = RuleSet::from_probabilities(&[0.3, 0.7, 0.0, 0.0]).unwrap();
        assert_eq!(rules.select(1.0), 1);
        assert_eq!(rules.select(0.999_999_999_999_9), 1);
        let fern = RuleSet::from_probabilities(&[0.01, 0.85, 0.07, 0.07]).unwrap();
        assert_eq!(fern.select(1.0), 3);
        let head = RuleSet::from_probabilities(&[1.0, 0.0]).unwrap();
        assert_eq!(head.select(1.0), 0);
    }

    #[test]
    fn rejects_bad_probability_vectors() {
        assert!(RuleSet::from_probabilities(&[0.5, 0.5, 0.5]).is_err());
        assert!(RuleSet::from_probabilities(&[]).is_err());
        assert!(RuleSet::from_probabilities(&[1.5, -0.5]).is_err());
        assert!(RuleSet::from_probabilities(&[f64::NAN, 1.0]).is_err());
        assert!(RuleSet::uniform(0).is_err());
    }

    #[test]
    fn probabilities_round_trip_table() {
        let p = [0.01, 0.85, 0.07, 0.07];
        let rules = RuleSet::from_probabilities(&p).unwrap();
        for (a, b) in rules.probabilities().iter().zip(p.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
        let u = RuleSet::uniform(4).unwrap().probabilities();
        assert_eq!(u, vec![0.25; 4]);
    }

    #[test]
    fn uniform_samples_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let rules = RuleSet::uniform(5).unwrap();
        let mut seen = [0usize; 5];
        for _ in 0..5000 {
            seen[rules.sample(&mut rng)] += 1;
        }
        assert!(seen.iter().all(|&c| c > 800));
    }
}
