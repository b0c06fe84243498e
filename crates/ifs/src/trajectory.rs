//! Owned results of one iteration call.

use crate::color::ColorSequence;
use crate::Vec2;

/// Generated points plus the rule chosen to reach each one.
///
/// `trace[i]` is the rule that produced `points[i]`; the seed point carries the sentinel `0`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    pub points: Vec<Vec2<f64>>,
    pub trace: Vec<usize>,
}

impl Trajectory {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            points: Vec::with_capacity(cap),
            trace: Vec::with_capacity(cap),
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, p: Vec2<f64>, rule: usize) {
        self.points.push(p);
        self.trace.push(rule);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop the first `discard` entries from both sequences.
    pub fn trim_front(&mut self, discard: usize) {
        let k = discard.min(self.points.len());
        self.points.drain(..k);
        self.trace.drain(..k);
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }
}

/// A trajectory with one color per point.
#[derive(Clone, Debug, PartialEq)]
pub struct ColoredTrajectory {
    pub trajectory: Trajectory,
    pub colors: ColorSequence,
}

impl ColoredTrajectory {
    /// Trim both the trajectory and its colors by the same `discard`.
    pub(crate) fn trimmed(mut trajectory: Trajectory, mut colors: ColorSequence, discard: usize) -> Self {
        trajectory.trim_front(discard);
        colors.trim_front(discard);
        Self { trajectory, colors }
    }

    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }
}
