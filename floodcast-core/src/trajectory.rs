//! Forward trajectory of the likelihood
//!
//! For day offset i in 0..14, with base = likelihood / 100:
//!
//! value_i = clamp(base + sin(i / 3) * 0.05 - i * 0.005, 0, 1) * 100
//!
//! The oscillation is a fixed sine wave, not noise: identical likelihoods
//! always yield identical trajectories.

use crate::model::LikelihoodPercent;
use serde::Serialize;

/// Number of day offsets in a trajectory
pub const TRAJECTORY_DAYS: usize = 14;

const OSCILLATION_AMPLITUDE: f64 = 0.05;
const OSCILLATION_PERIOD_DIVISOR: f64 = 3.0;
const DAILY_DECAY: f64 = 0.005;

/// Likelihood for each day offset from now, index 0 is today
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trajectory([LikelihoodPercent; TRAJECTORY_DAYS]);

impl Trajectory {
    pub fn points(&self) -> &[LikelihoodPercent; TRAJECTORY_DAYS] {
        &self.0
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(LikelihoodPercent::percent)
    }

    /// Day offset and value of the highest point (earliest on ties)
    pub fn peak(&self) -> (usize, LikelihoodPercent) {
        let mut best = (0, self.0[0]);
        for (day, point) in self.0.iter().enumerate().skip(1) {
            if point.percent() > best.1.percent() {
                best = (day, *point);
            }
        }
        best
    }

    /// Change between the last and first day, in percentage points
    pub fn trend(&self) -> f64 {
        self.0[TRAJECTORY_DAYS - 1].percent() - self.0[0].percent()
    }
}

/// Project a likelihood forward over the fixed horizon
pub fn project(current: LikelihoodPercent) -> Trajectory {
    let base = current.fraction();
    let mut points = [LikelihoodPercent(0.0); TRAJECTORY_DAYS];
    for (i, point) in points.iter_mut().enumerate() {
        let day = i as f64;
        let value = base + (day / OSCILLATION_PERIOD_DIVISOR).sin() * OSCILLATION_AMPLITUDE
            - day * DAILY_DECAY;
        *point = LikelihoodPercent(value.clamp(0.0, 1.0) * 100.0);
    }
    Trajectory(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pct(v: f64) -> LikelihoodPercent {
        LikelihoodPercent::new(v).unwrap()
    }

    #[test]
    fn test_length_and_bounds() {
        for step in 0..=100 {
            let t = project(pct(step as f64));
            assert_eq!(t.points().len(), TRAJECTORY_DAYS);
            assert!(t.values().all(|v| (0.0..=100.0).contains(&v)));
        }
    }

    #[test]
    fn test_day_zero_equals_current() {
        let t = project(pct(42.5));
        assert!((t.points()[0].percent() - 42.5).abs() < 1e-9);
    }

    #[test]
    fn test_known_point() {
        // day 3: 0.5 + sin(1) * 0.05 - 0.015
        let t = project(pct(50.0));
        let expected = (0.5 + 1f64.sin() * 0.05 - 0.015) * 100.0;
        assert!((t.points()[3].percent() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_clamped_at_extremes() {
        let top = project(pct(100.0));
        assert_eq!(top.points()[1].percent(), 100.0);
        let bottom = project(pct(0.0));
        // sin(13/3) is negative, pushing the raw value below zero
        assert_eq!(bottom.points()[13].percent(), 0.0);
    }

    #[test]
    fn test_idempotent() {
        let a = project(pct(93.46));
        let b = project(pct(93.46));
        for (x, y) in a.values().zip(b.values()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_peak_and_trend() {
        let t = project(pct(50.0));
        let (day, value) = t.peak();
        assert!(t.values().all(|v| v <= value.percent()));
        assert!(day > 0);
        assert!(t.trend() < 0.0);
    }
}
