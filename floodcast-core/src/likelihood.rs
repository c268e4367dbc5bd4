//! Current flood likelihood
//!
//! Logistic transform of rainfall, window length and predisposition:
//!
//! x = 0.012 * intensity + 0.06 * window_days + 2.5 * predisposition - 1.2
//! p = 1 / (1 + exp(-x))
//! likelihood = clamp(p, 0, 1) * 100
//!
//! Global invariants enforced:
//! - Result always in [0, 100]
//! - Monotone non-decreasing in each input
//! - Calibration constants are fixed, never read from configuration

use crate::model::{LikelihoodPercent, PredispositionScore, RainfallIntensity, WindowLength};

/// Calibration weights of the logistic model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub intensity: f64,
    pub window: f64,
    pub predisposition: f64,
    pub offset: f64,
}

pub const CALIBRATION: Calibration = Calibration {
    intensity: 0.012,
    window: 0.06,
    predisposition: 2.5,
    offset: -1.2,
};

/// Linear predictor fed into the logistic function
pub fn logit(
    predisposition: PredispositionScore,
    intensity: RainfallIntensity,
    window: WindowLength,
) -> f64 {
    CALIBRATION.intensity * intensity.mm_per_day()
        + CALIBRATION.window * f64::from(window.days())
        + CALIBRATION.predisposition * predisposition.value()
        + CALIBRATION.offset
}

pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Compute the current likelihood percentage
pub fn current_likelihood(
    predisposition: PredispositionScore,
    intensity: RainfallIntensity,
    window: WindowLength,
) -> LikelihoodPercent {
    let p = logistic(logit(predisposition, intensity, window));
    LikelihoodPercent(p.clamp(0.0, 1.0) * 100.0)
}
