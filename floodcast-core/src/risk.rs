//! Risk band classification
//!
//! Global invariants enforced:
//! - Bands are ordered and cover [0, 100] without gaps
//! - Classification is monotone in the likelihood

use crate::model::LikelihoodPercent;
use serde::{Deserialize, Serialize};

/// Risk band classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,      // < 25
    Moderate, // 25-50
    High,     // 50-75
    Severe,   // >= 75
}

impl RiskBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskBand::Low => "low",
            RiskBand::Moderate => "moderate",
            RiskBand::High => "high",
            RiskBand::Severe => "severe",
        }
    }
}

/// Configurable risk band thresholds, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    pub moderate: f64,
    pub high: f64,
    pub severe: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            moderate: 25.0,
            high: 50.0,
            severe: 75.0,
        }
    }
}

/// Assign risk band with default thresholds
pub fn assign_risk_band(likelihood: LikelihoodPercent) -> RiskBand {
    assign_risk_band_with_thresholds(likelihood, &RiskThresholds::default())
}

/// Assign risk band with custom thresholds
pub fn assign_risk_band_with_thresholds(
    likelihood: LikelihoodPercent,
    thresholds: &RiskThresholds,
) -> RiskBand {
    let pct = likelihood.percent();
    if pct < thresholds.moderate {
        RiskBand::Low
    } else if pct < thresholds.high {
        RiskBand::Moderate
    } else if pct < thresholds.severe {
        RiskBand::High
    } else {
        RiskBand::Severe
    }
}
