//! Assessment orchestration - ties together scoring, likelihood, trajectory and banding

use crate::error::{ModelError, Result};
use crate::likelihood;
use crate::model::{
    LikelihoodPercent, PredispositionScore, RainfallIntensity, Region, Soil, Terrain,
    WindowLength,
};
use crate::predisposition::{self, PredispositionFactors};
use crate::risk::{self, RiskBand, RiskThresholds};
use crate::trajectory::{self, Trajectory};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Raw, unvalidated scenario as supplied by a caller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioInput {
    pub region: String,
    pub terrain: String,
    pub soil: String,
    /// Rainfall intensity, mm/day
    pub intensity: f64,
    pub window_days: u32,
    /// Display-only date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl ScenarioInput {
    /// Validate every field, failing on the first out-of-domain value
    pub fn validate(&self) -> Result<Scenario> {
        Ok(Scenario {
            region: self.region.parse()?,
            terrain: self.terrain.parse()?,
            soil: self.soil.parse()?,
            intensity: RainfallIntensity::new(self.intensity)?,
            window: WindowLength::new(self.window_days)?,
            date: self.date,
        })
    }
}

/// Validated model inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scenario {
    pub region: Region,
    pub terrain: Terrain,
    pub soil: Soil,
    #[serde(rename = "intensity_mm_per_day")]
    pub intensity: RainfallIntensity,
    #[serde(rename = "window_days")]
    pub window: WindowLength,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Highest trajectory point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Peak {
    pub day: usize,
    pub likelihood: LikelihoodPercent,
}

/// Complete model output for one scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub scenario: Scenario,
    pub factors: PredispositionFactors,
    pub predisposition: PredispositionScore,
    pub likelihood: LikelihoodPercent,
    pub band: RiskBand,
    pub trajectory: Trajectory,
    pub peak: Peak,
    /// Last minus first trajectory point, percentage points
    pub trend: f64,
}

/// Run the full model on a validated scenario
pub fn assess(scenario: &Scenario, thresholds: &RiskThresholds) -> Assessment {
    let predisposition =
        predisposition::score(scenario.region, scenario.terrain, scenario.soil);
    let likelihood =
        likelihood::current_likelihood(predisposition, scenario.intensity, scenario.window);
    let trajectory = trajectory::project(likelihood);
    let band = risk::assign_risk_band_with_thresholds(likelihood, thresholds);
    let (peak_day, peak_value) = trajectory.peak();

    tracing::debug!(
        region = %scenario.region,
        terrain = %scenario.terrain,
        soil = %scenario.soil,
        intensity = scenario.intensity.mm_per_day(),
        window_days = scenario.window.days(),
        predisposition = predisposition.value(),
        likelihood = likelihood.percent(),
        band = band.as_str(),
        "assessed scenario"
    );

    Assessment {
        scenario: *scenario,
        factors: PredispositionFactors::of(scenario.region, scenario.terrain, scenario.soil),
        predisposition,
        likelihood,
        band,
        trajectory,
        peak: Peak {
            day: peak_day,
            likelihood: peak_value,
        },
        trend: trajectory.trend(),
    }
}

/// Validate a batch of raw inputs; nothing is computed unless all are valid
pub fn validate_batch(inputs: &[ScenarioInput]) -> std::result::Result<Vec<Scenario>, BatchError> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            input
                .validate()
                .map_err(|source| BatchError { index, source })
        })
        .collect()
}

/// A batch entry failed validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("scenario #{index} failed validation")]
pub struct BatchError {
    pub index: usize,
    #[source]
    pub source: ModelError,
}

/// Assess many scenarios and sort the results deterministically
pub fn assess_batch(scenarios: &[Scenario], thresholds: &RiskThresholds) -> Vec<Assessment> {
    let assessments = scenarios.iter().map(|s| assess(s, thresholds)).collect();
    sort_assessments(assessments)
}

/// Sort assessments deterministically
pub fn sort_assessments(mut assessments: Vec<Assessment>) -> Vec<Assessment> {
    assessments.sort_by(|a, b| {
        // 1. Likelihood descending
        b.likelihood
            .percent()
            .partial_cmp(&a.likelihood.percent())
            .unwrap_or(Ordering::Equal)
            // 2. Site factors in declaration order
            .then_with(|| a.scenario.region.cmp(&b.scenario.region))
            .then_with(|| a.scenario.terrain.cmp(&b.scenario.terrain))
            .then_with(|| a.scenario.soil.cmp(&b.scenario.soil))
            // 3. Rainfall inputs ascending
            .then_with(|| a.scenario.window.cmp(&b.scenario.window))
            .then_with(|| {
                a.scenario
                    .intensity
                    .partial_cmp(&b.scenario.intensity)
                    .unwrap_or(Ordering::Equal)
            })
            // 4. Date ascending, undated first
            .then_with(|| a.scenario.date.cmp(&b.scenario.date))
    });
    assessments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(region: &str, terrain: &str, soil: &str, intensity: f64, window: u32) -> ScenarioInput {
        ScenarioInput {
            region: region.to_string(),
            terrain: terrain.to_string(),
            soil: soil.to_string(),
            intensity,
            window_days: window,
            date: None,
        }
    }

    #[test]
    fn test_assess_reference_scenario() {
        let scenario = input("Assam", "FlatPlain", "Clayey", 120.0, 7)
            .validate()
            .unwrap();
        let a = assess(&scenario, &RiskThresholds::default());
        assert!((a.predisposition.value() - 0.80).abs() < 1e-12);
        assert!((a.likelihood.percent() - 93.46).abs() < 0.01);
        assert_eq!(a.band, RiskBand::Severe);
        assert!((a.trajectory.points()[0].percent() - a.likelihood.percent()).abs() < 1e-9);
        assert_eq!(a.peak.likelihood, a.trajectory.peak().1);
    }

    #[test]
    fn test_validate_reports_first_bad_field() {
        let err = input("Assam", "FlatPlain", "Clayey", 120.0, 0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "window_days");

        let err = input("Narnia", "FlatPlain", "Clayey", 999.0, 0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), "region");
    }

    #[test]
    fn test_validate_batch_names_entry() {
        let inputs = vec![
            input("Assam", "FlatPlain", "Clayey", 120.0, 7),
            input("Kerala", "Undulating", "Loamy", 350.0, 7),
        ];
        let err = validate_batch(&inputs).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.source.field(), "intensity");
    }

    #[test]
    fn test_batch_sorted_by_likelihood_descending() {
        let inputs = vec![
            input("Rajasthan", "HillySteep", "Sandy", 10.0, 1),
            input("Assam", "FlatPlain", "Clayey", 200.0, 14),
            input("Kerala", "Undulating", "Loamy", 80.0, 5),
        ];
        let scenarios = validate_batch(&inputs).unwrap();
        let results = assess_batch(&scenarios, &RiskThresholds::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].scenario.region, Region::Assam);
        assert_eq!(results[2].scenario.region, Region::Rajasthan);
        for pair in results.windows(2) {
            assert!(pair[0].likelihood.percent() >= pair[1].likelihood.percent());
        }
    }

    #[test]
    fn test_ties_broken_by_region_order() {
        // identical site factors and rainfall in two high-tier regions
        let inputs = vec![
            input("Odisha", "FlatPlain", "Loamy", 50.0, 3),
            input("Bihar", "FlatPlain", "Loamy", 50.0, 3),
        ];
        let scenarios = validate_batch(&inputs).unwrap();
        let results = assess_batch(&scenarios, &RiskThresholds::default());
        assert_eq!(results[0].scenario.region, Region::Bihar);
        assert_eq!(results[1].scenario.region, Region::Odisha);
    }

    #[test]
    fn test_scenario_input_from_json() {
        let json = r#"{
            "region": "West Bengal",
            "terrain": "undulating",
            "soil": "loamy",
            "intensity": 64.5,
            "window_days": 3,
            "date": "2024-07-15"
        }"#;
        let raw: ScenarioInput = serde_json::from_str(json).unwrap();
        let scenario = raw.validate().unwrap();
        assert_eq!(scenario.region, Region::WestBengal);
        assert_eq!(scenario.date, NaiveDate::from_ymd_opt(2024, 7, 15));
    }

    #[test]
    fn test_scenario_input_rejects_unknown_fields() {
        let json = r#"{"region": "Assam", "terrain": "flat-plain", "soil": "clayey",
            "intensity": 10, "window_days": 2, "humidity": 80}"#;
        assert!(serde_json::from_str::<ScenarioInput>(json).is_err());
    }
}
