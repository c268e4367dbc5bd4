//! floodcast core library - rainfall-driven flood likelihood model

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Every model function is pure and total over its typed inputs
// - Inputs are validated once, at construction, and never clamped silently
// - No global mutable state
// - No randomness, clocks, threads, or async
// - Identical input yields byte-for-byte identical output

pub mod assessment;
pub mod config;
pub mod error;
pub mod likelihood;
pub mod model;
pub mod predisposition;
pub mod report;
pub mod risk;
pub mod trajectory;

pub use assessment::{assess, assess_batch, Assessment, Scenario, ScenarioInput};
pub use config::ResolvedConfig;
pub use error::ModelError;
pub use likelihood::current_likelihood;
pub use model::{
    LikelihoodPercent, PredispositionScore, RainfallIntensity, Region, Soil, Terrain,
    WindowLength,
};
pub use predisposition::score;
pub use report::{render_batch_json, render_batch_text, render_json, render_text};
pub use risk::{RiskBand, RiskThresholds};
pub use trajectory::{project, Trajectory, TRAJECTORY_DAYS};

use anyhow::Context;
use std::path::Path;

/// Read a JSON array of raw scenarios
pub fn load_scenarios(path: &Path) -> anyhow::Result<Vec<ScenarioInput>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenarios: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse scenarios: {}", path.display()))
}

pub struct BatchOptions {
    pub min_likelihood: Option<f64>,
    pub top_n: Option<usize>,
}

/// Assess a batch of raw scenarios and apply the report filters
///
/// Every entry is validated before anything is computed.
pub fn assess_all(
    inputs: &[ScenarioInput],
    options: &BatchOptions,
    thresholds: &RiskThresholds,
) -> anyhow::Result<Vec<Assessment>> {
    let scenarios = assessment::validate_batch(inputs)?;
    tracing::debug!(count = scenarios.len(), "validated batch");

    let sorted = assess_batch(&scenarios, thresholds);

    // Drop anything under the likelihood floor
    let filtered = sorted.into_iter().filter(|a| match options.min_likelihood {
        Some(min) => a.likelihood.percent() >= min,
        None => true,
    });

    // Keep the top N
    let final_assessments = if let Some(top_n) = options.top_n {
        filtered.take(top_n).collect()
    } else {
        filtered.collect()
    };

    Ok(final_assessments)
}
