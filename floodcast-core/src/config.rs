//! Configuration file support for floodcast
//!
//! Loads presentation-level settings from JSON files: the initial scenario shown
//! when the caller supplies no value, risk band thresholds, and batch filters.
//! The model's calibration constants are not configurable.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.floodcastrc.json` in the working directory
//! 3. `floodcast.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::model::{RainfallIntensity, Region, Soil, Terrain, WindowLength};
use crate::risk::RiskThresholds;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_REGION: Region = Region::Assam;
const DEFAULT_TERRAIN: Terrain = Terrain::FlatPlain;
const DEFAULT_SOIL: Soil = Soil::Clayey;
const DEFAULT_INTENSITY: f64 = 120.0;
const DEFAULT_WINDOW_DAYS: u32 = 7;

/// floodcast configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloodcastConfig {
    /// Initial scenario values
    #[serde(default)]
    pub defaults: Option<DefaultsConfig>,

    /// Custom risk band thresholds
    #[serde(default)]
    pub thresholds: Option<ThresholdConfig>,

    /// Minimum likelihood to report in batch mode (default: report all)
    #[serde(default)]
    pub min_likelihood: Option<f64>,

    /// Maximum number of batch results to show
    #[serde(default)]
    pub top: Option<usize>,
}

/// Initial scenario values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Region name (default: Assam)
    pub region: Option<String>,
    /// Terrain class (default: flat-plain)
    pub terrain: Option<String>,
    /// Soil class (default: clayey)
    pub soil: Option<String>,
    /// Rainfall intensity in mm/day (default: 120)
    pub intensity: Option<f64>,
    /// Observation window in days (default: 7)
    pub window_days: Option<u32>,
}

/// Custom risk band thresholds, in percent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdConfig {
    /// Likelihood threshold for moderate risk (default: 25)
    pub moderate: Option<f64>,
    /// Likelihood threshold for high risk (default: 50)
    pub high: Option<f64>,
    /// Likelihood threshold for severe risk (default: 75)
    pub severe: Option<f64>,
}

/// Fully typed initial scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioDefaults {
    pub region: Region,
    pub terrain: Terrain,
    pub soil: Soil,
    pub intensity: RainfallIntensity,
    pub window_days: WindowLength,
}

/// Resolved configuration with every value typed and validated
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub defaults: ScenarioDefaults,
    pub thresholds: RiskThresholds,
    /// Filters
    pub min_likelihood: Option<f64>,
    pub top_n: Option<usize>,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl FloodcastConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        self.resolve_defaults()?;

        if let Some(ref t) = self.thresholds {
            let defaults = RiskThresholds::default();
            let moderate = t.moderate.unwrap_or(defaults.moderate);
            let high = t.high.unwrap_or(defaults.high);
            let severe = t.severe.unwrap_or(defaults.severe);

            for (name, val) in [("moderate", moderate), ("high", high), ("severe", severe)] {
                if val <= 0.0 || val >= 100.0 {
                    anyhow::bail!(
                        "thresholds.{} must be strictly between 0 and 100 (got {})",
                        name,
                        val
                    );
                }
            }
            if moderate >= high {
                anyhow::bail!(
                    "thresholds.moderate ({}) must be less than thresholds.high ({})",
                    moderate,
                    high
                );
            }
            if high >= severe {
                anyhow::bail!(
                    "thresholds.high ({}) must be less than thresholds.severe ({})",
                    high,
                    severe
                );
            }
        }

        if let Some(min) = self.min_likelihood {
            if !(0.0..=100.0).contains(&min) {
                anyhow::bail!("min_likelihood must be between 0 and 100 (got {})", min);
            }
        }

        Ok(())
    }

    fn resolve_defaults(&self) -> Result<ScenarioDefaults> {
        let d = self.defaults.clone().unwrap_or_default();

        let region = match d.region.as_deref() {
            Some(s) => s.parse::<Region>().context("invalid defaults.region")?,
            None => DEFAULT_REGION,
        };
        let terrain = match d.terrain.as_deref() {
            Some(s) => s.parse::<Terrain>().context("invalid defaults.terrain")?,
            None => DEFAULT_TERRAIN,
        };
        let soil = match d.soil.as_deref() {
            Some(s) => s.parse::<Soil>().context("invalid defaults.soil")?,
            None => DEFAULT_SOIL,
        };
        let intensity = RainfallIntensity::new(d.intensity.unwrap_or(DEFAULT_INTENSITY))
            .context("invalid defaults.intensity")?;
        let window_days = WindowLength::new(d.window_days.unwrap_or(DEFAULT_WINDOW_DAYS))
            .context("invalid defaults.window_days")?;

        Ok(ScenarioDefaults {
            region,
            terrain,
            soil,
            intensity,
            window_days,
        })
    }

    /// Resolve config into typed form ready for use
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let defaults = RiskThresholds::default();
        let thresholds = match &self.thresholds {
            Some(t) => RiskThresholds {
                moderate: t.moderate.unwrap_or(defaults.moderate),
                high: t.high.unwrap_or(defaults.high),
                severe: t.severe.unwrap_or(defaults.severe),
            },
            None => defaults,
        };

        Ok(ResolvedConfig {
            defaults: self.resolve_defaults()?,
            thresholds,
            min_likelihood: self.min_likelihood,
            top_n: self.top,
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        FloodcastConfig::default().resolve()
    }
}

/// Discover and load a config file from a directory
///
/// Search order:
/// 1. `.floodcastrc.json`
/// 2. `floodcast.config.json`
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(dir: &Path) -> Result<Option<(FloodcastConfig, PathBuf)>> {
    for name in [".floodcastrc.json", "floodcast.config.json"] {
        let path = dir.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }
    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<FloodcastConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: FloodcastConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config in `dir`.
/// Returns default config if nothing is found.
pub fn load_and_resolve(dir: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(dir)? {
            Some((config, path)) => (config, Some(path)),
            None => (FloodcastConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config_is_valid() {
        let config = FloodcastConfig::default();
        config.validate().expect("default config should be valid");
        let resolved = config.resolve().expect("default config should resolve");
        assert_eq!(resolved.defaults.region, Region::Assam);
        assert_eq!(resolved.defaults.terrain, Terrain::FlatPlain);
        assert_eq!(resolved.defaults.soil, Soil::Clayey);
        assert_eq!(resolved.defaults.intensity.mm_per_day(), 120.0);
        assert_eq!(resolved.defaults.window_days.days(), 7);
        assert_eq!(resolved.thresholds, RiskThresholds::default());
        assert!(resolved.min_likelihood.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "defaults": {
                "region": "Tamil Nadu",
                "terrain": "undulating",
                "soil": "sandy",
                "intensity": 45.5,
                "window_days": 3
            },
            "thresholds": {
                "moderate": 20.0,
                "high": 40.0,
                "severe": 80.0
            },
            "min_likelihood": 10.0,
            "top": 5
        }"#;
        let config: FloodcastConfig = serde_json::from_str(json).unwrap();
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.defaults.region, Region::TamilNadu);
        assert_eq!(resolved.defaults.terrain, Terrain::Undulating);
        assert_eq!(resolved.defaults.soil, Soil::Sandy);
        assert_eq!(resolved.defaults.intensity.mm_per_day(), 45.5);
        assert_eq!(resolved.defaults.window_days.days(), 3);
        assert_eq!(resolved.thresholds.severe, 80.0);
        assert_eq!(resolved.min_likelihood, Some(10.0));
        assert_eq!(resolved.top_n, Some(5));
    }

    #[test]
    fn test_reject_unknown_fields() {
        let json = r#"{"calibration": {"offset": 0.0}}"#;
        let result: Result<FloodcastConfig, _> = serde_json::from_str(json);
        assert!(result.is_err(), "unknown fields should be rejected");
    }

    #[test]
    fn test_reject_unknown_default_region() {
        let json = r#"{"defaults": {"region": "Atlantis"}}"#;
        let config: FloodcastConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_out_of_domain_defaults() {
        let json = r#"{"defaults": {"intensity": 301.0}}"#;
        let config: FloodcastConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());

        let json = r#"{"defaults": {"window_days": 15}}"#;
        let config: FloodcastConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_unordered_thresholds() {
        let json = r#"{"thresholds": {"moderate": 60.0, "high": 40.0}}"#;
        let config: FloodcastConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_threshold_out_of_range() {
        let json = r#"{"thresholds": {"severe": 100.0}}"#;
        let config: FloodcastConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_min_likelihood_out_of_range() {
        let json = r#"{"min_likelihood": -1.0}"#;
        let config: FloodcastConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_thresholds_use_defaults_for_rest() {
        let json = r#"{"thresholds": {"severe": 90.0}}"#;
        let config: FloodcastConfig = serde_json::from_str(json).unwrap();
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.thresholds.moderate, 25.0); // default
        assert_eq!(resolved.thresholds.high, 50.0); // default
        assert_eq!(resolved.thresholds.severe, 90.0);
    }

    #[test]
    fn test_discover_priority_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".floodcastrc.json"), r#"{"top": 1}"#).unwrap();
        fs::write(dir.path().join("floodcast.config.json"), r#"{"top": 2}"#).unwrap();

        let (config, path) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.top, Some(1), ".floodcastrc.json should take priority");
        assert_eq!(path, dir.path().join(".floodcastrc.json"));
    }

    #[test]
    fn test_discover_config_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("floodcast.config.json"),
            r#"{"defaults": {"soil": "loamy"}}"#,
        )
        .unwrap();

        let (config, _) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(
            config.defaults.and_then(|d| d.soil),
            Some("loamy".to_string())
        );
    }

    #[test]
    fn test_no_config_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_and_resolve_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("custom.json");
        fs::write(&config_path, r#"{"defaults": {"region": "Punjab"}}"#).unwrap();

        let resolved = load_and_resolve(dir.path(), Some(&config_path)).unwrap();
        assert_eq!(resolved.defaults.region, Region::Punjab);
        assert_eq!(resolved.config_path, Some(config_path));
    }

    #[test]
    fn test_load_and_resolve_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = load_and_resolve(dir.path(), None).unwrap();
        assert!(resolved.config_path.is_none());
        assert_eq!(resolved.defaults.region, Region::Assam);
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("broken.json");
        fs::write(&config_path, "{not json").unwrap();
        let err = load_config_file(&config_path).unwrap_err();
        assert!(format!("{:#}", err).contains("broken.json"));
    }
}
