//! Predisposition scoring
//!
//! Additive bounded model over static site factors:
//!
//! score = min(1.0, region_baseline + terrain_weight + soil_weight)
//!
//! Global invariants enforced:
//! - Result always in [0, 1]
//! - Deterministic, no side effects

use crate::model::{PredispositionScore, Region, Soil, Terrain};
use serde::Serialize;

/// Regional baseline tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionTier {
    High,     // 0.30
    Elevated, // 0.20
    Standard, // 0.12
}

impl RegionTier {
    pub fn baseline(&self) -> f64 {
        match self {
            RegionTier::High => 0.30,
            RegionTier::Elevated => 0.20,
            RegionTier::Standard => 0.12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RegionTier::High => "high",
            RegionTier::Elevated => "elevated",
            RegionTier::Standard => "standard",
        }
    }
}

/// Baseline tier of a region
pub fn region_tier(region: Region) -> RegionTier {
    match region {
        Region::Assam
        | Region::Bihar
        | Region::WestBengal
        | Region::UttarPradesh
        | Region::Odisha => RegionTier::High,
        Region::Kerala | Region::TamilNadu | Region::Karnataka | Region::Maharashtra => {
            RegionTier::Elevated
        }
        Region::Rajasthan
        | Region::Gujarat
        | Region::MadhyaPradesh
        | Region::AndhraPradesh
        | Region::Punjab
        | Region::Uttarakhand => RegionTier::Standard,
    }
}

pub fn terrain_weight(terrain: Terrain) -> f64 {
    match terrain {
        Terrain::FlatPlain => 0.25,
        Terrain::Undulating => 0.15,
        Terrain::HillySteep => 0.05,
    }
}

pub fn soil_weight(soil: Soil) -> f64 {
    match soil {
        Soil::Clayey => 0.25,
        Soil::Loamy => 0.15,
        Soil::Sandy => 0.08,
    }
}

/// Individual contributions to a predisposition score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredispositionFactors {
    pub region_baseline: f64,
    pub terrain_weight: f64,
    pub soil_weight: f64,
}

impl PredispositionFactors {
    pub fn of(region: Region, terrain: Terrain, soil: Soil) -> Self {
        PredispositionFactors {
            region_baseline: region_tier(region).baseline(),
            terrain_weight: terrain_weight(terrain),
            soil_weight: soil_weight(soil),
        }
    }

    /// Sum of the factors before the ceiling is applied
    pub fn raw_sum(&self) -> f64 {
        self.region_baseline + self.terrain_weight + self.soil_weight
    }
}

/// Compute the predisposition score for a site
///
/// Region membership is guaranteed by the `Region` type; unrecognised region
/// names are rejected when parsed, never folded into the standard tier.
pub fn score(region: Region, terrain: Terrain, soil: Soil) -> PredispositionScore {
    let factors = PredispositionFactors::of(region, terrain, soil);
    PredispositionScore(factors.raw_sum().min(1.0))
}
