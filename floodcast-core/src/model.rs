//! Input and output value types
//!
//! Every type here is a plain value: no identity, no mutation. Inputs are
//! validated on construction so the model functions themselves are total.

use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of the rainfall intensity domain, mm/day
pub const MAX_INTENSITY_MM_PER_DAY: f64 = 300.0;

/// Bounds of the observation window, days
pub const MIN_WINDOW_DAYS: u32 = 1;
pub const MAX_WINDOW_DAYS: u32 = 14;

/// Lowercase and drop separators so "West Bengal", "west-bengal" and
/// "WestBengal" compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Closed set of supported regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    Assam,
    Bihar,
    WestBengal,
    UttarPradesh,
    Odisha,
    Kerala,
    TamilNadu,
    Karnataka,
    Maharashtra,
    Rajasthan,
    Gujarat,
    MadhyaPradesh,
    AndhraPradesh,
    Punjab,
    Uttarakhand,
}

impl Region {
    pub const ALL: [Region; 15] = [
        Region::Assam,
        Region::Bihar,
        Region::WestBengal,
        Region::UttarPradesh,
        Region::Odisha,
        Region::Kerala,
        Region::TamilNadu,
        Region::Karnataka,
        Region::Maharashtra,
        Region::Rajasthan,
        Region::Gujarat,
        Region::MadhyaPradesh,
        Region::AndhraPradesh,
        Region::Punjab,
        Region::Uttarakhand,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Region::Assam => "Assam",
            Region::Bihar => "Bihar",
            Region::WestBengal => "West Bengal",
            Region::UttarPradesh => "Uttar Pradesh",
            Region::Odisha => "Odisha",
            Region::Kerala => "Kerala",
            Region::TamilNadu => "Tamil Nadu",
            Region::Karnataka => "Karnataka",
            Region::Maharashtra => "Maharashtra",
            Region::Rajasthan => "Rajasthan",
            Region::Gujarat => "Gujarat",
            Region::MadhyaPradesh => "Madhya Pradesh",
            Region::AndhraPradesh => "Andhra Pradesh",
            Region::Punjab => "Punjab",
            Region::Uttarakhand => "Uttarakhand",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Region {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize(s);
        Region::ALL
            .into_iter()
            .find(|r| normalize(r.display_name()) == key)
            .ok_or_else(|| ModelError::invalid_input("region", s, "not a supported region"))
    }
}

/// Terrain class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Terrain {
    FlatPlain,
    Undulating,
    HillySteep,
}

impl Terrain {
    pub const ALL: [Terrain; 3] = [Terrain::FlatPlain, Terrain::Undulating, Terrain::HillySteep];

    pub fn display_name(&self) -> &'static str {
        match self {
            Terrain::FlatPlain => "Flat plain",
            Terrain::Undulating => "Undulating",
            Terrain::HillySteep => "Hilly / steep",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Terrain::FlatPlain => "flatplain",
            Terrain::Undulating => "undulating",
            Terrain::HillySteep => "hillysteep",
        }
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Terrain {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize(s);
        Terrain::ALL
            .into_iter()
            .find(|t| t.key() == key)
            .ok_or_else(|| {
                ModelError::invalid_input(
                    "terrain",
                    s,
                    "expected one of flat-plain, undulating, hilly-steep",
                )
            })
    }
}

/// Soil class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Soil {
    Clayey,
    Loamy,
    Sandy,
}

impl Soil {
    pub const ALL: [Soil; 3] = [Soil::Clayey, Soil::Loamy, Soil::Sandy];

    pub fn display_name(&self) -> &'static str {
        match self {
            Soil::Clayey => "Clayey",
            Soil::Loamy => "Loamy",
            Soil::Sandy => "Sandy",
        }
    }
}

impl fmt::Display for Soil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Soil {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        let key = normalize(s);
        Soil::ALL
            .into_iter()
            .find(|soil| normalize(soil.display_name()) == key)
            .ok_or_else(|| {
                ModelError::invalid_input("soil", s, "expected one of clayey, loamy, sandy")
            })
    }
}

/// Rainfall intensity in mm/day, within [0, 300]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RainfallIntensity(f64);

impl RainfallIntensity {
    pub fn new(mm_per_day: f64) -> Result<Self> {
        if !mm_per_day.is_finite() {
            return Err(ModelError::invalid_input(
                "intensity",
                mm_per_day,
                "must be a finite number",
            ));
        }
        if !(0.0..=MAX_INTENSITY_MM_PER_DAY).contains(&mm_per_day) {
            return Err(ModelError::invalid_input(
                "intensity",
                mm_per_day,
                format!("must be between 0 and {} mm/day", MAX_INTENSITY_MM_PER_DAY),
            ));
        }
        Ok(RainfallIntensity(mm_per_day))
    }

    pub fn mm_per_day(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for RainfallIntensity {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self> {
        RainfallIntensity::new(value)
    }
}

impl From<RainfallIntensity> for f64 {
    fn from(value: RainfallIntensity) -> Self {
        value.0
    }
}

/// Observation window in days, within [1, 14]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WindowLength(u32);

impl WindowLength {
    pub fn new(days: u32) -> Result<Self> {
        if !(MIN_WINDOW_DAYS..=MAX_WINDOW_DAYS).contains(&days) {
            return Err(ModelError::invalid_input(
                "window_days",
                days,
                format!("must be between {} and {}", MIN_WINDOW_DAYS, MAX_WINDOW_DAYS),
            ));
        }
        Ok(WindowLength(days))
    }

    pub fn days(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for WindowLength {
    type Error = ModelError;

    fn try_from(value: u32) -> Result<Self> {
        WindowLength::new(value)
    }
}

impl From<WindowLength> for u32 {
    fn from(value: WindowLength) -> Self {
        value.0
    }
}

/// Baseline susceptibility in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PredispositionScore(pub(crate) f64);

impl PredispositionScore {
    /// Build a score from a raw value, e.g. when exploring the likelihood
    /// curve without going through region/terrain/soil.
    pub fn new(value: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(ModelError::invalid_input(
                "predisposition",
                value,
                "must be between 0 and 1",
            ));
        }
        Ok(PredispositionScore(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Likelihood percentage in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct LikelihoodPercent(pub(crate) f64);

impl LikelihoodPercent {
    pub fn new(percent: f64) -> Result<Self> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(ModelError::invalid_input(
                "likelihood",
                percent,
                "must be between 0 and 100",
            ));
        }
        Ok(LikelihoodPercent(percent))
    }

    pub fn percent(&self) -> f64 {
        self.0
    }

    /// Likelihood as a fraction in [0, 1]
    pub fn fraction(&self) -> f64 {
        self.0 / 100.0
    }
}

impl TryFrom<f64> for LikelihoodPercent {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self> {
        LikelihoodPercent::new(value)
    }
}

impl From<LikelihoodPercent> for f64 {
    fn from(value: LikelihoodPercent) -> Self {
        value.0
    }
}
