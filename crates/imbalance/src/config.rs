//! Engine Configuration
//!
//! One [`EngineConfig`] carries the settings of all three components. Any
//! field missing from a JSON document falls back to its default, so a config
//! file only needs to list what it overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use terra_capacity::CapacityConfig;
use terra_core::SaturationVerdict;
use terra_signal::SignalConfig;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Score assigned to each saturation verdict (undersupply = opportunity)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplyScores {
    pub critically_undersupplied: u8,
    pub undersupplied: u8,
    pub balanced: u8,
    pub oversupplied: u8,
    pub critically_oversupplied: u8,
}

impl Default for SupplyScores {
    fn default() -> Self {
        Self {
            critically_undersupplied: 95,
            undersupplied: 75,
            balanced: 50,
            oversupplied: 25,
            critically_oversupplied: 5,
        }
    }
}

impl SupplyScores {
    pub fn score(&self, verdict: SaturationVerdict) -> u8 {
        match verdict {
            SaturationVerdict::CriticallyUndersupplied => self.critically_undersupplied,
            SaturationVerdict::Undersupplied => self.undersupplied,
            SaturationVerdict::Balanced => self.balanced,
            SaturationVerdict::Oversupplied => self.oversupplied,
            SaturationVerdict::CriticallyOversupplied => self.critically_oversupplied,
        }
    }
}

/// Composite score floors for the fallback classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerdictThresholds {
    pub strong_opportunity: u8,
    pub moderate_opportunity: u8,
    pub neutral: u8,
    pub caution: u8,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            strong_opportunity: 70,
            moderate_opportunity: 55,
            neutral: 40,
            caution: 25,
        }
    }
}

/// Configuration for demand scoring, fusion and explanation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImbalanceConfig {
    /// Weight of the demand score in the composite
    pub demand_weight: f64,
    /// Weight of the supply score in the composite
    pub supply_weight: f64,
    /// Growth rate mapped to a demand score of zero is -growth_offset
    pub growth_offset: f64,
    /// Score points per unit of growth
    pub growth_scale: f64,
    /// Multiplier applied to the auxiliary indicator change
    pub auxiliary_sensitivity: f64,
    /// Demand score at or above this is STRONG
    pub strong_demand_score: u8,
    /// Demand score at or above this is MODERATE
    pub moderate_demand_score: u8,
    pub supply_scores: SupplyScores,
    pub verdict_thresholds: VerdictThresholds,
    /// Annual rent growth worth calling out as a factor
    pub rent_growth_factor_threshold: f64,
    /// Equilibrium horizons longer than this are a risk
    pub long_equilibrium_quarters: u32,
    /// Sub-signal confidences below this are a risk
    pub low_confidence: f64,
    /// Pipeline above this share of existing stock is a risk
    pub large_pipeline_ratio: f64,
}

impl Default for ImbalanceConfig {
    fn default() -> Self {
        Self {
            demand_weight: 0.5,
            supply_weight: 0.5,
            growth_offset: 0.05,  // -5%/yr → 0
            growth_scale: 1000.0, // +5%/yr → 100
            auxiliary_sensitivity: 0.5,
            strong_demand_score: 70,
            moderate_demand_score: 40,
            supply_scores: SupplyScores::default(),
            verdict_thresholds: VerdictThresholds::default(),
            rent_growth_factor_threshold: 0.03,
            long_equilibrium_quarters: 12, // three years
            low_confidence: 0.7,
            large_pipeline_ratio: 0.15,
        }
    }
}

/// Settings for the whole engine
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub signal: SignalConfig,
    pub capacity: CapacityConfig,
    pub imbalance: ImbalanceConfig,
}

impl EngineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let signal = &self.signal;
        if signal.process_variance < 0.0 || signal.measurement_variance < 0.0 {
            return Err(ConfigError::Invalid(
                "signal variances must be non-negative".to_string(),
            ));
        }
        if !(signal.lowpass_cutoff > 0.0 && signal.lowpass_cutoff < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "lowpass_cutoff must be in (0, 1), got {}",
                signal.lowpass_cutoff
            )));
        }

        let capacity = &self.capacity;
        if capacity.renter_ratio < 0.0 || capacity.jobs_to_units_ratio < 0.0 {
            return Err(ConfigError::Invalid(
                "capacity ratios must be non-negative".to_string(),
            ));
        }
        if !capacity.thresholds.is_ordered() {
            return Err(ConfigError::Invalid(
                "saturation thresholds must be positive and strictly increasing".to_string(),
            ));
        }

        let imbalance = &self.imbalance;
        if imbalance.demand_weight < 0.0
            || imbalance.supply_weight < 0.0
            || imbalance.demand_weight + imbalance.supply_weight <= 0.0
        {
            return Err(ConfigError::Invalid(
                "composite weights must be non-negative and not both zero".to_string(),
            ));
        }
        if imbalance.moderate_demand_score > imbalance.strong_demand_score {
            return Err(ConfigError::Invalid(
                "moderate_demand_score must not exceed strong_demand_score".to_string(),
            ));
        }
        let v = &imbalance.verdict_thresholds;
        if !(v.caution <= v.neutral
            && v.neutral <= v.moderate_opportunity
            && v.moderate_opportunity <= v.strong_opportunity)
        {
            return Err(ConfigError::Invalid(
                "verdict thresholds must be non-decreasing".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load engine configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<EngineConfig, ConfigError> {
    let default_config = include_str!("engine_config.json");
    load_config_from_str(default_config)
}
