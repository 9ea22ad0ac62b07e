//! Capacity Model Configuration
//!
//! Every ratio and threshold the model uses is named here; the model itself
//! contains no literals.

use serde::{Deserialize, Serialize};
use terra_core::SaturationVerdict;

/// Saturation bucket boundaries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturationThresholds {
    /// saturation < this = CRITICALLY_UNDERSUPPLIED
    pub critically_undersupplied_below: f64,
    /// saturation < this = UNDERSUPPLIED
    pub undersupplied_below: f64,
    /// saturation ≤ this = BALANCED
    pub balanced_up_to: f64,
    /// saturation ≤ this = OVERSUPPLIED, above = CRITICALLY_OVERSUPPLIED
    pub oversupplied_up_to: f64,
}

impl Default for SaturationThresholds {
    fn default() -> Self {
        Self {
            critically_undersupplied_below: 0.85,
            undersupplied_below: 0.95,
            balanced_up_to: 1.05,
            oversupplied_up_to: 1.15,
        }
    }
}

impl SaturationThresholds {
    /// Classify a saturation ratio (see crate docs for the boundary convention)
    pub fn classify(&self, saturation: f64) -> SaturationVerdict {
        if saturation < self.critically_undersupplied_below {
            SaturationVerdict::CriticallyUndersupplied
        } else if saturation < self.undersupplied_below {
            SaturationVerdict::Undersupplied
        } else if saturation <= self.balanced_up_to {
            SaturationVerdict::Balanced
        } else if saturation <= self.oversupplied_up_to {
            SaturationVerdict::Oversupplied
        } else {
            SaturationVerdict::CriticallyOversupplied
        }
    }

    /// Thresholds must be strictly increasing and positive
    pub fn is_ordered(&self) -> bool {
        0.0 < self.critically_undersupplied_below
            && self.critically_undersupplied_below < self.undersupplied_below
            && self.undersupplied_below < self.balanced_up_to
            && self.balanced_up_to < self.oversupplied_up_to
    }
}

/// Multiplicative confidence discounts for thin or suspicious data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceDiscounts {
    pub small_population: u64,
    pub small_population_factor: f64,
    pub mid_population: u64,
    pub mid_population_factor: f64,
    /// |population growth| above this is treated as unreliable
    pub volatile_growth_rate: f64,
    pub volatile_growth_factor: f64,
    /// Zero pipeline with more existing units than this is likely missing data
    pub missing_pipeline_existing_units: u64,
    pub missing_pipeline_factor: f64,
    /// Applied when demand is zero and saturation is undefined
    pub zero_demand_factor: f64,
}

impl Default for ConfidenceDiscounts {
    fn default() -> Self {
        Self {
            small_population: 10_000,
            small_population_factor: 0.7,
            mid_population: 30_000,
            mid_population_factor: 0.85,
            volatile_growth_rate: 0.05,
            volatile_growth_factor: 0.8,
            missing_pipeline_existing_units: 1_000,
            missing_pipeline_factor: 0.9,
            zero_demand_factor: 0.5,
        }
    }
}

/// Configuration for the capacity model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityConfig {
    /// Share of residents who rent
    pub renter_ratio: f64,
    /// Housing units generated per net new job
    pub jobs_to_units_ratio: f64,
    pub thresholds: SaturationThresholds,
    /// Horizon reported when there is no natural absorption path
    pub max_equilibrium_quarters: u32,
    pub discounts: ConfidenceDiscounts,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            renter_ratio: 0.35,
            jobs_to_units_ratio: 0.8,
            thresholds: SaturationThresholds::default(),
            max_equilibrium_quarters: 40, // ten years
            discounts: ConfidenceDiscounts::default(),
        }
    }
}
