//! Capacity Model Output
//!
//! Saturation state of a submarket: how much supply exists relative to the
//! demand its population and employment can sustain.

use serde::{Deserialize, Serialize};

use crate::values::Confidence;
use crate::wire::wire_names;

/// Saturation classification, ordered from scarcest to most saturated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SaturationVerdict {
    /// Supply far below sustainable demand
    CriticallyUndersupplied,
    /// Supply below sustainable demand
    Undersupplied,
    /// Supply within a few percent of demand
    Balanced,
    /// Supply above sustainable demand
    Oversupplied,
    /// Supply far above sustainable demand (or demand is zero)
    CriticallyOversupplied,
}

wire_names!(SaturationVerdict {
    CriticallyUndersupplied => "CRITICALLY_UNDERSUPPLIED",
    Undersupplied => "UNDERSUPPLIED",
    Balanced => "BALANCED",
    Oversupplied => "OVERSUPPLIED",
    CriticallyOversupplied => "CRITICALLY_OVERSUPPLIED",
});

impl SaturationVerdict {
    /// Undersupplied or critically undersupplied
    pub fn is_undersupplied(&self) -> bool {
        matches!(
            self,
            SaturationVerdict::CriticallyUndersupplied | SaturationVerdict::Undersupplied
        )
    }

    /// Oversupplied or critically oversupplied
    pub fn is_oversupplied(&self) -> bool {
        matches!(
            self,
            SaturationVerdict::Oversupplied | SaturationVerdict::CriticallyOversupplied
        )
    }

    /// Lower-case phrase for human-readable summaries
    pub fn describe(&self) -> &'static str {
        match self {
            SaturationVerdict::CriticallyUndersupplied => "critically undersupplied",
            SaturationVerdict::Undersupplied => "undersupplied",
            SaturationVerdict::Balanced => "balanced",
            SaturationVerdict::Oversupplied => "oversupplied",
            SaturationVerdict::CriticallyOversupplied => "critically oversupplied",
        }
    }
}

/// Result of a capacity analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityResult {
    /// Submarket the result describes
    pub submarket: String,
    /// Sustainable demand in housing units
    pub demand_units: i64,
    /// Units of new demand per year from population growth
    pub demand_growth_annual: i64,
    /// Existing + pipeline + permitted units
    pub total_supply: i64,
    pub existing_units: i64,
    pub pipeline_units: i64,
    /// 100 × supply / demand. None when demand is zero (undefined, not balanced)
    pub saturation_pct: Option<f64>,
    /// Quarters until supply and demand rebalance (capped)
    pub equilibrium_quarters: u32,
    pub verdict: SaturationVerdict,
    /// Data-quality confidence (0.0 - 1.0)
    pub confidence: Confidence,
    pub summary: String,
}

impl CapacityResult {
    /// Supply minus demand in units (positive = surplus)
    pub fn surplus_units(&self) -> i64 {
        self.total_supply - self.demand_units
    }

    /// True when saturation could not be computed
    pub fn is_saturation_undefined(&self) -> bool {
        self.saturation_pct.is_none()
    }
}
