//! Terra Capacity Model
//!
//! Estimates how many housing units a submarket can sustain and how the
//! existing, under-construction and permitted stock compares to it.
//!
//! ## Model
//!
//! ```text
//! demand     = population × renter_ratio
//!            + employment × employment_growth × jobs_to_units_ratio
//! supply     = existing + pipeline + future_permitted
//! saturation = supply / demand                    (undefined when demand = 0)
//!
//!   CRITICALLY_UNDERSUPPLIED   UNDERSUPPLIED   BALANCED      OVERSUPPLIED   CRITICALLY_OVERSUPPLIED
//!  ──────────────────────────┬───────────────┬─────────────┬──────────────┬──────────────────────────►
//!                           0.85            0.95         1.05           1.15              saturation
//!                       [0.85 → U)      [0.95 → B)    (1.05 → B]     (1.15 → O]
//! ```
//!
//! Boundary convention, applied uniformly: the undersupply thresholds are
//! exclusive upper bounds (`< 0.85`, `< 0.95`) and the oversupply thresholds
//! are inclusive upper bounds (`≤ 1.05`, `≤ 1.15`).
//!
//! ## Degenerate Inputs
//!
//! | Condition | Outcome |
//! |-----------|---------|
//! | demand = 0, supply > 0 | saturation `None`, CRITICALLY_OVERSUPPLIED, horizon capped, confidence penalized |
//! | demand = 0, supply = 0 | `Error::InvalidInput` (nothing to analyze) |
//! | oversupplied, no population growth | horizon capped (no natural absorption path) |

pub mod analysis;
pub mod config;
pub mod model;

// Re-export main types
pub use analysis::analyze;
pub use config::{CapacityConfig, ConfidenceDiscounts, SaturationThresholds};
pub use model::{
    classify, confidence, demand_capacity, demand_growth_annual, equilibrium_quarters,
    saturation, supply, unit_count,
};
