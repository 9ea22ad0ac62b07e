mod capacity;
mod decomposed;
mod demand;
mod imbalance;
mod structural_input;

pub use capacity::{CapacityResult, SaturationVerdict};
pub use decomposed::DecomposedSignal;
pub use demand::{DemandSignal, DemandStrength};
pub use imbalance::{ImbalanceResult, OpportunityVerdict};
pub use structural_input::MarketStructuralInput;
