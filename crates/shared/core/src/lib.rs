//! Terra Core Domain
//!
//! Pure domain types for the Terra submarket analysis engine.
//! This crate contains no I/O and is 100% unit testable.
//!
//! Every analytical component (signal, capacity, imbalance) consumes and
//! produces the records defined here, so they share one wire vocabulary.

pub mod entities;
pub mod error;
pub mod values;
pub mod wire;

// Re-export commonly used types at crate root
pub use entities::{
    // Structural inputs
    MarketStructuralInput,
    // Signal decomposition
    DecomposedSignal,
    // Capacity model output
    CapacityResult,
    SaturationVerdict,
    // Demand assessment
    DemandSignal,
    DemandStrength,
    // Composite verdict
    ImbalanceResult,
    OpportunityVerdict,
};
pub use error::{Error, Result};
pub use values::{Confidence, Score, clamp_confidence, clamp_score};
pub use wire::{Envelope, WireName};
