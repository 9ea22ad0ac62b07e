//! Terra Imbalance Detector
//!
//! Fuses a demand assessment (derived from a rent series or supplied
//! precomputed) with the capacity model's saturation verdict into one
//! explainable investment verdict.
//!
//! ## Architecture
//!
//! ```text
//!  DemandSource ──► assess_demand ──► DemandSignal ──┐
//!                   (terra-signal)                   │  demand score
//!                                                    ▼
//!                                        composite = 0.5·demand + 0.5·supply
//!                                                    ▲          │
//!  MarketStructuralInput ──► terra_capacity::analyze ┘          ▼
//!                             (supply score 95/75/50/25/5)  classify_opportunity
//!                                                               │
//!                                           key factors, risks, recommendation
//!                                                               ▼
//!                                                        ImbalanceResult
//! ```
//!
//! Confidence follows the weakest link: the lower of the demand and supply
//! confidences.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use terra_imbalance::{AnalysisRequest, analyze_request, load_default_config};
//!
//! let config = load_default_config()?;
//! let request = AnalysisRequest::from_prices(market, weekly_rents);
//! let result = analyze_request(&request, &config)?;
//! println!("{}", result.recommendation);
//! ```

pub mod config;
pub mod demand;
pub mod detector;
pub mod narrative;
pub mod scoring;

// Re-export main types
pub use config::{
    ConfigError, EngineConfig, ImbalanceConfig, SupplyScores, VerdictThresholds, load_config,
    load_config_from_str, load_default_config,
};
pub use demand::{DemandSource, assess_demand, demand_score, demand_strength};
pub use detector::{
    AnalysisRequest, analyze, analyze_batch, analyze_request, handle_json_request,
    rank_submarkets,
};
pub use scoring::{classify_opportunity, composite_score, supply_score};
