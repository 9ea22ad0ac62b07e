//! Composite Imbalance Verdict
//!
//! The final, explainable answer for a submarket: one verdict, the score and
//! confidence behind it, both sub-assessments, and the reasons.

use serde::{Deserialize, Serialize};

use super::{CapacityResult, DemandSignal};
use crate::values::{Confidence, Score};
use crate::wire::wire_names;

/// Investment verdict, ordered from most to least attractive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum OpportunityVerdict {
    StrongOpportunity,
    ModerateOpportunity,
    Neutral,
    Caution,
    Avoid,
}

wire_names!(OpportunityVerdict {
    StrongOpportunity => "STRONG_OPPORTUNITY",
    ModerateOpportunity => "MODERATE_OPPORTUNITY",
    Neutral => "NEUTRAL",
    Caution => "CAUTION",
    Avoid => "AVOID",
});

impl OpportunityVerdict {
    /// Strong or moderate opportunity
    pub fn is_opportunity(&self) -> bool {
        matches!(
            self,
            OpportunityVerdict::StrongOpportunity | OpportunityVerdict::ModerateOpportunity
        )
    }

    /// Caution or avoid
    pub fn is_adverse(&self) -> bool {
        matches!(self, OpportunityVerdict::Caution | OpportunityVerdict::Avoid)
    }
}

/// Fused demand/supply assessment for one submarket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceResult {
    pub submarket: String,
    pub verdict: OpportunityVerdict,
    /// Weighted demand/supply score (0 - 100)
    pub composite_score: Score,
    /// Weakest of the demand and supply confidences
    pub confidence: Confidence,
    pub demand_signal: DemandSignal,
    pub supply_result: CapacityResult,
    pub recommendation: String,
    /// Supporting evidence, most important first
    pub key_factors: Vec<String>,
    /// Caveats, most important first
    pub risks: Vec<String>,
}
