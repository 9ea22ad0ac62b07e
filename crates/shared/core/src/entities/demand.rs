use serde::{Deserialize, Serialize};

use crate::values::{Confidence, Score, clamp_confidence};
use crate::wire::wire_names;

/// Demand strength bucket derived from the demand score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum DemandStrength {
    Strong,
    Moderate,
    Weak,
}

wire_names!(DemandStrength {
    Strong => "STRONG",
    Moderate => "MODERATE",
    Weak => "WEAK",
});

impl DemandStrength {
    pub fn describe(&self) -> &'static str {
        match self {
            DemandStrength::Strong => "strong",
            DemandStrength::Moderate => "moderate",
            DemandStrength::Weak => "weak",
        }
    }
}

/// Demand assessment for a submarket
///
/// Either derived from a rent/price series or supplied precomputed by the
/// caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandSignal {
    pub strength: DemandStrength,
    /// Demand score (0 - 100)
    pub score: Score,
    /// Confidence in the underlying series (0.0 - 1.0)
    pub confidence: Confidence,
    /// Annualized growth of the denoised trend
    pub growth_rate: f64,
    /// Noise standard deviation of the source series, if derived from one
    #[serde(default)]
    pub noise_level: Option<f64>,
    /// External demand indicator delta (e.g. search-interest change)
    #[serde(default)]
    pub auxiliary_change: Option<f64>,
    pub summary: String,
}

impl DemandSignal {
    /// Create a signal; confidence is clamped into [0, 1]
    pub fn new(
        strength: DemandStrength,
        score: Score,
        confidence: Confidence,
        growth_rate: f64,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            strength,
            score: score.min(100),
            confidence: clamp_confidence(confidence),
            growth_rate,
            noise_level: None,
            auxiliary_change: None,
            summary: summary.into(),
        }
    }

    /// Builder: Set noise level
    pub fn with_noise_level(mut self, noise_level: f64) -> Self {
        self.noise_level = Some(noise_level);
        self
    }

    /// Builder: Set auxiliary indicator change
    pub fn with_auxiliary_change(mut self, change: f64) -> Self {
        self.auxiliary_change = Some(change);
        self
    }
}
