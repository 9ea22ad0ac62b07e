//! Demand Assessment
//!
//! Turns a [`DemandSource`] into a [`DemandSignal`]. A raw price series runs
//! through the signal pipeline; a precomputed signal is validated and
//! normalized.
//!
//! ```text
//! base  = clamp((growth + 0.05) × 1000, 0, 100)     -5%/yr → 0, 0% → 50, +5%/yr → 100
//! score = base × confidence × (1 + 0.5 × auxiliary)  auxiliary factor only when supplied
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use terra_core::{
    Confidence, DemandSignal, DemandStrength, Error, Result, Score, clamp_confidence, clamp_score,
};
use terra_signal::{SamplingFrequency, SignalConfig, analyze_series};

use crate::config::ImbalanceConfig;

/// Where the demand assessment comes from, chosen explicitly by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemandSource {
    /// Rent or price observations, oldest first
    RawSeries {
        prices: Vec<f64>,
        frequency: SamplingFrequency,
        /// External demand indicator delta, e.g. +0.10 for a 10% rise in search interest
        auxiliary_change: Option<f64>,
    },
    /// Demand assessment computed elsewhere
    PrecomputedSignal(DemandSignal),
}

impl DemandSource {
    /// Raw series without an auxiliary indicator
    pub fn series(prices: Vec<f64>, frequency: SamplingFrequency) -> Self {
        DemandSource::RawSeries {
            prices,
            frequency,
            auxiliary_change: None,
        }
    }
}

/// Demand score in [0, 100]
pub fn demand_score(
    growth_rate: f64,
    confidence: Confidence,
    auxiliary_change: Option<f64>,
    config: &ImbalanceConfig,
) -> Score {
    let base = ((growth_rate + config.growth_offset) * config.growth_scale).clamp(0.0, 100.0);
    let mut score = base * clamp_confidence(confidence);
    if let Some(change) = auxiliary_change {
        score *= 1.0 + config.auxiliary_sensitivity * change;
    }
    clamp_score(score)
}

/// Strength bucket for a demand score
pub fn demand_strength(score: Score, config: &ImbalanceConfig) -> DemandStrength {
    if score >= config.strong_demand_score {
        DemandStrength::Strong
    } else if score >= config.moderate_demand_score {
        DemandStrength::Moderate
    } else {
        DemandStrength::Weak
    }
}

fn trend_word(growth_rate: f64) -> &'static str {
    if growth_rate > 0.0 {
        "rising"
    } else if growth_rate < 0.0 {
        "falling"
    } else {
        "flat"
    }
}

fn check_auxiliary(auxiliary_change: Option<f64>) -> Result<()> {
    match auxiliary_change {
        Some(change) if !change.is_finite() => {
            Err(Error::invalid("auxiliary_change", "must be finite"))
        }
        _ => Ok(()),
    }
}

/// Produce a demand signal from either kind of source
pub fn assess_demand(
    source: &DemandSource,
    signal_config: &SignalConfig,
    config: &ImbalanceConfig,
) -> Result<DemandSignal> {
    match source {
        DemandSource::RawSeries {
            prices,
            frequency,
            auxiliary_change,
        } => {
            check_auxiliary(*auxiliary_change)?;
            let series_config = SignalConfig {
                frequency: *frequency,
                ..*signal_config
            };
            let analysis = analyze_series(prices, &series_config)?;
            let confidence = analysis.decomposed.confidence;
            let growth = analysis.growth_rate;

            let score = demand_score(growth, confidence, *auxiliary_change, config);
            let strength = demand_strength(score, config);

            let mut summary = format!(
                "Rent trend {} {:+.1}% across {} observations (confidence {:.0}%): {} demand, score {}",
                trend_word(growth),
                growth * 100.0,
                prices.len(),
                confidence * 100.0,
                strength.describe(),
                score
            );
            let swing = analysis.decomposed.seasonal_amplitude();
            if swing > 0.0 {
                summary.push_str(&format!("; seasonal swing {:.0}", swing));
            }
            if let Some(change) = auxiliary_change {
                summary.push_str(&format!("; auxiliary indicator {:+.0}%", change * 100.0));
            }

            debug!(
                "Demand from {} points: growth={:.4} confidence={:.3} score={}",
                prices.len(),
                growth,
                confidence,
                score
            );

            let mut signal = DemandSignal::new(strength, score, confidence, growth, summary)
                .with_noise_level(analysis.decomposed.noise_level);
            if let Some(change) = auxiliary_change {
                signal = signal.with_auxiliary_change(*change);
            }
            Ok(signal)
        }
        DemandSource::PrecomputedSignal(signal) => normalize_precomputed(signal, config),
    }
}

/// Validate a caller-supplied signal and bring it into range.
///
/// Strength is re-derived from the clamped score.
fn normalize_precomputed(signal: &DemandSignal, config: &ImbalanceConfig) -> Result<DemandSignal> {
    if !signal.growth_rate.is_finite() {
        return Err(Error::invalid("demand_signal.growth_rate", "must be finite"));
    }
    if !signal.confidence.is_finite() {
        return Err(Error::invalid("demand_signal.confidence", "must be finite"));
    }
    if matches!(signal.noise_level, Some(noise) if !noise.is_finite() || noise < 0.0) {
        return Err(Error::invalid(
            "demand_signal.noise_level",
            "must be finite and non-negative",
        ));
    }
    check_auxiliary(signal.auxiliary_change)?;

    let score = signal.score.min(100);
    Ok(DemandSignal {
        strength: demand_strength(score, config),
        score,
        confidence: clamp_confidence(signal.confidence),
        ..signal.clone()
    })
}
