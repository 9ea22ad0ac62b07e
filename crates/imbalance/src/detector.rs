//! Imbalance Detector
//!
//! Fuses the demand assessment with the capacity model into one
//! [`ImbalanceResult`]. There is no partial-success mode: if either side
//! fails, the whole analysis fails.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use terra_core::{
    DemandSignal, Envelope, Error, ImbalanceResult, MarketStructuralInput, Result,
};
use terra_signal::SamplingFrequency;

use crate::config::EngineConfig;
use crate::demand::{DemandSource, assess_demand};
use crate::narrative::{key_factors, recommendation, risks};
use crate::scoring::{classify_opportunity, composite_score, supply_score};

/// Analyze one submarket. The submarket name is taken from `structural`.
pub fn analyze(
    source: &DemandSource,
    structural: &MarketStructuralInput,
    config: &EngineConfig,
) -> Result<ImbalanceResult> {
    let demand = assess_demand(source, &config.signal, &config.imbalance)?;
    let supply = terra_capacity::analyze(structural, &config.capacity)?;

    let cfg = &config.imbalance;
    let supply_points = supply_score(supply.verdict, cfg);
    let composite = composite_score(demand.score, supply_points, cfg);
    let verdict = classify_opportunity(demand.strength, supply.verdict, composite, cfg);
    let confidence = demand.confidence.min(supply.confidence);

    let submarket = structural.submarket.clone();
    let recommendation = recommendation(verdict, &submarket, &demand, &supply);
    let key_factors = key_factors(&demand, &supply, structural, cfg);
    let risks = risks(&demand, &supply, cfg);

    if verdict.is_adverse() {
        warn!(
            "{}: {} (composite={} demand={} supply={} confidence={:.2})",
            submarket, verdict, composite, demand.score, supply_points, confidence
        );
    } else {
        info!(
            "{}: {} (composite={} demand={} supply={} confidence={:.2})",
            submarket, verdict, composite, demand.score, supply_points, confidence
        );
    }

    Ok(ImbalanceResult {
        submarket,
        verdict,
        composite_score: composite,
        confidence,
        demand_signal: demand,
        supply_result: supply,
        recommendation,
        key_factors,
        risks,
    })
}

/// One analysis request as it arrives over a process boundary.
///
/// Exactly one of `prices` and `demand_signal` must be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub market: MarketStructuralInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<Vec<f64>>,
    /// Defaults to the configured sampling frequency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<SamplingFrequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary_change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demand_signal: Option<DemandSignal>,
}

impl AnalysisRequest {
    /// Request backed by a price series
    pub fn from_prices(market: MarketStructuralInput, prices: Vec<f64>) -> Self {
        Self {
            market,
            prices: Some(prices),
            frequency: None,
            auxiliary_change: None,
            demand_signal: None,
        }
    }

    /// Request backed by a precomputed demand signal
    pub fn from_signal(market: MarketStructuralInput, signal: DemandSignal) -> Self {
        Self {
            market,
            prices: None,
            frequency: None,
            auxiliary_change: None,
            demand_signal: Some(signal),
        }
    }

    /// Builder: Set sampling frequency
    pub fn with_frequency(mut self, frequency: SamplingFrequency) -> Self {
        self.frequency = Some(frequency);
        self
    }

    /// Builder: Set auxiliary indicator change
    pub fn with_auxiliary_change(mut self, change: f64) -> Self {
        self.auxiliary_change = Some(change);
        self
    }

    /// Resolve the demand source, failing loudly on none or both
    pub fn source(&self, default_frequency: SamplingFrequency) -> Result<DemandSource> {
        match (&self.prices, &self.demand_signal) {
            (None, None) => Err(Error::MissingDemandSource),
            (Some(_), Some(_)) => Err(Error::AmbiguousDemandSource),
            (Some(prices), None) => Ok(DemandSource::RawSeries {
                prices: prices.clone(),
                frequency: self.frequency.unwrap_or(default_frequency),
                auxiliary_change: self.auxiliary_change,
            }),
            (None, Some(signal)) => {
                if self.auxiliary_change.is_some() {
                    return Err(Error::invalid(
                        "auxiliary_change",
                        "only applies to a price series",
                    ));
                }
                Ok(DemandSource::PrecomputedSignal(signal.clone()))
            }
        }
    }
}

/// Analyze a wire-form request
pub fn analyze_request(request: &AnalysisRequest, config: &EngineConfig) -> Result<ImbalanceResult> {
    let source = request.source(config.signal.frequency)?;
    analyze(&source, &request.market, config)
}

/// Analyze many submarkets. One failure does not affect the others.
pub fn analyze_batch(
    requests: &[AnalysisRequest],
    config: &EngineConfig,
) -> Vec<Result<ImbalanceResult>> {
    let outcomes: Vec<_> = requests
        .iter()
        .map(|request| {
            let outcome = analyze_request(request, config);
            if let Err(e) = &outcome {
                warn!("{}: analysis failed: {}", request.market.submarket, e);
            }
            outcome
        })
        .collect();

    let opportunities = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, Ok(result) if result.verdict.is_opportunity()))
        .count();
    let failed = outcomes.iter().filter(|outcome| outcome.is_err()).count();
    info!(
        "Batch of {}: {} opportunities, {} failed",
        outcomes.len(),
        opportunities,
        failed
    );

    outcomes
}

/// Sort results best first: composite score, then confidence, then name
pub fn rank_submarkets(mut results: Vec<ImbalanceResult>) -> Vec<ImbalanceResult> {
    results.sort_by(|a, b| {
        b.composite_score
            .cmp(&a.composite_score)
            .then_with(|| b.confidence.total_cmp(&a.confidence))
            .then_with(|| a.submarket.cmp(&b.submarket))
    });
    results
}

/// Answer a JSON request with a JSON envelope
pub fn handle_json_request(request: &str, config: &EngineConfig) -> String {
    let outcome = serde_json::from_str::<AnalysisRequest>(request)
        .map_err(|e| format!("Malformed request: {}", e))
        .and_then(|request| analyze_request(&request, config).map_err(|e| e.to_string()));

    let envelope = Envelope::from_result(outcome);
    serde_json::to_string(&envelope).unwrap_or_else(|e| {
        serde_json::json!({ "success": false, "error": e.to_string() }).to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use terra_core::{DemandStrength, OpportunityVerdict, SaturationVerdict};

    fn tight_market() -> MarketStructuralInput {
        // demand 48_200 × 0.35 + 35_000 × 0.018 × 0.8 = 17_374, supply 14_500
        MarketStructuralInput::new("Riverside")
            .with_population(48_200, 0.012)
            .with_net_migration(900)
            .with_employment(35_000, 0.018)
            .with_median_income(58_000.0)
            .with_units(11_240, 2_840, 420)
    }

    fn signal(strength: DemandStrength, score: u8, confidence: f64) -> DemandSignal {
        DemandSignal::new(strength, score, confidence, 0.02, "upstream")
    }

    #[test]
    fn test_strong_override_below_composite_threshold() {
        // With the default table the composite would be 83; lower it to 55
        let mut config = EngineConfig::default();
        config.imbalance.supply_scores.critically_undersupplied = 40;

        let source = DemandSource::PrecomputedSignal(signal(DemandStrength::Strong, 70, 0.9));
        let result = analyze(&source, &tight_market(), &config).unwrap();

        assert_eq!(result.supply_result.verdict, SaturationVerdict::CriticallyUndersupplied);
        assert_eq!(result.composite_score, 55);
        assert_eq!(result.verdict, OpportunityVerdict::StrongOpportunity);
    }

    #[test]
    fn test_confidence_is_weakest_link() {
        let source = DemandSource::PrecomputedSignal(signal(DemandStrength::Moderate, 50, 0.6));
        let result = analyze(&source, &tight_market(), &EngineConfig::default()).unwrap();
        assert_eq!(result.supply_result.confidence, 1.0);
        assert_eq!(result.confidence, 0.6);
        assert!(result.risks.iter().any(|r| r.starts_with("Data uncertainty")));
    }

    #[test]
    fn test_supply_failure_fails_whole_analysis() {
        let source = DemandSource::PrecomputedSignal(signal(DemandStrength::Strong, 80, 0.9));
        let empty = MarketStructuralInput::new("Nowhere");
        assert!(matches!(
            analyze(&source, &empty, &EngineConfig::default()),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_request_source_resolution() {
        let market = tight_market();
        let frequency = SamplingFrequency::Weekly;

        let neither = AnalysisRequest {
            prices: None,
            ..AnalysisRequest::from_prices(market.clone(), vec![])
        };
        assert_eq!(neither.source(frequency), Err(Error::MissingDemandSource));

        let both = AnalysisRequest {
            demand_signal: Some(signal(DemandStrength::Weak, 10, 0.9)),
            ..AnalysisRequest::from_prices(market.clone(), vec![1.0, 2.0])
        };
        assert_eq!(both.source(frequency), Err(Error::AmbiguousDemandSource));

        let monthly = AnalysisRequest::from_prices(market.clone(), vec![1.0, 2.0])
            .with_frequency(SamplingFrequency::Monthly);
        assert!(matches!(
            monthly.source(frequency),
            Ok(DemandSource::RawSeries { frequency: SamplingFrequency::Monthly, .. })
        ));

        let stray_aux = AnalysisRequest::from_signal(market, signal(DemandStrength::Weak, 10, 0.9))
            .with_auxiliary_change(0.1);
        assert!(matches!(
            stray_aux.source(frequency),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_rank_orders_by_score_then_confidence() {
        let config = EngineConfig::default();
        let mut results = Vec::new();
        for (name, score, confidence) in [("A", 50, 0.9), ("B", 90, 0.7), ("C", 90, 0.95)] {
            let market = MarketStructuralInput {
                submarket: name.to_string(),
                ..tight_market()
            };
            let source =
                DemandSource::PrecomputedSignal(signal(DemandStrength::Moderate, score, confidence));
            results.push(analyze(&source, &market, &config).unwrap());
        }

        let ranked = rank_submarkets(results);
        let names: Vec<&str> = ranked.iter().map(|r| r.submarket.as_str()).collect();
        assert_eq!(names, vec!["C", "B", "A"]);
        assert_eq!(ranked[0].composite_score, ranked[1].composite_score);
    }
}
