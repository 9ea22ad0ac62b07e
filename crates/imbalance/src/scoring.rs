//! Supply scoring, composite score and the verdict state machine
//!
//! ```text
//!   demand STRONG ∧ supply UNDER/CRITICALLY_UNDER ──► STRONG_OPPORTUNITY
//!   demand WEAK   ∧ supply OVER/CRITICALLY_OVER   ──► AVOID
//!   otherwise composite:  ≥70 STRONG_OPPORTUNITY
//!                         ≥55 MODERATE_OPPORTUNITY
//!                         ≥40 NEUTRAL
//!                         ≥25 CAUTION
//!                         else AVOID
//! ```

use terra_core::{DemandStrength, OpportunityVerdict, SaturationVerdict, Score, clamp_score};

use crate::config::ImbalanceConfig;

/// Supply score for a saturation verdict (scarcity scores high)
pub fn supply_score(verdict: SaturationVerdict, config: &ImbalanceConfig) -> Score {
    config.supply_scores.score(verdict).min(100)
}

/// Weighted demand/supply score, rounded
pub fn composite_score(demand_score: Score, supply_score: Score, config: &ImbalanceConfig) -> Score {
    let weighted = demand_score as f64 * config.demand_weight
        + supply_score as f64 * config.supply_weight;
    clamp_score(weighted.round())
}

/// Classify the opportunity; the two overrides win over the composite score
pub fn classify_opportunity(
    strength: DemandStrength,
    supply_verdict: SaturationVerdict,
    composite: Score,
    config: &ImbalanceConfig,
) -> OpportunityVerdict {
    if strength == DemandStrength::Strong && supply_verdict.is_undersupplied() {
        return OpportunityVerdict::StrongOpportunity;
    }
    if strength == DemandStrength::Weak && supply_verdict.is_oversupplied() {
        return OpportunityVerdict::Avoid;
    }

    let t = &config.verdict_thresholds;
    if composite >= t.strong_opportunity {
        OpportunityVerdict::StrongOpportunity
    } else if composite >= t.moderate_opportunity {
        OpportunityVerdict::ModerateOpportunity
    } else if composite >= t.neutral {
        OpportunityVerdict::Neutral
    } else if composite >= t.caution {
        OpportunityVerdict::Caution
    } else {
        OpportunityVerdict::Avoid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ImbalanceConfig {
        ImbalanceConfig::default()
    }

    #[test]
    fn test_supply_scores() {
        assert_eq!(supply_score(SaturationVerdict::CriticallyUndersupplied, &config()), 95);
        assert_eq!(supply_score(SaturationVerdict::Balanced, &config()), 50);
        assert_eq!(supply_score(SaturationVerdict::CriticallyOversupplied, &config()), 5);
    }

    #[test]
    fn test_composite_rounds() {
        assert_eq!(composite_score(60, 75, &config()), 68); // 67.5 rounds up
        assert_eq!(composite_score(41, 50, &config()), 46); // 45.5
        assert_eq!(composite_score(0, 5, &config()), 3); // 2.5
        assert_eq!(composite_score(100, 95, &config()), 98);
    }

    #[test]
    fn test_composite_respects_weights() {
        let weighted = ImbalanceConfig {
            demand_weight: 0.7,
            supply_weight: 0.3,
            ..Default::default()
        };
        // 80 × 0.7 + 20 × 0.3 = 62
        assert_eq!(composite_score(80, 20, &weighted), 62);
    }

    #[test]
    fn test_strong_override_beats_composite() {
        // Composite 62 alone would be MODERATE_OPPORTUNITY
        let verdict = classify_opportunity(
            DemandStrength::Strong,
            SaturationVerdict::Undersupplied,
            62,
            &config(),
        );
        assert_eq!(verdict, OpportunityVerdict::StrongOpportunity);
    }

    #[test]
    fn test_avoid_override_beats_composite() {
        // Composite 45 alone would be NEUTRAL
        let verdict = classify_opportunity(
            DemandStrength::Weak,
            SaturationVerdict::Oversupplied,
            45,
            &config(),
        );
        assert_eq!(verdict, OpportunityVerdict::Avoid);
    }

    #[test]
    fn test_fallback_thresholds() {
        let classify = |composite| {
            classify_opportunity(
                DemandStrength::Moderate,
                SaturationVerdict::Balanced,
                composite,
                &config(),
            )
        };
        assert_eq!(classify(70), OpportunityVerdict::StrongOpportunity);
        assert_eq!(classify(69), OpportunityVerdict::ModerateOpportunity);
        assert_eq!(classify(55), OpportunityVerdict::ModerateOpportunity);
        assert_eq!(classify(54), OpportunityVerdict::Neutral);
        assert_eq!(classify(40), OpportunityVerdict::Neutral);
        assert_eq!(classify(39), OpportunityVerdict::Caution);
        assert_eq!(classify(25), OpportunityVerdict::Caution);
        assert_eq!(classify(24), OpportunityVerdict::Avoid);
    }

    #[test]
    fn test_overrides_need_both_sides() {
        // Strong demand into oversupply falls back to the composite
        assert_eq!(
            classify_opportunity(
                DemandStrength::Strong,
                SaturationVerdict::Oversupplied,
                50,
                &config()
            ),
            OpportunityVerdict::Neutral
        );
        // Weak demand into scarcity falls back too
        assert_eq!(
            classify_opportunity(
                DemandStrength::Weak,
                SaturationVerdict::CriticallyUndersupplied,
                58,
                &config()
            ),
            OpportunityVerdict::ModerateOpportunity
        );
    }
}
