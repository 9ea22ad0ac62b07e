//! Explanations: key factors, risks and the recommendation
//!
//! Rule-based and templated. Each string carries the number that triggered
//! it. Lists are ordered most important first.

use terra_core::{
    CapacityResult, DemandSignal, DemandStrength, MarketStructuralInput, OpportunityVerdict,
};

use crate::config::ImbalanceConfig;

/// Evidence supporting the verdict
pub fn key_factors(
    demand: &DemandSignal,
    supply: &CapacityResult,
    input: &MarketStructuralInput,
    config: &ImbalanceConfig,
) -> Vec<String> {
    let mut factors = Vec::new();

    if demand.growth_rate > config.rent_growth_factor_threshold {
        factors.push(format!(
            "Rent growth of {:.1}%/yr exceeds {:.0}%/yr",
            demand.growth_rate * 100.0,
            config.rent_growth_factor_threshold * 100.0
        ));
    }

    if supply.verdict.is_undersupplied() {
        let shortfall = -supply.surplus_units();
        match supply.saturation_pct {
            Some(pct) => factors.push(format!(
                "Supply at {:.1}% of sustainable demand: shortfall of {} units",
                pct, shortfall
            )),
            None => factors.push(format!("Supply shortfall of {} units", shortfall)),
        }
    }

    if input.net_migration_annual > 0 {
        factors.push(format!(
            "Net in-migration of {} residents per year",
            input.net_migration_annual
        ));
    }

    if demand.strength == DemandStrength::Strong {
        factors.push(format!("Strong demand signal (score {})", demand.score));
    }

    factors
}

/// Caveats against the verdict
pub fn risks(
    demand: &DemandSignal,
    supply: &CapacityResult,
    config: &ImbalanceConfig,
) -> Vec<String> {
    let mut risks = Vec::new();

    if supply.verdict.is_oversupplied() && supply.pipeline_units > 0 {
        match supply.saturation_pct {
            Some(pct) => risks.push(format!(
                "Oversupply at {:.1}% of demand with {} units still in the pipeline",
                pct, supply.pipeline_units
            )),
            None => risks.push(format!(
                "Oversupply with {} units still in the pipeline",
                supply.pipeline_units
            )),
        }
    }

    if supply.existing_units > 0 {
        let pipeline_ratio = supply.pipeline_units as f64 / supply.existing_units as f64;
        if pipeline_ratio > config.large_pipeline_ratio {
            risks.push(format!(
                "Large pipeline: {} units under construction ({:.0}% of existing stock)",
                supply.pipeline_units,
                pipeline_ratio * 100.0
            ));
        }
    }

    if supply.equilibrium_quarters > config.long_equilibrium_quarters {
        risks.push(format!(
            "Long equilibrium horizon: {} quarters to absorb excess supply",
            supply.equilibrium_quarters
        ));
    }

    if demand.confidence < config.low_confidence || supply.confidence < config.low_confidence {
        risks.push(format!(
            "Data uncertainty: demand confidence {:.0}%, supply confidence {:.0}%",
            demand.confidence * 100.0,
            supply.confidence * 100.0
        ));
    }

    if supply.is_saturation_undefined() {
        risks.push("Saturation undefined: estimated demand is zero".to_string());
    }

    if demand.growth_rate < 0.0 {
        risks.push(format!(
            "Rents declining {:.1}%/yr",
            demand.growth_rate.abs() * 100.0
        ));
    }

    risks
}

/// Verdict-keyed recommendation
pub fn recommendation(
    verdict: OpportunityVerdict,
    submarket: &str,
    demand: &DemandSignal,
    supply: &CapacityResult,
) -> String {
    let strength = demand.strength.describe();
    let market = supply.verdict.describe();

    match verdict {
        OpportunityVerdict::StrongOpportunity => format!(
            "{}: strong opportunity. {} demand in a market that is {}; prioritize acquisition or development.",
            submarket,
            capitalize(strength),
            market
        ),
        OpportunityVerdict::ModerateOpportunity => format!(
            "{}: moderate opportunity. {} demand in a market that is {}; pursue selectively with conservative underwriting.",
            submarket,
            capitalize(strength),
            market
        ),
        OpportunityVerdict::Neutral => format!(
            "{}: neutral. {} demand in a market that is {}; no clear edge, monitor for change.",
            submarket,
            capitalize(strength),
            market
        ),
        OpportunityVerdict::Caution => format!(
            "{}: caution. {} demand in a market that is {}; equilibrium is {} quarters out, wait for absorption before committing.",
            submarket,
            capitalize(strength),
            market,
            supply.equilibrium_quarters
        ),
        OpportunityVerdict::Avoid => format!(
            "{}: avoid. {} demand in a market that is {}; supply will not be absorbed.",
            submarket,
            capitalize(strength),
            market
        ),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
