//! Capacity Analysis
//!
//! Combines the model calculations into a [`CapacityResult`] with a
//! human-readable summary.

use log::{debug, warn};
use terra_core::{
    CapacityResult, Error, MarketStructuralInput, Result, SaturationVerdict, clamp_confidence,
};

use crate::config::CapacityConfig;
use crate::model;

/// Analyze the supply/demand balance of a submarket.
///
/// Fails only on invalid input or a market with neither demand nor supply.
/// Zero demand against existing supply is a degenerate but valid market:
/// saturation is reported as undefined, never as balanced.
pub fn analyze(input: &MarketStructuralInput, config: &CapacityConfig) -> Result<CapacityResult> {
    input.validate()?;

    let demand = model::demand_capacity(input, config)?;
    let supply = model::supply(input)?;

    if demand == 0 && supply == 0 {
        return Err(Error::invalid(
            "population",
            "no estimated demand and no supply: nothing to analyze",
        ));
    }

    let (saturation_pct, verdict, equilibrium_quarters, confidence) =
        match model::saturation(demand, supply) {
            Some(ratio) => {
                let verdict = model::classify(ratio, config);
                let quarters = model::equilibrium_quarters(input, demand, supply, verdict, config);
                (
                    Some(ratio * 100.0),
                    verdict,
                    quarters,
                    model::confidence(input, config),
                )
            }
            None => {
                warn!(
                    "{}: zero estimated demand against {} units, saturation undefined",
                    input.submarket, supply
                );
                (
                    None,
                    SaturationVerdict::CriticallyOversupplied,
                    config.max_equilibrium_quarters,
                    clamp_confidence(
                        model::confidence(input, config) * config.discounts.zero_demand_factor,
                    ),
                )
            }
        };

    debug!(
        "{}: demand={} supply={} saturation={:?} verdict={} horizon={}q confidence={:.2}",
        input.submarket,
        demand,
        supply,
        saturation_pct,
        verdict,
        equilibrium_quarters,
        confidence
    );

    let summary = summarize(
        &input.submarket,
        saturation_pct,
        verdict,
        equilibrium_quarters,
        config.max_equilibrium_quarters,
    );

    Ok(CapacityResult {
        submarket: input.submarket.clone(),
        demand_units: demand,
        demand_growth_annual: model::demand_growth_annual(input, config)?,
        total_supply: supply,
        existing_units: model::unit_count(input.existing_units, "existing_units")?,
        pipeline_units: model::unit_count(input.pipeline_units, "pipeline_units")?,
        saturation_pct,
        equilibrium_quarters,
        verdict,
        confidence,
        summary,
    })
}

fn horizon_phrase(quarters: u32, cap: u32, verdict: SaturationVerdict) -> String {
    if quarters == 0 {
        if verdict == SaturationVerdict::Balanced {
            "already at equilibrium".to_string()
        } else {
            "no excess supply to absorb".to_string()
        }
    } else if quarters >= cap {
        format!("equilibrium beyond {} quarters (no natural absorption path)", cap)
    } else {
        format!("equilibrium in ~{} quarters", quarters)
    }
}

fn summarize(
    submarket: &str,
    saturation_pct: Option<f64>,
    verdict: SaturationVerdict,
    quarters: u32,
    cap: u32,
) -> String {
    let horizon = horizon_phrase(quarters, cap, verdict);
    match saturation_pct {
        Some(pct) => format!(
            "{}: supply is {:.1}% of sustainable demand ({}); {}.",
            submarket,
            pct,
            verdict.describe(),
            horizon
        ),
        None => format!(
            "{}: saturation undefined, estimated demand is zero ({}); {}.",
            submarket,
            verdict.describe(),
            horizon
        ),
    }
}
