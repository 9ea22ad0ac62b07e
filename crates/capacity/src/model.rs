//! Capacity Model Calculations
//!
//! Stateless functions over a [`MarketStructuralInput`]. Unit counts are
//! rounded to the nearest whole unit.

use terra_core::{
    Confidence, Error, MarketStructuralInput, Result, SaturationVerdict, clamp_confidence,
};

use crate::config::CapacityConfig;

const UNIT_OVERFLOW: &str = "exceeds the representable unit count";

/// Unit count as a signed integer, rejecting counts above `i64::MAX`
pub fn unit_count(count: u64, field: &str) -> Result<i64> {
    i64::try_from(count).map_err(|_| Error::invalid(field, UNIT_OVERFLOW))
}

/// Rounded unit estimate as a signed integer
fn estimate_units(value: f64, field: &str) -> Result<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    if value.is_finite() && value.abs() < i64::MAX as f64 {
        Ok(value as i64)
    } else {
        Err(Error::invalid(field, UNIT_OVERFLOW))
    }
}

/// Sustainable demand in housing units
///
/// `population × renter_ratio + employment × employment_growth × jobs_to_units_ratio`,
/// floored at zero when shrinking employment outweighs the resident base.
pub fn demand_capacity(input: &MarketStructuralInput, config: &CapacityConfig) -> Result<i64> {
    let resident_demand = input.population as f64 * config.renter_ratio;
    let job_demand =
        input.employment as f64 * input.employment_growth_rate * config.jobs_to_units_ratio;
    estimate_units((resident_demand + job_demand).round().max(0.0), "population")
}

/// New rental demand per year from population growth (negative when shrinking)
pub fn demand_growth_annual(input: &MarketStructuralInput, config: &CapacityConfig) -> Result<i64> {
    estimate_units(
        (input.population as f64 * input.population_growth_rate * config.renter_ratio).round(),
        "population_growth_rate",
    )
}

/// Existing + pipeline + permitted units
pub fn supply(input: &MarketStructuralInput) -> Result<i64> {
    unit_count(input.total_supply(), "existing_units")
}

/// Supply / demand, or None when demand is zero
pub fn saturation(demand: i64, supply: i64) -> Option<f64> {
    if demand <= 0 {
        None
    } else {
        Some(supply as f64 / demand as f64)
    }
}

/// Classify a saturation ratio against the configured thresholds
pub fn classify(saturation: f64, config: &CapacityConfig) -> SaturationVerdict {
    config.thresholds.classify(saturation)
}

/// Quarters until population growth absorbs excess supply.
///
/// Zero when balanced or when there is no excess (undersupply is not
/// absorbed by growth). Capped at `max_equilibrium_quarters`, which is also
/// returned when the population is not growing.
pub fn equilibrium_quarters(
    input: &MarketStructuralInput,
    demand: i64,
    supply: i64,
    verdict: SaturationVerdict,
    config: &CapacityConfig,
) -> u32 {
    if verdict == SaturationVerdict::Balanced {
        return 0;
    }

    let excess = supply.saturating_sub(demand);
    if excess <= 0 {
        return 0;
    }

    let cap = config.max_equilibrium_quarters;
    let quarterly_growth =
        input.population as f64 * input.population_growth_rate / 4.0 * config.renter_ratio;
    if quarterly_growth <= 0.0 {
        return cap;
    }

    let quarters = (excess as f64 / quarterly_growth).ceil();
    if quarters >= cap as f64 {
        cap
    } else {
        quarters as u32
    }
}

/// Data-quality confidence, starting at 1.0 and discounted multiplicatively
pub fn confidence(input: &MarketStructuralInput, config: &CapacityConfig) -> Confidence {
    let d = &config.discounts;
    let mut confidence = 1.0;

    if input.population < d.small_population {
        confidence *= d.small_population_factor;
    } else if input.population < d.mid_population {
        confidence *= d.mid_population_factor;
    }

    if input.population_growth_rate.abs() > d.volatile_growth_rate {
        confidence *= d.volatile_growth_factor;
    }

    // Zero pipeline in a sizeable market usually means the permit feed is missing
    if input.pipeline_units == 0 && input.existing_units > d.missing_pipeline_existing_units {
        confidence *= d.missing_pipeline_factor;
    }

    clamp_confidence(confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config() -> CapacityConfig {
        CapacityConfig::default()
    }

    fn market(population: u64, growth: f64) -> MarketStructuralInput {
        MarketStructuralInput::new("Test")
            .with_population(population, growth)
            .with_units(1_000, 100, 0)
    }

    #[test]
    fn test_demand_capacity() {
        let input = MarketStructuralInput::new("Test")
            .with_population(10_000, 0.01)
            .with_employment(5_000, 0.02);
        // 10_000 × 0.35 + 5_000 × 0.02 × 0.8 = 3_500 + 80
        assert_eq!(demand_capacity(&input, &config()).unwrap(), 3_580);
    }

    #[test]
    fn test_demand_floors_at_zero() {
        let input = MarketStructuralInput::new("Test")
            .with_population(100, 0.0)
            .with_employment(100_000, -0.5);
        assert_eq!(demand_capacity(&input, &config()).unwrap(), 0);
    }

    #[test]
    fn test_demand_growth_annual() {
        assert_eq!(demand_growth_annual(&market(40_000, 0.02), &config()).unwrap(), 280);
        assert_eq!(demand_growth_annual(&market(40_000, -0.01), &config()).unwrap(), -140);
    }

    #[test]
    fn test_unit_counts_beyond_i64_are_rejected() {
        assert_eq!(unit_count(14_500, "existing_units").unwrap(), 14_500);
        assert!(matches!(
            unit_count(u64::MAX / 2 + 10, "existing_units"),
            Err(Error::InvalidInput { field, .. }) if field == "existing_units"
        ));

        let huge_stock = MarketStructuralInput::new("Test").with_units(u64::MAX / 2 + 10, 0, 0);
        assert!(supply(&huge_stock).is_err());

        // Demand estimate past i64::MAX instead of a saturated cast
        let extreme = CapacityConfig {
            renter_ratio: 1e9,
            ..config()
        };
        let crowded = MarketStructuralInput::new("Test").with_population(u64::MAX, 0.5);
        assert!(demand_capacity(&crowded, &extreme).is_err());
        assert!(demand_growth_annual(&crowded, &extreme).is_err());
    }

    #[test]
    fn test_saturation() {
        assert_eq!(saturation(1_000, 1_000), Some(1.0));
        assert_relative_eq!(saturation(1_000, 700).unwrap(), 0.70);
        assert_eq!(saturation(0, 500), None);
    }

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify(1.0, &config()), SaturationVerdict::Balanced);
        assert_eq!(classify(0.70, &config()), SaturationVerdict::CriticallyUndersupplied);
        assert_eq!(classify(0.90, &config()), SaturationVerdict::Undersupplied);
        assert_eq!(classify(1.10, &config()), SaturationVerdict::Oversupplied);
        assert_eq!(classify(1.40, &config()), SaturationVerdict::CriticallyOversupplied);
    }

    #[test]
    fn test_equilibrium_balanced_is_zero() {
        let input = market(40_000, 0.02);
        assert_eq!(
            equilibrium_quarters(&input, 1_000, 1_040, SaturationVerdict::Balanced, &config()),
            0
        );
    }

    #[test]
    fn test_equilibrium_undersupplied_is_zero() {
        let input = market(40_000, 0.02);
        assert_eq!(
            equilibrium_quarters(
                &input,
                1_000,
                700,
                SaturationVerdict::CriticallyUndersupplied,
                &config()
            ),
            0
        );
    }

    #[test]
    fn test_equilibrium_absorbs_excess() {
        // quarterly growth = 40_000 × 0.02 / 4 × 0.35 = 70 units
        let input = market(40_000, 0.02);
        assert_eq!(
            equilibrium_quarters(&input, 1_000, 1_100, SaturationVerdict::Oversupplied, &config()),
            2 // ceil(100 / 70)
        );
    }

    #[test]
    fn test_equilibrium_capped() {
        let input = market(40_000, 0.02);
        assert_eq!(
            equilibrium_quarters(
                &input,
                1_000,
                9_000,
                SaturationVerdict::CriticallyOversupplied,
                &config()
            ),
            40
        );

        let stagnant = market(40_000, 0.0);
        assert_eq!(
            equilibrium_quarters(&stagnant, 1_000, 1_200, SaturationVerdict::Oversupplied, &config()),
            40
        );

        let shrinking = market(40_000, -0.01);
        assert_eq!(
            equilibrium_quarters(&shrinking, 1_000, 1_200, SaturationVerdict::Oversupplied, &config()),
            40
        );
    }

    #[test]
    fn test_confidence_discounts() {
        // Large, steady market with a pipeline: full confidence
        assert_eq!(confidence(&market(50_000, 0.01), &config()), 1.0);

        // Small market
        assert_relative_eq!(confidence(&market(8_000, 0.01), &config()), 0.7);

        // Mid-size market with volatile growth
        assert_relative_eq!(confidence(&market(20_000, 0.08), &config()), 0.85 * 0.8);

        // Sizeable stock but zero pipeline
        let no_pipeline = MarketStructuralInput::new("Test")
            .with_population(50_000, -0.06)
            .with_units(5_000, 0, 0);
        assert_relative_eq!(confidence(&no_pipeline, &config()), 0.8 * 0.9);
    }
}
