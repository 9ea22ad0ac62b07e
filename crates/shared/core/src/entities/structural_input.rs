use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Structural description of a submarket
///
/// Every field is required on the wire. Counts are unsigned, so the
/// non-negativity constraints hold by construction; [`validate`](Self::validate)
/// covers the float fields and keeps total supply within `i64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketStructuralInput {
    /// Name of the submarket (used in summaries and recommendations)
    pub submarket: String,
    /// Resident population
    pub population: u64,
    /// Annual population growth as a fraction (0.02 = 2%/yr)
    pub population_growth_rate: f64,
    /// Net migration per year (negative = out-migration)
    pub net_migration_annual: i64,
    /// Total employment
    pub employment: u64,
    /// Annual employment growth as a fraction
    pub employment_growth_rate: f64,
    /// Median household income
    pub median_income: f64,
    /// Units already built
    pub existing_units: u64,
    /// Units under construction
    pub pipeline_units: u64,
    /// Permitted but not yet started
    pub future_permitted_units: u64,
}

impl MarketStructuralInput {
    /// Create an empty input for a named submarket
    pub fn new(submarket: impl Into<String>) -> Self {
        Self {
            submarket: submarket.into(),
            population: 0,
            population_growth_rate: 0.0,
            net_migration_annual: 0,
            employment: 0,
            employment_growth_rate: 0.0,
            median_income: 0.0,
            existing_units: 0,
            pipeline_units: 0,
            future_permitted_units: 0,
        }
    }

    /// Builder: Set population and its annual growth rate
    pub fn with_population(mut self, population: u64, growth_rate: f64) -> Self {
        self.population = population;
        self.population_growth_rate = growth_rate;
        self
    }

    /// Builder: Set net annual migration
    pub fn with_net_migration(mut self, net_migration_annual: i64) -> Self {
        self.net_migration_annual = net_migration_annual;
        self
    }

    /// Builder: Set employment and its annual growth rate
    pub fn with_employment(mut self, employment: u64, growth_rate: f64) -> Self {
        self.employment = employment;
        self.employment_growth_rate = growth_rate;
        self
    }

    /// Builder: Set median income
    pub fn with_median_income(mut self, median_income: f64) -> Self {
        self.median_income = median_income;
        self
    }

    /// Builder: Set housing stock (existing, under construction, permitted)
    pub fn with_units(mut self, existing: u64, pipeline: u64, future_permitted: u64) -> Self {
        self.existing_units = existing;
        self.pipeline_units = pipeline;
        self.future_permitted_units = future_permitted;
        self
    }

    /// Existing + pipeline + permitted units
    pub fn total_supply(&self) -> u64 {
        self.existing_units
            .saturating_add(self.pipeline_units)
            .saturating_add(self.future_permitted_units)
    }

    /// Reject inputs the capacity model cannot reason about
    pub fn validate(&self) -> Result<()> {
        if self.submarket.trim().is_empty() {
            return Err(Error::invalid("submarket", "must not be empty"));
        }
        if !self.population_growth_rate.is_finite() {
            return Err(Error::invalid("population_growth_rate", "must be finite"));
        }
        if self.population_growth_rate <= -1.0 {
            return Err(Error::invalid(
                "population_growth_rate",
                "must be greater than -1.0",
            ));
        }
        if !self.employment_growth_rate.is_finite() {
            return Err(Error::invalid("employment_growth_rate", "must be finite"));
        }
        if !self.median_income.is_finite() || self.median_income < 0.0 {
            return Err(Error::invalid(
                "median_income",
                "must be a non-negative number",
            ));
        }
        let units = self.existing_units as u128
            + self.pipeline_units as u128
            + self.future_permitted_units as u128;
        if units > i64::MAX as u128 {
            return Err(Error::invalid(
                "existing_units",
                "total supply exceeds the representable unit count",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn riverside() -> MarketStructuralInput {
        MarketStructuralInput::new("Riverside")
            .with_population(48_200, 0.012)
            .with_employment(35_000, 0.018)
            .with_median_income(61_500.0)
            .with_units(11_240, 2_840, 420)
    }

    #[test]
    fn test_builder_and_supply() {
        let input = riverside();
        assert_eq!(input.submarket, "Riverside");
        assert_eq!(input.total_supply(), 14_500);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_fields() {
        let blank = MarketStructuralInput {
            submarket: "  ".to_string(),
            ..riverside()
        };
        assert!(matches!(
            blank.validate(),
            Err(Error::InvalidInput { field, .. }) if field == "submarket"
        ));

        let nan_growth = riverside().with_employment(35_000, f64::NAN);
        assert!(nan_growth.validate().is_err());

        let negative_income = riverside().with_median_income(-1.0);
        assert!(negative_income.validate().is_err());

        let collapse = riverside().with_population(48_200, -1.0);
        assert!(collapse.validate().is_err());

        let overflow = riverside().with_units(u64::MAX / 2, u64::MAX / 2, 0);
        assert!(matches!(
            overflow.validate(),
            Err(Error::InvalidInput { field, .. }) if field == "existing_units"
        ));
        assert!(riverside().with_units(i64::MAX as u64, 0, 0).validate().is_ok());
    }

    #[test]
    fn test_missing_field_fails_deserialization() {
        let json = r#"{"submarket": "Riverside", "population": 1000}"#;
        assert!(serde_json::from_str::<MarketStructuralInput>(json).is_err());
    }
}
