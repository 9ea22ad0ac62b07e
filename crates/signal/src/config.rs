//! Signal processing configuration

use serde::{Deserialize, Serialize};

/// How often the series is sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingFrequency {
    /// 52 periods per year (listing-site rent snapshots)
    #[default]
    Weekly,
    /// 12 periods per year
    Monthly,
    /// 4 periods per year
    Quarterly,
    /// Any other fixed number of periods per year
    Custom(u32),
}

impl SamplingFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            SamplingFrequency::Weekly => 52,
            SamplingFrequency::Monthly => 12,
            SamplingFrequency::Quarterly => 4,
            SamplingFrequency::Custom(n) => (*n).max(1),
        }
    }

    /// Seasonal cycle length in periods (one year)
    pub fn seasonal_period(&self) -> f64 {
        self.periods_per_year() as f64
    }
}

/// Configuration for the signal pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Kalman process variance (how fast the true level may move)
    pub process_variance: f64,
    /// Kalman measurement variance (how noisy each observation is)
    pub measurement_variance: f64,
    /// Low-pass cutoff as a fraction of the Nyquist frequency (0, 1)
    pub lowpass_cutoff: f64,
    /// Sampling frequency of the input series
    pub frequency: SamplingFrequency,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            process_variance: 1e-3,    // slow-moving level
            measurement_variance: 0.1, // noisy listings
            lowpass_cutoff: 0.1,       // keep cycles longer than ~20 periods
            frequency: SamplingFrequency::Weekly,
        }
    }
}

impl SignalConfig {
    /// Default pipeline for a given sampling frequency
    pub fn for_frequency(frequency: SamplingFrequency) -> Self {
        Self {
            frequency,
            ..Default::default()
        }
    }
}
