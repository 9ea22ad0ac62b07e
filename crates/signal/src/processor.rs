//! Full decomposition pipeline and growth estimation

use log::{debug, warn};
use terra_core::{DecomposedSignal, Error, Result};

use crate::config::SignalConfig;
use crate::confidence::calculate_confidence;
use crate::kalman::smooth;
use crate::lowpass::low_pass_filter;
use crate::seasonal::decompose_seasonal;
use crate::stats;

/// Minimum number of observations for a decomposition
pub const MIN_POINTS: usize = 2;

/// Decomposition plus the growth of its trend
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesAnalysis {
    pub decomposed: DecomposedSignal,
    /// Quarter-average growth of the trend (see [`growth_rate`])
    pub growth_rate: f64,
}

fn validate(sequence: &[f64]) -> Result<()> {
    if sequence.len() < MIN_POINTS {
        return Err(Error::InsufficientData {
            required: MIN_POINTS,
            got: sequence.len(),
        });
    }
    if let Some(index) = sequence.iter().position(|v| !v.is_finite()) {
        return Err(Error::invalid(
            "sequence",
            format!("value at index {} is not finite", index),
        ));
    }
    Ok(())
}

/// Denoise and decompose a series.
///
/// smooth → low-pass → seasonal split of the low-pass output. Confidence and
/// noise level both compare the raw input against the low-pass output.
pub fn process_full(sequence: &[f64], config: &SignalConfig) -> Result<DecomposedSignal> {
    validate(sequence)?;

    let smoothed = smooth(
        sequence,
        config.process_variance,
        config.measurement_variance,
    );
    let filtered = low_pass_filter(&smoothed, config.lowpass_cutoff);
    let (trend, seasonal) = decompose_seasonal(&filtered, config.frequency.seasonal_period());

    let confidence = calculate_confidence(sequence, &filtered);
    let noise_level = stats::stdev(&stats::residuals(sequence, &filtered));

    debug!(
        "Decomposed {} points: noise_level={:.4}, confidence={:.3}",
        sequence.len(),
        noise_level,
        confidence
    );

    Ok(DecomposedSignal {
        trend,
        seasonal,
        noise_level,
        confidence,
    })
}

/// Growth between the first and last quarter-year of a trend.
///
/// `q = periods_per_year / 4` (at least one period, at most the whole
/// series); growth = mean(last q) / mean(first q) − 1. Returns 0.0 for an
/// empty trend or a zero leading average.
pub fn growth_rate(trend: &[f64], periods_per_year: u32) -> f64 {
    if trend.is_empty() {
        return 0.0;
    }

    let q = ((periods_per_year / 4) as usize).clamp(1, trend.len());
    let head = stats::mean(&trend[..q]);
    let tail = stats::mean(&trend[trend.len() - q..]);

    if head == 0.0 {
        warn!("Growth rate undefined: leading quarter averages to zero");
        return 0.0;
    }

    tail / head - 1.0
}

/// Decompose a series and measure the growth of its trend
pub fn analyze_series(sequence: &[f64], config: &SignalConfig) -> Result<SeriesAnalysis> {
    let decomposed = process_full(sequence, config)?;
    let growth_rate = growth_rate(&decomposed.trend, config.frequency.periods_per_year());

    Ok(SeriesAnalysis {
        decomposed,
        growth_rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_short_series() {
        let config = SignalConfig::default();
        assert_eq!(
            process_full(&[1.0], &config),
            Err(Error::InsufficientData {
                required: 2,
                got: 1
            })
        );
        assert!(matches!(
            process_full(&[], &config),
            Err(Error::InsufficientData { got: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_non_finite() {
        let result = process_full(&[1.0, f64::NAN, 3.0], &SignalConfig::default());
        assert!(matches!(
            result,
            Err(Error::InvalidInput { ref field, .. }) if field == "sequence"
        ));
    }

    #[test]
    fn test_two_points_degrade_gracefully() {
        let signal = process_full(&[100.0, 102.0], &SignalConfig::default()).unwrap();
        assert_eq!(signal.trend.len(), 2);
        assert_eq!(signal.seasonal, vec![0.0, 0.0]);
        assert!((0.0..=1.0).contains(&signal.confidence));
        assert!(signal.noise_level >= 0.0);
    }

    #[test]
    fn test_constant_series() {
        let signal = process_full(&vec![1250.0; 60], &SignalConfig::default()).unwrap();
        assert_eq!(signal.confidence, 1.0);
        assert_relative_eq!(signal.noise_level, 0.0, epsilon = 1e-9);
        assert_eq!(signal.trend.len(), 60);
    }

    #[test]
    fn test_growth_rate_formula() {
        // q = 13: mean of 0..13 is 6, mean of 39..52 is 45
        let trend: Vec<f64> = (0..52).map(|i| 100.0 + i as f64).collect();
        assert_relative_eq!(growth_rate(&trend, 52), 145.0 / 106.0 - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_growth_rate_short_series_clamps_window() {
        // Monthly, q = 3 but only two points: q clamps to 2
        let trend = [100.0, 110.0];
        assert_relative_eq!(growth_rate(&trend, 12), 0.0, epsilon = 1e-12);

        // Quarterly, q = 1: last over first
        assert_relative_eq!(growth_rate(&[100.0, 105.0, 110.0], 4), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_growth_rate_degenerate() {
        assert_eq!(growth_rate(&[], 52), 0.0);
        assert_eq!(growth_rate(&[0.0, 0.0, 5.0], 4), 0.0);
    }

    #[test]
    fn test_analyze_series_uses_trend() {
        let data: Vec<f64> = (0..104).map(|i| 1000.0 * 1.001f64.powi(i)).collect();
        let analysis = analyze_series(&data, &SignalConfig::default()).unwrap();
        assert!(analysis.growth_rate > 0.0);
        assert_eq!(
            analysis.growth_rate,
            growth_rate(&analysis.decomposed.trend, 52)
        );
    }
}
