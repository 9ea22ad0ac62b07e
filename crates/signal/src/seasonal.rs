//! Spectral Seasonal Decomposition
//!
//! Isolates a single seasonal cycle by keeping only the FFT bin closest to
//! `1 / period` (and its conjugate), inverting it, and subtracting the
//! resulting waveform from the series:
//!
//! ```text
//! X = FFT(x)
//! k = argmin |k/n − 1/period|            (0 < k ≤ n/2)
//! seasonal = Re(IFFT(X[k] + X[n−k])) / n
//! trend    = x − seasonal
//! ```
//!
//! With less than half a cycle of history there is nothing to resolve:
//! seasonal is all zeros and the trend is the input.

use log::debug;
use rustfft::{FftPlanner, num_complex::Complex};

/// Index of the positive-frequency bin nearest `1 / period`
///
/// Returns None when the nearest bin is DC (not enough history).
fn seasonal_bin(len: usize, period: f64) -> Option<usize> {
    let k = (len as f64 / period).round() as usize;
    let k = k.min(len / 2);
    if k == 0 { None } else { Some(k) }
}

/// Split a series into `(trend, seasonal)`.
///
/// Deterministic: the same input always yields the same output.
pub fn decompose_seasonal(sequence: &[f64], period: f64) -> (Vec<f64>, Vec<f64>) {
    let n = sequence.len();
    let no_season = || (sequence.to_vec(), vec![0.0; n]);

    if n == 0 || !period.is_finite() || period <= 0.0 {
        return no_season();
    }
    if (n as f64) < period / 2.0 {
        debug!(
            "Seasonal decomposition skipped: {} points < half of period {}",
            n, period
        );
        return no_season();
    }
    let Some(k) = seasonal_bin(n, period) else {
        return no_season();
    };

    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(n);
    let inverse = planner.plan_fft_inverse(n);

    let mut spectrum: Vec<Complex<f64>> =
        sequence.iter().map(|&v| Complex::new(v, 0.0)).collect();
    forward.process(&mut spectrum);

    let mut isolated = vec![Complex::new(0.0, 0.0); n];
    isolated[k] = spectrum[k];
    isolated[n - k] = spectrum[n - k];
    inverse.process(&mut isolated);

    // rustfft does not normalize the inverse transform
    let scale = n as f64;
    let seasonal: Vec<f64> = isolated.iter().map(|c| c.re / scale).collect();
    let trend: Vec<f64> = sequence
        .iter()
        .zip(&seasonal)
        .map(|(x, s)| x - s)
        .collect();

    (trend, seasonal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_recovers_pure_cycle() {
        // Two full years of weekly data: an exact cycle on a flat level
        let n = 104;
        let data: Vec<f64> = (0..n)
            .map(|i| 1500.0 + 40.0 * (2.0 * PI * i as f64 / 52.0).sin())
            .collect();

        let (trend, seasonal) = decompose_seasonal(&data, 52.0);
        assert_eq!(trend.len(), n);
        assert_eq!(seasonal.len(), n);
        for i in 0..n {
            assert_relative_eq!(trend[i], 1500.0, epsilon = 1e-6);
            assert_relative_eq!(
                seasonal[i],
                40.0 * (2.0 * PI * i as f64 / 52.0).sin(),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_trend_plus_seasonal_is_input() {
        let data: Vec<f64> = (0..60)
            .map(|i| 900.0 + 2.0 * i as f64 + 15.0 * (i as f64 / 3.0).cos())
            .collect();
        let (trend, seasonal) = decompose_seasonal(&data, 12.0);
        for i in 0..data.len() {
            assert_relative_eq!(trend[i] + seasonal[i], data[i], epsilon = 1e-9);
        }
    }

    #[test]
    fn test_short_history_has_no_season() {
        let data = vec![10.0, 11.0, 12.0, 13.0];
        let (trend, seasonal) = decompose_seasonal(&data, 52.0);
        assert_eq!(trend, data);
        assert_eq!(seasonal, vec![0.0; 4]);
    }

    #[test]
    fn test_invalid_period_has_no_season() {
        let data = vec![1.0, 2.0, 3.0];
        assert_eq!(decompose_seasonal(&data, 0.0).1, vec![0.0; 3]);
        assert_eq!(decompose_seasonal(&data, f64::NAN).1, vec![0.0; 3]);
    }

    #[test]
    fn test_deterministic() {
        let data: Vec<f64> = (0..73).map(|i| ((i * 37) % 11) as f64).collect();
        let first = decompose_seasonal(&data, 12.0);
        let second = decompose_seasonal(&data, 12.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_seasonal_bin() {
        assert_eq!(seasonal_bin(104, 52.0), Some(2));
        assert_eq!(seasonal_bin(30, 52.0), Some(1));
        assert_eq!(seasonal_bin(20, 52.0), None);
        // Capped at Nyquist
        assert_eq!(seasonal_bin(10, 1.0), Some(5));
    }
}
