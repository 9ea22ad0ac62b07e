use serde::{Deserialize, Serialize};

use crate::values::Confidence;

/// A denoised series split into trend and one seasonal waveform
///
/// `trend` and `seasonal` always have the same length as the series they
/// were computed from, and `trend[i] + seasonal[i]` reproduces the filtered
/// input at every index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecomposedSignal {
    /// Low-frequency component
    pub trend: Vec<f64>,
    /// Reconstructed seasonal waveform (all zeros when history is too short)
    pub seasonal: Vec<f64>,
    /// Standard deviation of the removed noise
    pub noise_level: f64,
    /// Signal-to-noise derived confidence (0.0 - 1.0)
    pub confidence: Confidence,
}

impl DecomposedSignal {
    /// Number of periods covered
    pub fn len(&self) -> usize {
        self.trend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trend.is_empty()
    }

    /// Trend plus seasonal, i.e. the filtered series
    pub fn reconstructed(&self) -> Vec<f64> {
        self.trend
            .iter()
            .zip(&self.seasonal)
            .map(|(t, s)| t + s)
            .collect()
    }

    /// Peak-to-trough amplitude of the seasonal waveform
    pub fn seasonal_amplitude(&self) -> f64 {
        let max = self.seasonal.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = self.seasonal.iter().cloned().fold(f64::INFINITY, f64::min);
        if self.seasonal.is_empty() {
            0.0
        } else {
            max - min
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstructed() {
        let signal = DecomposedSignal {
            trend: vec![10.0, 11.0, 12.0],
            seasonal: vec![1.0, 0.0, -1.0],
            noise_level: 0.0,
            confidence: 1.0,
        };
        assert_eq!(signal.reconstructed(), vec![11.0, 11.0, 11.0]);
        assert_eq!(signal.len(), 3);
        assert!((signal.seasonal_amplitude() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_amplitude() {
        let signal = DecomposedSignal {
            trend: vec![],
            seasonal: vec![],
            noise_level: 0.0,
            confidence: 1.0,
        };
        assert!(signal.is_empty());
        assert_eq!(signal.seasonal_amplitude(), 0.0);
    }
}
