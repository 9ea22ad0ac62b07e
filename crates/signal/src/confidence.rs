//! Signal-to-noise confidence
//!
//! ```text
//! noise      = original − cleaned
//! confidence = min(1, log10(P(cleaned) / P(noise) + 1) / 2)
//! ```
//!
//! where `P` is the mean of squares. An SNR of 99 (20 dB) or better maps to
//! full confidence; a cleaned series with no energy maps to zero.

use terra_core::{Confidence, clamp_confidence};

use crate::stats;

/// Confidence that `cleaned` captures `original`, in [0, 1].
///
/// Returns 1.0 when the two series are identical (perfect fit, including
/// constant input). Compares over the common length.
pub fn calculate_confidence(original: &[f64], cleaned: &[f64]) -> Confidence {
    let n = original.len().min(cleaned.len());
    let noise = stats::residuals(&original[..n], &cleaned[..n]);

    let noise_power = stats::power(&noise);
    if noise_power == 0.0 {
        return 1.0;
    }

    let signal_power = stats::power(&cleaned[..n]);
    let snr = signal_power / noise_power;
    clamp_confidence((snr + 1.0).log10() / 2.0)
}
