//! Zero-Phase Low-Pass Filter
//!
//! A 2nd-order Butterworth section (bilinear transform) applied forward and
//! then backward, so the output has no phase lag. The series is padded with
//! an odd reflection at both ends and each pass starts from the filter's
//! steady state, which keeps edge transients small.
//!
//! Series shorter than [`LOWPASS_MIN_LEN`] are returned unchanged: there is
//! not enough history to filter them reliably.

use std::f64::consts::{PI, SQRT_2};

use log::debug;

use crate::stats;

/// Below this many points the filter is a pass-through
pub const LOWPASS_MIN_LEN: usize = 20;

/// Cutoff used when the configured one is not a finite number
const FALLBACK_CUTOFF: f64 = 0.1;

/// Odd-reflection padding: 3 × max(len(a), len(b))
const PAD_LEN: usize = 9;

/// Second-order IIR section in transposed direct form II
///
/// `a` holds `[a1, a2]`; `a0` is normalized to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    pub b: [f64; 3],
    pub a: [f64; 2],
}

impl Biquad {
    /// Butterworth low-pass with cutoff given as a fraction of Nyquist
    pub fn butterworth_lowpass(cutoff: f64) -> Self {
        let wn = if cutoff.is_finite() {
            cutoff.clamp(1e-6, 1.0 - 1e-6)
        } else {
            FALLBACK_CUTOFF
        };

        let k = (PI * wn / 2.0).tan();
        let k2 = k * k;
        let norm = 1.0 / (1.0 + SQRT_2 * k + k2);
        let b0 = k2 * norm;

        Self {
            b: [b0, 2.0 * b0, b0],
            a: [2.0 * (k2 - 1.0) * norm, (1.0 - SQRT_2 * k + k2) * norm],
        }
    }

    /// Gain at zero frequency
    pub fn dc_gain(&self) -> f64 {
        (self.b[0] + self.b[1] + self.b[2]) / (1.0 + self.a[0] + self.a[1])
    }

    /// Filter state that holds the output steady for a unit step input
    fn steady_state(&self) -> [f64; 2] {
        let g = self.dc_gain();
        let z2 = self.b[2] - self.a[1] * g;
        let z1 = self.b[1] - self.a[0] * g + z2;
        [z1, z2]
    }

    /// Single causal pass, starting from steady state at `input[0]`
    pub fn filter(&self, input: &[f64]) -> Vec<f64> {
        let Some(&first) = input.first() else {
            return Vec::new();
        };

        let [s1, s2] = self.steady_state();
        let (mut z1, mut z2) = (s1 * first, s2 * first);
        let [b0, b1, b2] = self.b;
        let [a1, a2] = self.a;

        input
            .iter()
            .map(|&x| {
                let y = b0 * x + z1;
                z1 = b1 * x - a1 * y + z2;
                z2 = b2 * x - a2 * y;
                y
            })
            .collect()
    }

    /// Forward-backward pass with odd-reflection padding
    ///
    /// Returns the input unchanged if it is not longer than the padding.
    pub fn filtfilt(&self, input: &[f64]) -> Vec<f64> {
        let n = input.len();
        if n <= PAD_LEN {
            return input.to_vec();
        }

        let first = input[0];
        let last = input[n - 1];

        let mut extended = Vec::with_capacity(n + 2 * PAD_LEN);
        extended.extend((1..=PAD_LEN).rev().map(|i| 2.0 * first - input[i]));
        extended.extend_from_slice(input);
        extended.extend((n - 1 - PAD_LEN..n - 1).rev().map(|i| 2.0 * last - input[i]));

        let mut forward = self.filter(&extended);
        forward.reverse();
        let mut backward = self.filter(&forward);
        backward.reverse();

        backward[PAD_LEN..PAD_LEN + n].to_vec()
    }
}

/// Remove residual high-frequency noise without introducing lag.
///
/// Pass-through when the series has fewer than [`LOWPASS_MIN_LEN`] points.
/// The output is never more dispersed than the input. Smoothing a noisy
/// start or end of a trending series can push those samples away from the
/// mean; when that happens the input is restored at the edges, one sample
/// per end at a time, until the dispersion is back within bounds. The
/// interior keeps its filtered values.
pub fn low_pass_filter(sequence: &[f64], cutoff: f64) -> Vec<f64> {
    let n = sequence.len();
    if n < LOWPASS_MIN_LEN {
        debug!("Low-pass skipped: {} points < {}", n, LOWPASS_MIN_LEN);
        return sequence.to_vec();
    }

    let mut filtered = Biquad::butterworth_lowpass(cutoff).filtfilt(sequence);
    let limit = stats::stdev(sequence);

    let mut restored = 0;
    while restored < n / 2 && stats::stdev(&filtered) > limit {
        filtered[restored] = sequence[restored];
        filtered[n - 1 - restored] = sequence[n - 1 - restored];
        restored += 1;
    }

    if restored > 0 {
        debug!("Low-pass: restored {} edge samples at each end", restored);
    }
    // Odd length leaves only the middle sample filtered
    if stats::stdev(&filtered) > limit {
        return sequence.to_vec();
    }

    filtered
}
