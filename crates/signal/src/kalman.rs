//! Recursive level estimator
//!
//! A one-dimensional Kalman filter with a random-walk state model:
//!
//! ```text
//! predict:  p = cov + q
//! gain:     k = p / (p + r)
//! update:   x = x + k · (z − x)
//!           cov = (1 − k) · p
//! ```
//!
//! State starts at the first observation with unit error covariance.

/// Smooth a series with a 1-D Kalman filter.
///
/// Output has the same length as the input; the first value is passed
/// through unchanged. Negative variances are treated as zero.
pub fn smooth(sequence: &[f64], process_variance: f64, measurement_variance: f64) -> Vec<f64> {
    let Some(&first) = sequence.first() else {
        return Vec::new();
    };

    let q = process_variance.max(0.0);
    let r = measurement_variance.max(0.0);

    let mut result = Vec::with_capacity(sequence.len());
    let mut estimate = first;
    let mut covariance = 1.0;
    result.push(estimate);

    for &observation in &sequence[1..] {
        let predicted = covariance + q;
        let denominator = predicted + r;
        // Both variances zero and fully converged: trust the measurement
        let gain = if denominator > 0.0 {
            predicted / denominator
        } else {
            1.0
        };

        estimate += gain * (observation - estimate);
        covariance = (1.0 - gain) * predicted;
        result.push(estimate);
    }

    result
}
