/// Self-assessed reliability of a result, always in [0, 1]
/// Future: could become a newtype that enforces the range on construction
pub type Confidence = f64;

/// Integer score on a 0-100 scale
pub type Score = u8;

/// Clamp a confidence into [0, 1]. NaN collapses to zero.
pub fn clamp_confidence(value: f64) -> Confidence {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Clamp a raw score into [0, 100] and truncate to an integer.
pub fn clamp_score(value: f64) -> Score {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0).trunc() as Score
}
