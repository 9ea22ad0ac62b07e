//! Error types shared by every analytical component
//!
//! Only missing or invalid top-level inputs are errors. Numeric degeneracies
//! (zero variance, zero demand, zero growth) resolve to documented sentinel
//! values with a confidence penalty instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Insufficient data: need at least {required} points, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("No demand source: supply either a price series or a precomputed demand signal")]
    MissingDemandSource,

    #[error("Ambiguous demand source: supply a price series or a demand signal, not both")]
    AmbiguousDemandSource,
}

impl Error {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
