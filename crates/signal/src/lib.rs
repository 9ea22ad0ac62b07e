//! Terra Signal Processing
//!
//! Turns a noisy, equally spaced series (weekly rents, monthly prices) into a
//! denoised trend, one seasonal waveform, a noise estimate and a confidence.
//!
//! ## Pipeline
//!
//! ```text
//! raw ──► smooth (1-D Kalman) ──► low_pass_filter (zero-phase Butterworth)
//!                                        │
//!               ┌────────────────────────┼──────────────────────────┐
//!               ▼                        ▼                          ▼
//!     decompose_seasonal       calculate_confidence       noise_level = σ(raw − filtered)
//!      (trend, seasonal)        (raw vs filtered)
//! ```
//!
//! Every stage is a pure function. Short or degenerate input never panics:
//! each stage falls back to a documented default (pass-through, zero
//! seasonal, confidence 1.0 for a perfect fit). Only [`process_full`] and
//! [`analyze_series`] validate input, rejecting fewer than two points.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use terra_signal::{SignalConfig, analyze_series};
//!
//! let analysis = analyze_series(&weekly_rents, &SignalConfig::default())?;
//! println!("growth {:.1}%/yr", analysis.growth_rate * 100.0);
//! ```

pub mod config;
pub mod confidence;
pub mod kalman;
pub mod lowpass;
pub mod processor;
pub mod seasonal;
pub mod stats;

// Re-export main types
pub use confidence::calculate_confidence;
pub use config::{SamplingFrequency, SignalConfig};
pub use kalman::smooth;
pub use lowpass::{Biquad, low_pass_filter};
pub use processor::{SeriesAnalysis, analyze_series, growth_rate, process_full};
pub use seasonal::decompose_seasonal;
