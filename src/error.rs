// error.rs

use thiserror::Error;

/// Errors raised while constructing or sampling personality values.
///
/// All variants are raised synchronously and never retried; validation
/// exists to fail fast on caller mistakes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PersonalityError {
    /// The truncated-Gaussian sampler was given a non-positive stddev.
    #[error("stddev must be positive (got {stddev})")]
    NonPositiveStddev { stddev: f64 },

    /// The truncated-Gaussian sampler was given inverted bounds.
    #[error("min_value must be <= max_value (got {min_value} > {max_value})")]
    InvalidBounds { min_value: f64, max_value: f64 },

    /// A trait facet value fell outside the unit range.
    #[error("facet `{facet}` must be within 0.0..=1.0 (got {value})")]
    FacetOutOfRange { facet: &'static str, value: f64 },
}
