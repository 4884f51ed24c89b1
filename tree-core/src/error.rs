//! Error types for tree-core.

use thiserror::Error;

/// A [`crate::config::TreeParameters`] field outside the domain the
/// renderers accept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    /// The value is NaN or infinite.
    #[error("{name} must be finite, got {value}")]
    NonFinite {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The value must be strictly greater than zero.
    #[error("{name} must be positive, got {value}")]
    NotPositive {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },

    /// The value lies outside an inclusive range.
    #[error("{name} = {value} is outside {min}..={max}")]
    OutOfRange {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
}

/// Errors from [`crate::random::SeededRandom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RandomError {
    /// Every Box–Muller attempt was rejected.
    #[error("normal sample rejected {attempts} times in a row")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
    },
}
