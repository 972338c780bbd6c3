//! Engine error taxonomy
//!
//! Only `InsufficientData` is an expected, recoverable condition: the host
//! shows a "needs X curve" message instead of a product. The remaining
//! variants are contract violations by the caller (misaligned curves,
//! unequal slices, impossible survey stations, nonsense parameters).
//!
//! Numeric degeneracies (zero course length, zero impedance sum, all-zero
//! trace) are not errors at all; the calculators return 0 for them.

use thiserror::Error;

/// Errors raised by the geometry and geophysics calculators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    #[error("Insufficient data for {product}: needs {needs} (need {needed} samples, have {available})")]
    InsufficientData {
        product: &'static str,
        needs: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("Curve {curve} misaligned at index {index}: expected depth {expected_depth}, found {found_depth}")]
    CurveMisaligned {
        curve: String,
        index: usize,
        expected_depth: f64,
        found_depth: f64,
    },

    #[error("Length mismatch for {what}: expected {expected}, found {found}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid survey station {index}: {reason}")]
    InvalidStation { index: usize, reason: String },

    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl GeoError {
    /// True for conditions the host should present as a message rather than a fault.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}
