//! Lattice error types.
//!
//! This module provides structured error handling for parameter
//! validation and backward induction.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Lattice valuation errors.
///
/// Every variant is raised before a wrong layer can reach the caller;
/// there is no partial result.
///
/// # Variants
/// - `InvalidCalibration`: Factors or risk-neutral probability admit arbitrage
/// - `InvalidGeometry`: Contract terms cannot describe a lattice
/// - `NumericOverflow`: A node price or the root value is not finite
///
/// # Examples
/// ```
/// use pricer_lattice::LatticeError;
///
/// let err = LatticeError::NumericOverflow { layer: 5000 };
/// assert!(format!("{}", err).contains("5000"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// Up/down factors or the derived probability are not arbitrage-free.
    #[error("Invalid calibration: u = {up}, d = {down}, q = {probability}")]
    InvalidCalibration {
        /// Up factor (u)
        up: f64,
        /// Down factor (d)
        down: f64,
        /// Risk-neutral up probability (NaN when not yet derived)
        probability: f64,
    },

    /// Contract terms that cannot describe a lattice.
    #[error("Invalid geometry: {message}")]
    InvalidGeometry {
        /// Description of the offending input
        message: String,
    },

    /// Non-finite node price detected at `layer`.
    #[error("Numeric overflow at layer {layer}")]
    NumericOverflow {
        /// Time-layer index where the overflow was detected
        layer: usize,
    },

    /// Unknown induction strategy name.
    #[error("Unknown induction strategy: {name}")]
    UnknownStrategy {
        /// The name that failed to parse
        name: String,
    },
}

impl LatticeError {
    pub(crate) fn geometry(message: impl Into<String>) -> Self {
        LatticeError::InvalidGeometry {
            message: message.into(),
        }
    }
}

impl From<LatticeError> for PricingError {
    fn from(err: LatticeError) -> Self {
        match err {
            LatticeError::InvalidCalibration { .. } | LatticeError::InvalidGeometry { .. } => {
                PricingError::InvalidInput(err.to_string())
            }
            LatticeError::NumericOverflow { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            LatticeError::UnknownStrategy { name } => {
                PricingError::InvalidInput(format!("Unknown induction strategy: {}", name))
            }
        }
    }
}
