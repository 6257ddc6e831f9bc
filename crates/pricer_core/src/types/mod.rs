//! Core contract, parameter, and error types.
//!
//! This module provides:
//! - `option`: Option kind (Call/Put) and barrier specification
//! - `params`: Lattice model parameters shared by every valuation call
//! - `error`: Structured error type for pricing operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`OptionKind`], [`BarrierSpec`], [`BarrierDirection`] from `option`
//! - [`ModelParameters`] from `params`
//! - [`PricingError`] from `error`

pub mod error;
pub mod option;
pub mod params;

// Re-export commonly used types at module level
pub use error::PricingError;
pub use option::{BarrierDirection, BarrierSpec, OptionKind};
pub use params::ModelParameters;
