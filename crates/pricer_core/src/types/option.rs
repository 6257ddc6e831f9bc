//! Option contract definitions.
//!
//! This module provides the closed set of option kinds priced by the
//! lattice and the barrier specification for knock-out contracts.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;

use super::error::PricingError;

/// Kind of option payoff.
///
/// # Variants
/// - `Call`: max(S - K, 0)
/// - `Put`: max(K - S, 0)
///
/// # Examples
/// ```
/// use pricer_core::types::OptionKind;
///
/// let call = OptionKind::Call;
/// assert_eq!(call.payoff(110.0_f64, 100.0), 10.0);
///
/// let put: OptionKind = "put".parse().unwrap();
/// assert_eq!(put.payoff(110.0_f64, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionKind {
    /// Call option: max(S - K, 0)
    Call,
    /// Put option: max(K - S, 0)
    Put,
}

impl OptionKind {
    /// Evaluate the intrinsic payoff for given spot and strike.
    ///
    /// The result is never negative.
    #[inline]
    pub fn payoff<T: Float>(&self, spot: T, strike: T) -> T {
        let zero = T::zero();
        match self {
            OptionKind::Call => (spot - strike).max(zero),
            OptionKind::Put => (strike - spot).max(zero),
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKind::Call => write!(f, "call"),
            OptionKind::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" | "c" => Ok(OptionKind::Call),
            "put" | "p" => Ok(OptionKind::Put),
            other => Err(PricingError::InvalidInput(format!(
                "Unknown option kind: {}. Supported: call, put",
                other
            ))),
        }
    }
}

/// Direction of a knock-out barrier.
///
/// Only up-and-out barriers are supported by the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BarrierDirection {
    /// Contract dies once the underlying reaches or exceeds the level.
    #[default]
    UpAndOut,
}

/// Barrier specification for knock-out contracts.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `Dual64`)
///
/// # Examples
/// ```
/// use pricer_core::types::BarrierSpec;
///
/// let barrier = BarrierSpec::up_and_out(125.0_f64);
/// assert!(barrier.is_breached(125.0));
/// assert!(!barrier.is_breached(121.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarrierSpec<T: Float> {
    level: T,
    #[cfg_attr(feature = "serde", serde(default))]
    direction: BarrierDirection,
}

impl<T: Float> BarrierSpec<T> {
    /// Creates an up-and-out barrier at `level`.
    #[inline]
    pub fn up_and_out(level: T) -> Self {
        Self {
            level,
            direction: BarrierDirection::UpAndOut,
        }
    }

    /// Returns the barrier level (H).
    #[inline]
    pub fn level(&self) -> T {
        self.level
    }

    /// Returns whether an underlying price of `spot` knocks the contract out.
    ///
    /// Touching the level counts as a breach.
    #[inline]
    pub fn is_breached(&self, spot: T) -> bool {
        match self.direction {
            BarrierDirection::UpAndOut => spot >= self.level,
        }
    }
}
