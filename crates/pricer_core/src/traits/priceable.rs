//! Trait for priceable instruments.
//!
//! All implementations are expected to be pure: repeated calls on the same
//! value return the same result and leave no state behind.

use num_traits::Float;

use crate::types::error::PricingError;

/// Trait for entities that can be priced.
///
/// # Type Parameters
/// * `T` - Floating-point type (f32, f64, or a dual number)
///
/// # Design Philosophy
///
/// This trait is designed for **static dispatch**. Prefer `enum`-based
/// dispatch over `Box<dyn Priceable>`:
///
/// ```
/// use pricer_core::traits::priceable::Priceable;
/// use pricer_core::types::PricingError;
/// use num_traits::Float;
///
/// enum Instrument<T: Float> {
///     Cash { amount: T },
///     ZeroCoupon { face: T, discount: T },
/// }
///
/// impl<T: Float> Priceable<T> for Instrument<T> {
///     fn price(&self) -> Result<T, PricingError> {
///         match self {
///             Instrument::Cash { amount } => Ok(*amount),
///             Instrument::ZeroCoupon { face, discount } => Ok(*face * *discount),
///         }
///     }
/// }
///
/// let bond = Instrument::ZeroCoupon { face: 100.0_f64, discount: 0.95 };
/// assert_eq!(bond.price().unwrap(), 95.0);
/// ```
pub trait Priceable<T: Float> {
    /// Calculate the price of the instrument.
    ///
    /// # Returns
    /// The calculated price (present value), or the reason it could not be
    /// computed.
    ///
    /// # Invariants
    /// - A returned price is finite and non-negative for option contracts
    /// - The method must be pure (no side effects, deterministic)
    fn price(&self) -> Result<T, PricingError>;
}
