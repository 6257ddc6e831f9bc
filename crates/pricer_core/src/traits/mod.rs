//! Core traits for priceable instruments.
//!
//! This module defines fundamental abstractions for:
//! - Generic floating-point operations (`Float` trait)
//! - Price calculation (`Priceable` trait)
//!
//! Instruments are modelled as enums and dispatched statically; the traits
//! are not intended for `Box<dyn Trait>` use.

/// Generic floating-point trait for numeric computations.
///
/// This trait provides a unified interface for both standard floating-point
/// types (f64, f32) and automatic differentiation types (dual numbers).
///
/// # Examples
/// ```
/// use pricer_core::traits::Float;
///
/// fn compute_discount<T: Float>(rate: T, time: T) -> T {
///     (-rate * time).exp()
/// }
///
/// let discount_f64: f64 = compute_discount(0.05, 1.0);
/// assert!((discount_f64 - 0.951229).abs() < 1e-5);
/// ```
pub use num_traits::Float;

pub mod priceable;
