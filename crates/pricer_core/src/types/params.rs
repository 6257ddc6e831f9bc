//! Lattice model parameters.
//!
//! This module provides the immutable parameter set consumed by one
//! valuation call: contract terms (spot, strike, maturity, kind), the
//! risk-free rate, and the lattice shape (steps, up and down factors).

use num_traits::Float;

use super::option::OptionKind;

/// Parameters of a single binomial lattice valuation.
///
/// Contract terms are fixed at construction; the lattice shape is attached
/// with [`with_lattice`](Self::with_lattice) (explicit factors) or
/// [`with_volatility`](Self::with_volatility) (Cox-Ross-Rubinstein factors).
/// Values are not validated here; the lattice engine checks them before
/// building any layer.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `Dual64`)
///
/// # Examples
/// ```
/// use pricer_core::types::{ModelParameters, OptionKind};
///
/// let params = ModelParameters::new(100.0_f64, 100.0, 1.0, 0.06, OptionKind::Put)
///     .with_volatility(0.2, 100);
///
/// assert_eq!(params.steps(), 100);
/// assert!((params.up() * params.down() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParameters<T: Float> {
    spot: T,
    strike: T,
    maturity: T,
    rate: T,
    kind: OptionKind,
    steps: usize,
    up: T,
    down: T,
    volatility: Option<T>,
}

impl<T: Float> ModelParameters<T> {
    /// Creates parameters for a contract with a degenerate (zero-step,
    /// unit-factor) lattice.
    ///
    /// # Arguments
    /// * `spot` - Initial underlying price (S0)
    /// * `strike` - Strike price (K)
    /// * `maturity` - Time to maturity in years (T)
    /// * `rate` - Continuously compounded risk-free rate (r)
    /// * `kind` - Call or put
    pub fn new(spot: T, strike: T, maturity: T, rate: T, kind: OptionKind) -> Self {
        Self {
            spot,
            strike,
            maturity,
            rate,
            kind,
            steps: 0,
            up: T::one(),
            down: T::one(),
            volatility: None,
        }
    }

    /// Creates parameters on a Cox-Ross-Rubinstein lattice of `steps` steps.
    ///
    /// Shorthand for `new(..).with_volatility(volatility, steps)`.
    pub fn from_volatility(
        spot: T,
        strike: T,
        maturity: T,
        rate: T,
        volatility: T,
        steps: usize,
        kind: OptionKind,
    ) -> Self {
        Self::new(spot, strike, maturity, rate, kind).with_volatility(volatility, steps)
    }

    /// Attaches an explicit lattice shape.
    ///
    /// Callers supply `down = 1 / up` for a recombining tree.
    pub fn with_lattice(mut self, steps: usize, up: T, down: T) -> Self {
        self.steps = steps;
        self.up = up;
        self.down = down;
        self.volatility = None;
        self
    }

    /// Attaches a Cox-Ross-Rubinstein lattice: `u = exp(sigma * sqrt(dt))`,
    /// `d = 1 / u`.
    ///
    /// With `steps == 0` the factors are built from a single step spanning
    /// the whole maturity; they are never used for induction in that case.
    pub fn with_volatility(mut self, volatility: T, steps: usize) -> Self {
        let dt = if steps == 0 {
            self.maturity
        } else {
            self.maturity / steps_as(steps)
        };
        let up = (volatility * dt.sqrt()).exp();
        self.steps = steps;
        self.up = up;
        self.down = up.recip();
        self.volatility = Some(volatility);
        self
    }

    /// Rebuilds the same contract on a lattice with `steps` steps.
    ///
    /// Volatility-built parameters get freshly scaled factors; explicit
    /// factors are kept unchanged.
    pub fn with_steps(self, steps: usize) -> Self {
        match self.volatility {
            Some(volatility) => self.with_volatility(volatility, steps),
            None => Self { steps, ..self },
        }
    }

    /// Returns the initial underlying price (S0).
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the strike price (K).
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Returns the time to maturity (T).
    #[inline]
    pub fn maturity(&self) -> T {
        self.maturity
    }

    /// Returns the risk-free rate (r).
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the option kind.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Returns the number of lattice steps (N).
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the up factor (u).
    #[inline]
    pub fn up(&self) -> T {
        self.up
    }

    /// Returns the down factor (d).
    #[inline]
    pub fn down(&self) -> T {
        self.down
    }

    /// Returns the volatility the factors were built from, if any.
    #[inline]
    pub fn volatility(&self) -> Option<T> {
        self.volatility
    }

    /// Returns the time step `T / N` (infinite when `N == 0`).
    #[inline]
    pub fn time_step(&self) -> T {
        self.maturity / steps_as(self.steps)
    }
}

#[inline]
fn steps_as<T: Float>(steps: usize) -> T {
    T::from(steps).unwrap_or_else(T::nan)
}
