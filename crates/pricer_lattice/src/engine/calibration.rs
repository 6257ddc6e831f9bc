//! Risk-neutral calibration and input validation.
//!
//! Derived constants are computed once per valuation:
//! `dt = T / N`, `q = (exp(r dt) - d) / (u - d)`, `disc = exp(-r dt)`.
//! A lattice is only arbitrage-free when `0 < q < 1`.

use num_traits::Float;
use pricer_core::types::ModelParameters;

use crate::error::LatticeError;
use crate::policy::PayoffPolicy;

/// Per-valuation constants of a calibrated lattice.
///
/// # Examples
/// ```
/// use pricer_core::types::{ModelParameters, OptionKind};
/// use pricer_lattice::Calibration;
///
/// let params = ModelParameters::new(100.0_f64, 100.0, 1.0, 0.06, OptionKind::Call)
///     .with_lattice(3, 1.1, 1.0 / 1.1);
/// let calibration = Calibration::from_parameters(&params).unwrap();
///
/// assert!(calibration.probability() > 0.0 && calibration.probability() < 1.0);
/// assert!((calibration.discount() - (-0.02_f64).exp()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration<T: Float> {
    dt: T,
    probability: T,
    discount: T,
}

impl<T: Float> Calibration<T> {
    /// Derives `dt`, `q`, and `disc` from lattice parameters.
    ///
    /// # Errors
    /// `InvalidCalibration` when `q` falls outside `(0, 1)` (including NaN,
    /// e.g. for a zero-step lattice).
    pub fn from_parameters(params: &ModelParameters<T>) -> Result<Self, LatticeError> {
        let dt = params.time_step();
        let (up, down) = (params.up(), params.down());
        let growth = (params.rate() * dt).exp();
        let probability = (growth - down) / (up - down);

        if !(probability > T::zero() && probability < T::one()) {
            return Err(LatticeError::InvalidCalibration {
                up: to_f64(up),
                down: to_f64(down),
                probability: to_f64(probability),
            });
        }

        Ok(Self {
            dt,
            probability,
            discount: (-params.rate() * dt).exp(),
        })
    }

    /// Returns the time step (dt).
    #[inline]
    pub fn dt(&self) -> T {
        self.dt
    }

    /// Returns the risk-neutral up probability (q).
    #[inline]
    pub fn probability(&self) -> T {
        self.probability
    }

    /// Returns the one-step discount factor (disc).
    #[inline]
    pub fn discount(&self) -> T {
        self.discount
    }

    /// Discounted expectation of the two children of a node:
    /// `disc * (q * up_value + (1 - q) * down_value)`.
    #[inline]
    pub fn continuation(&self, up_value: T, down_value: T) -> T {
        self.discount
            * (self.probability * up_value + (T::one() - self.probability) * down_value)
    }
}

/// Fail-fast checks run before any layer is built.
pub(crate) fn validate_inputs<T: Float>(
    params: &ModelParameters<T>,
    policy: &PayoffPolicy<T>,
) -> Result<(), LatticeError> {
    let zero = T::zero();
    let positive = |value: T| value.is_finite() && value > zero;

    if !positive(params.spot()) {
        return Err(LatticeError::geometry(format!(
            "spot must be positive and finite, got {}",
            to_f64(params.spot())
        )));
    }
    if !positive(params.strike()) {
        return Err(LatticeError::geometry(format!(
            "strike must be positive and finite, got {}",
            to_f64(params.strike())
        )));
    }
    if !positive(params.maturity()) {
        return Err(LatticeError::geometry(format!(
            "maturity must be positive and finite, got {}",
            to_f64(params.maturity())
        )));
    }
    if !params.rate().is_finite() {
        return Err(LatticeError::geometry(format!(
            "rate must be finite, got {}",
            to_f64(params.rate())
        )));
    }
    if let Some(barrier) = policy.barrier() {
        if !positive(barrier.level()) {
            return Err(LatticeError::geometry(format!(
                "barrier level must be positive and finite, got {}",
                to_f64(barrier.level())
            )));
        }
    }

    let (up, down) = (params.up(), params.down());
    let well_ordered = up.is_finite() && down > zero && up > T::one() && up > down;
    if !well_ordered {
        return Err(LatticeError::InvalidCalibration {
            up: to_f64(up),
            down: to_f64(down),
            probability: f64::NAN,
        });
    }

    Ok(())
}

/// Rejects lattices whose extreme terminal nodes overflow or underflow.
///
/// Every other node lies between `S0 * d^N` and `S0 * u^N`, so checking
/// the two corners covers the whole lattice.
pub(crate) fn check_extreme_nodes<T: Float>(
    params: &ModelParameters<T>,
) -> Result<(), LatticeError> {
    let steps = params.steps();
    let overflow = LatticeError::NumericOverflow { layer: steps };
    let exponent = i32::try_from(steps).map_err(|_| overflow.clone())?;

    let top = params.spot() * params.up().powi(exponent);
    let bottom = params.spot() * params.down().powi(exponent);
    if !top.is_finite() || !bottom.is_finite() || bottom <= T::zero() {
        return Err(overflow);
    }
    Ok(())
}

#[inline]
pub(crate) fn to_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::{BarrierSpec, OptionKind};

    fn reference() -> ModelParameters<f64> {
        ModelParameters::new(100.0, 100.0, 1.0, 0.06, OptionKind::Call)
            .with_lattice(3, 1.1, 1.0 / 1.1)
    }

    #[test]
    fn test_reference_calibration() {
        let calibration = Calibration::from_parameters(&reference()).unwrap();
        let d = 1.0 / 1.1;
        let expected_q = ((0.02_f64).exp() - d) / (1.1 - d);
        assert_relative_eq!(calibration.dt(), 1.0 / 3.0);
        assert_relative_eq!(calibration.probability(), expected_q, epsilon = 1e-15);
        assert_relative_eq!(calibration.discount(), (-0.02_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_continuation_formula() {
        let calibration = Calibration::from_parameters(&reference()).unwrap();
        let q = calibration.probability();
        let expected = calibration.discount() * (q * 10.0 + (1.0 - q) * 4.0);
        assert_relative_eq!(calibration.continuation(10.0, 4.0), expected);
    }

    #[test]
    fn test_probability_above_one_is_rejected() {
        // exp(r dt) > u: drift outruns the up move.
        let params = ModelParameters::new(100.0, 100.0, 1.0, 0.5, OptionKind::Call)
            .with_lattice(1, 1.1, 1.0 / 1.1);
        let err = Calibration::from_parameters(&params).unwrap_err();
        match err {
            LatticeError::InvalidCalibration { probability, .. } => assert!(probability > 1.0),
            other => panic!("Expected InvalidCalibration, got {:?}", other),
        }
    }

    #[test]
    fn test_probability_below_zero_is_rejected() {
        let params = ModelParameters::new(100.0, 100.0, 1.0, -0.5, OptionKind::Call)
            .with_lattice(1, 1.1, 1.0 / 1.1);
        assert!(matches!(
            Calibration::from_parameters(&params),
            Err(LatticeError::InvalidCalibration { .. })
        ));
    }

    #[test]
    fn test_zero_steps_cannot_calibrate() {
        let params = reference().with_lattice(0, 1.1, 1.0 / 1.1);
        assert!(Calibration::from_parameters(&params).is_err());
    }

    #[test]
    fn test_validate_accepts_reference() {
        let policy = PayoffPolicy::european(OptionKind::Call);
        assert!(validate_inputs(&reference(), &policy).is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_factors() {
        let params = reference().with_lattice(3, 1.0 / 1.1, 1.1);
        let policy = PayoffPolicy::european(OptionKind::Call);
        assert!(matches!(
            validate_inputs(&params, &policy),
            Err(LatticeError::InvalidCalibration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_up_not_above_one() {
        let params = reference().with_lattice(3, 1.0, 0.9);
        let policy = PayoffPolicy::european(OptionKind::Call);
        assert!(matches!(
            validate_inputs(&params, &policy),
            Err(LatticeError::InvalidCalibration { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_geometry() {
        let policy = PayoffPolicy::european(OptionKind::Call);
        let bad = [
            ModelParameters::new(0.0, 100.0, 1.0, 0.06, OptionKind::Call),
            ModelParameters::new(100.0, -1.0, 1.0, 0.06, OptionKind::Call),
            ModelParameters::new(100.0, 100.0, 0.0, 0.06, OptionKind::Call),
            ModelParameters::new(100.0, 100.0, 1.0, f64::NAN, OptionKind::Call),
            ModelParameters::new(f64::INFINITY, 100.0, 1.0, 0.06, OptionKind::Call),
        ];
        for params in bad {
            let params = params.with_lattice(3, 1.1, 1.0 / 1.1);
            assert!(matches!(
                validate_inputs(&params, &policy),
                Err(LatticeError::InvalidGeometry { .. })
            ));
        }
    }

    #[test]
    fn test_validate_rejects_non_positive_barrier() {
        let policy = PayoffPolicy::up_and_out(OptionKind::Call, BarrierSpec::up_and_out(0.0));
        assert!(matches!(
            validate_inputs(&reference(), &policy),
            Err(LatticeError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_extreme_nodes_overflow() {
        let params = reference().with_lattice(5000, 1.5, 1.0 / 1.5);
        assert_eq!(
            check_extreme_nodes(&params),
            Err(LatticeError::NumericOverflow { layer: 5000 })
        );
    }

    #[test]
    fn test_extreme_nodes_within_range() {
        let params = reference().with_volatility(0.2, 10_000);
        assert!(check_extreme_nodes(&params).is_ok());
    }
}
