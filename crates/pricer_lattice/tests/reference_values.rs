//! Reference valuations on the three-step lattice
//! S0 = 100, K = 100, T = 1, r = 0.06, u = 1.1, d = 1/1.1.
//!
//! Every strategy must reproduce each value to 1e-6.

use approx::assert_relative_eq;
use pricer_core::traits::priceable::Priceable;
use pricer_core::types::{BarrierSpec, ModelParameters, OptionKind, PricingError};
use pricer_lattice::{
    price, BinomialEngine, InductionStrategy, LatticeError, LatticeOption, PayoffPolicy,
};

const EUROPEAN_CALL: f64 = 10.145735799928817;
const AMERICAN_PUT: f64 = 4.654588754602527;
const UP_AND_OUT_CALL: f64 = 4.00026736854323;

fn reference(kind: OptionKind) -> ModelParameters<f64> {
    ModelParameters::new(100.0, 100.0, 1.0, 0.06, kind).with_lattice(3, 1.1, 1.0 / 1.1)
}

#[test]
fn test_european_call_reference() {
    let params = reference(OptionKind::Call);
    let policy = PayoffPolicy::european(OptionKind::Call);
    for strategy in InductionStrategy::ALL {
        let value = BinomialEngine::new(strategy).price(&params, &policy).unwrap();
        assert_relative_eq!(value, EUROPEAN_CALL, epsilon = 1e-6);
    }
}

#[test]
fn test_american_put_reference() {
    let params = reference(OptionKind::Put);
    let policy = PayoffPolicy::american(OptionKind::Put);
    for strategy in InductionStrategy::ALL {
        let value = BinomialEngine::new(strategy).price(&params, &policy).unwrap();
        assert_relative_eq!(value, AMERICAN_PUT, epsilon = 1e-6);
    }
}

#[test]
fn test_up_and_out_call_reference() {
    let params = reference(OptionKind::Call);
    let policy = PayoffPolicy::up_and_out(OptionKind::Call, BarrierSpec::up_and_out(125.0));
    for strategy in InductionStrategy::ALL {
        let value = BinomialEngine::new(strategy).price(&params, &policy).unwrap();
        assert_relative_eq!(value, UP_AND_OUT_CALL, epsilon = 1e-6);
    }
}

#[test]
fn test_american_put_exceeds_european_put() {
    let params = reference(OptionKind::Put);
    let european = price(&params, &PayoffPolicy::european(OptionKind::Put)).unwrap();
    let american = price(&params, &PayoffPolicy::american(OptionKind::Put)).unwrap();
    assert!(american > european);
}

#[test]
fn test_barrier_at_spot_is_worthless() {
    let params = reference(OptionKind::Call);
    let policy = PayoffPolicy::up_and_out(OptionKind::Call, BarrierSpec::up_and_out(100.0));
    assert_eq!(price(&params, &policy).unwrap(), 0.0);
}

#[test]
fn test_unreachable_barrier_matches_european() {
    let params = reference(OptionKind::Call);
    let policy = PayoffPolicy::up_and_out(OptionKind::Call, BarrierSpec::up_and_out(1.0e6));
    assert_relative_eq!(price(&params, &policy).unwrap(), EUROPEAN_CALL, epsilon = 1e-12);
}

#[test]
fn test_zero_steps_is_intrinsic() {
    let params = ModelParameters::new(90.0, 100.0, 1.0, 0.06, OptionKind::Put)
        .with_lattice(0, 1.1, 1.0 / 1.1);
    for strategy in InductionStrategy::ALL {
        let value = BinomialEngine::new(strategy)
            .price(&params, &PayoffPolicy::european(OptionKind::Put))
            .unwrap();
        assert_eq!(value, 10.0);
    }
}

#[test]
fn test_arbitrage_lattice_rejected() {
    // exp(0.5) > 1.1: the up move cannot keep pace with the risk-free drift.
    let params = ModelParameters::new(100.0, 100.0, 1.0, 0.5, OptionKind::Call)
        .with_lattice(1, 1.1, 1.0 / 1.1);
    let result = price(&params, &PayoffPolicy::european(OptionKind::Call));
    assert!(matches!(result, Err(LatticeError::InvalidCalibration { .. })));
}

#[test]
fn test_negative_strike_rejected() {
    let params = ModelParameters::new(100.0, -5.0, 1.0, 0.06, OptionKind::Call)
        .with_lattice(3, 1.1, 1.0 / 1.1);
    let result = price(&params, &PayoffPolicy::european(OptionKind::Call));
    assert!(matches!(result, Err(LatticeError::InvalidGeometry { .. })));
}

#[test]
fn test_priceable_surface() {
    let option = LatticeOption::new(
        reference(OptionKind::Put),
        PayoffPolicy::american(OptionKind::Put),
    );
    assert_relative_eq!(option.price().unwrap(), AMERICAN_PUT, epsilon = 1e-6);

    let overflowing = LatticeOption::new(
        reference(OptionKind::Call).with_lattice(3000, 2.0, 0.5),
        PayoffPolicy::european(OptionKind::Call),
    );
    assert!(matches!(
        overflowing.price(),
        Err(PricingError::NumericalInstability(_))
    ));
}
