//! Property-based checks over randomly drawn CRR lattices.
//!
//! Drawn parameters keep `r * sqrt(dt) < sigma`, so every lattice is
//! arbitrage-free and calibration always succeeds.

use approx::assert_relative_eq;
use pricer_core::types::{BarrierSpec, ModelParameters, OptionKind};
use pricer_lattice::geometry::{node_prices, GeometryStrategy};
use pricer_lattice::{BinomialEngine, InductionStrategy, PayoffPolicy};
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = OptionKind> {
    prop_oneof![Just(OptionKind::Call), Just(OptionKind::Put)]
}

fn geometry_strategy() -> impl Strategy<Value = GeometryStrategy> {
    prop_oneof![
        Just(GeometryStrategy::Incremental),
        Just(GeometryStrategy::Direct)
    ]
}

fn params_strategy() -> impl Strategy<Value = ModelParameters<f64>> {
    (
        50.0..150.0_f64,
        50.0..150.0_f64,
        0.25..2.0_f64,
        0.0..0.1_f64,
        0.15..0.5_f64,
        1usize..200,
        kind_strategy(),
    )
        .prop_map(|(spot, strike, maturity, rate, volatility, steps, kind)| {
            ModelParameters::new(spot, strike, maturity, rate, kind)
                .with_volatility(volatility, steps)
        })
}

fn value(
    params: &ModelParameters<f64>,
    policy: &PayoffPolicy<f64>,
    strategy: InductionStrategy,
) -> f64 {
    BinomialEngine::new(strategy).price(params, policy).unwrap()
}

fn assert_strategies_agree(params: &ModelParameters<f64>, policy: &PayoffPolicy<f64>) {
    let reference = value(params, policy, InductionStrategy::LayerWise);
    for strategy in [InductionStrategy::NodeWise, InductionStrategy::ParallelLayerWise] {
        let other = value(params, policy, strategy);
        assert_relative_eq!(other, reference, max_relative = 1e-9, epsilon = 1e-12);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_strategies_agree(params in params_strategy(), barrier_scale in 1.05..2.0_f64) {
        let kind = params.kind();
        let barrier = BarrierSpec::up_and_out(params.spot() * barrier_scale);
        for policy in [
            PayoffPolicy::european(kind),
            PayoffPolicy::american(kind),
            PayoffPolicy::up_and_out(kind, barrier),
        ] {
            assert_strategies_agree(&params, &policy);
        }
    }

    #[test]
    fn test_strategies_agree_with_barrier_on_node(
        params in params_strategy(),
        layer_pick in 0.0..1.0_f64,
        node_pick in 0.0..1.0_f64,
        geometry in geometry_strategy(),
    ) {
        let steps = params.steps();
        let layer = ((layer_pick * steps as f64) as usize).min(steps - 1) + 1;
        let node = ((node_pick * (layer + 1) as f64) as usize).min(layer);
        let level = node_prices(params.spot(), params.up(), params.down(), layer, geometry)[node];

        let policy = PayoffPolicy::up_and_out(params.kind(), BarrierSpec::up_and_out(level));
        assert_strategies_agree(&params, &policy);
    }

    #[test]
    fn test_american_dominates_european(params in params_strategy()) {
        let kind = params.kind();
        let european = value(&params, &PayoffPolicy::european(kind), InductionStrategy::LayerWise);
        let american = value(&params, &PayoffPolicy::american(kind), InductionStrategy::LayerWise);
        prop_assert!(
            american >= european - 1e-12,
            "american {} < european {}",
            american,
            european
        );
        prop_assert!(european >= 0.0);
    }

    #[test]
    fn test_knock_out_never_adds_value(
        params in params_strategy(),
        barrier_scale in 1.05..2.0_f64,
    ) {
        let barrier = BarrierSpec::up_and_out(params.spot() * barrier_scale);
        let vanilla = value(
            &params,
            &PayoffPolicy::european(OptionKind::Call),
            InductionStrategy::LayerWise,
        );
        let knocked = value(
            &params,
            &PayoffPolicy::up_and_out(OptionKind::Call, barrier),
            InductionStrategy::LayerWise,
        );
        prop_assert!(knocked >= 0.0);
        prop_assert!(knocked <= vanilla + 1e-12, "barrier {} > vanilla {}", knocked, vanilla);
    }

    #[test]
    fn test_european_put_call_parity(params in params_strategy()) {
        let call = value(
            &params,
            &PayoffPolicy::european(OptionKind::Call),
            InductionStrategy::NodeWise,
        );
        let put = value(
            &params,
            &PayoffPolicy::european(OptionKind::Put),
            InductionStrategy::NodeWise,
        );
        let discount = (-params.rate() * params.maturity()).exp();
        let forward = params.spot() - params.strike() * discount;
        assert_relative_eq!(call - put, forward, epsilon = 1e-8 * params.spot());
    }

    #[test]
    fn test_american_call_without_dividends_is_european(params in params_strategy()) {
        let european = value(
            &params,
            &PayoffPolicy::european(OptionKind::Call),
            InductionStrategy::LayerWise,
        );
        let american = value(
            &params,
            &PayoffPolicy::american(OptionKind::Call),
            InductionStrategy::LayerWise,
        );
        assert_relative_eq!(american, european, max_relative = 1e-9, epsilon = 1e-12);
    }
}
