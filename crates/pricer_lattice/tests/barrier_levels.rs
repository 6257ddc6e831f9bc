//! Up-and-out barriers placed exactly on lattice nodes.
//!
//! The knock-out test `S >= H` is discontinuous, so a barrier equal to a
//! node price must be judged identically by every induction strategy, no
//! matter which price formula produced the level.

use approx::assert_relative_eq;
use pricer_core::types::{BarrierSpec, ModelParameters, OptionKind};
use pricer_lattice::geometry::{node_prices, GeometryStrategy};
use pricer_lattice::{BinomialEngine, InductionStrategy, PayoffPolicy};

const UP: f64 = 1.1;
const DOWN: f64 = 1.0 / 1.1;

fn lattice(steps: usize) -> ModelParameters<f64> {
    ModelParameters::new(100.0, 100.0, 1.0, 0.06, OptionKind::Call).with_lattice(steps, UP, DOWN)
}

fn values_by_strategy(params: &ModelParameters<f64>, level: f64) -> Vec<f64> {
    let policy = PayoffPolicy::up_and_out(OptionKind::Call, BarrierSpec::up_and_out(level));
    InductionStrategy::ALL
        .iter()
        .map(|&strategy| BinomialEngine::new(strategy).price(params, &policy).unwrap())
        .collect()
}

fn assert_strategies_agree(steps: usize, geometry: GeometryStrategy) {
    let params = lattice(steps);
    for layer in 1..=steps {
        for level in node_prices(100.0, UP, DOWN, layer, geometry) {
            if level <= 100.0 {
                continue;
            }
            let values = values_by_strategy(&params, level);
            for value in &values[1..] {
                assert_relative_eq!(*value, values[0], max_relative = 1e-9, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn test_barrier_on_incremental_node_prices() {
    for steps in 3..=30 {
        assert_strategies_agree(steps, GeometryStrategy::Incremental);
    }
}

#[test]
fn test_barrier_on_direct_node_prices() {
    for steps in 3..=30 {
        assert_strategies_agree(steps, GeometryStrategy::Direct);
    }
}

#[test]
fn test_barrier_on_incremental_u_squared() {
    // S0 * u^2 built incrementally from S0 * d^4 on a four-step lattice.
    let params = lattice(4);
    let level = node_prices(100.0, UP, DOWN, 4, GeometryStrategy::Incremental)[3];
    let values = values_by_strategy(&params, level);
    for value in &values[1..] {
        assert_relative_eq!(*value, values[0], max_relative = 1e-9, epsilon = 1e-12);
    }
}
