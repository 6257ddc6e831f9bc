//! Layer-at-a-time backward induction.
//!
//! Each layer's prices are computed in full by direct exponentiation, then
//! the layer's values are produced in one pass by pairing every child with
//! its up neighbour (`values.windows(2)`). Prices, values, and the scratch
//! layer are three buffers sized for the terminal layer and reused down to
//! the root.

use num_traits::Float;
use pricer_core::types::ModelParameters;
use tracing::trace;

use super::{ensure_finite, terminal_value, Calibration};
use crate::error::LatticeError;
use crate::geometry::{fill_node_prices, GeometryStrategy};
use crate::policy::PayoffPolicy;

pub(super) fn backward_induction<T: Float>(
    params: &ModelParameters<T>,
    policy: &PayoffPolicy<T>,
    calibration: &Calibration<T>,
) -> Result<T, LatticeError> {
    let steps = params.steps();
    let (spot, strike) = (params.spot(), params.strike());
    let (up, down) = (params.up(), params.down());

    let mut prices = Vec::with_capacity(steps + 1);
    fill_node_prices(spot, up, down, steps, GeometryStrategy::Direct, &mut prices);
    ensure_finite(&prices, steps)?;

    let boundary = policy.knock_out_boundary(spot, up, down, steps);
    let mut values: Vec<T> = prices
        .iter()
        .enumerate()
        .map(|(node, &price)| terminal_value(policy, node, boundary, price, strike))
        .collect();
    let mut next: Vec<T> = Vec::with_capacity(steps);

    for layer in (0..steps).rev() {
        fill_node_prices(spot, up, down, layer, GeometryStrategy::Direct, &mut prices);
        ensure_finite(&prices, layer)?;
        let boundary = policy.knock_out_boundary(spot, up, down, layer);

        next.clear();
        next.extend(
            prices
                .iter()
                .zip(values.windows(2))
                .enumerate()
                .map(|(node, (&node_spot, children))| {
                    if node >= boundary {
                        return T::zero();
                    }
                    let (down_value, up_value) = (children[0], children[1]);
                    policy.live_value(node_spot, strike, || {
                        calibration.continuation(up_value, down_value)
                    })
                }),
        );
        std::mem::swap(&mut values, &mut next);
        trace!(layer, nodes = layer + 1, boundary, "layer-wise layer folded");
    }

    Ok(values[0])
}
