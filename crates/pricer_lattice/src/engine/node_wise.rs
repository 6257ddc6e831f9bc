//! Node-by-node backward induction.
//!
//! Prices are generated incrementally inside the node loop and the value
//! array is truncated by one after each layer, so node `j` of layer `i`
//! overwrites its own down child once both children have been read.

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
    let ratio = up / down;

    let mut values = Vec::with_capacity(steps + 1);
    fill_node_prices(spot, up, down, steps, GeometryStrategy::Incremental, &mut values);
    ensure_finite(&values, steps)?;
    let boundary = policy.knock_out_boundary(spot, up, down, steps);
    for (node, value) in values.iter_mut().enumerate() {
        *value = terminal_value(policy, node, boundary, *value, strike);
    }

    for layer in (0..steps).rev() {
        let boundary = policy.knock_out_boundary(spot, up, down, layer);
        let mut node_spot = spot * down.powi(layer as i32);
        for node in 0..=layer {
            if !node_spot.is_finite() {
                return Err(LatticeError::NumericOverflow { layer });
            }
            values[node] = if node >= boundary {
                T::zero()
            } else {
                let (down_value, up_value) = (values[node], values[node + 1]);
                policy.live_value(node_spot, strike, || {
                    calibration.continuation(up_value, down_value)
                })
            };
            node_spot = node_spot * ratio;
        }
        values.truncate(layer + 1);
        trace!(layer, nodes = layer + 1, boundary, "node-wise layer folded");
    }

    Ok(values[0])
}
