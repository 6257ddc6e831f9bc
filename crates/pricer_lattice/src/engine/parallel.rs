//! Layer-wise backward induction with a parallel map per layer.
//!
//! Nodes of one layer read only the previous (child) layer, so each layer
//! is written into a second buffer and the two are swapped afterwards.
//! Layers themselves stay strictly sequential.

use num_traits::Float;
use pricer_core::types::ModelParameters;
use rayon::prelude::*;
use tracing::trace;

use super::{ensure_finite, terminal_value, Calibration};
use crate::error::LatticeError;
use crate::geometry::{fill_node_prices, node_price, GeometryStrategy};
use crate::policy::PayoffPolicy;

/// Smallest number of nodes handed to a single rayon task.
///
/// Narrow layers near the root run effectively sequentially.
pub(crate) const MIN_NODES_PER_TASK: usize = 256;

pub(super) fn backward_induction<T>(
    params: &ModelParameters<T>,
    policy: &PayoffPolicy<T>,
    calibration: &Calibration<T>,
) -> Result<T, LatticeError>
where
    T: Float + Send + Sync,
{
    let steps = params.steps();
    let (spot, strike) = (params.spot(), params.strike());
    let (up, down) = (params.up(), params.down());

    let mut prices = Vec::with_capacity(steps + 1);
    fill_node_prices(spot, up, down, steps, GeometryStrategy::Direct, &mut prices);
    ensure_finite(&prices, steps)?;

    let boundary = policy.knock_out_boundary(spot, up, down, steps);
    let mut current: Vec<T> = prices
        .par_iter()
        .enumerate()
        .with_min_len(MIN_NODES_PER_TASK)
        .map(|(node, &price)| terminal_value(policy, node, boundary, price, strike))
        .collect();
    let mut next = vec![T::zero(); steps + 1];

    for layer in (0..steps).rev() {
        let children = &current;
        let boundary = policy.knock_out_boundary(spot, up, down, layer);
        let overflowed = next[..=layer]
            .par_iter_mut()
            .enumerate()
            .with_min_len(MIN_NODES_PER_TASK)
            .map(|(node, slot)| {
                let node_spot = node_price(spot, up, down, layer, node);
                *slot = if node >= boundary {
                    T::zero()
                } else {
                    let (down_value, up_value) = (children[node], children[node + 1]);
                    policy.live_value(node_spot, strike, || {
                        calibration.continuation(up_value, down_value)
                    })
                };
                !node_spot.is_finite()
            })
            .reduce(|| false, |a, b| a || b);

        if overflowed {
            return Err(LatticeError::NumericOverflow { layer });
        }
        std::mem::swap(&mut current, &mut next);
        trace!(layer, nodes = layer + 1, boundary, "parallel layer folded");
    }

    Ok(current[0])
}
