//! Asset-price nodes of a recombining binomial lattice.
//!
//! Node `j` of layer `i` (0-indexed, lowest to highest) carries the price
//! `S0 * u^j * d^(i - j)`. A layer therefore holds `i + 1` prices,
//! increasing in `j` whenever `u > d`.
//!
//! Two evaluation strategies are provided and agree to floating-point
//! tolerance:
//! - [`GeometryStrategy::Incremental`]: start from `S0 * d^i` and multiply
//!   by `u / d` once per node
//! - [`GeometryStrategy::Direct`]: evaluate `S0 * d^(i - j) * u^j` per node
//!
//! Pathological inputs (e.g. `u^N` overflowing) yield `Inf`/`NaN` here;
//! detection is the engine's job.

use num_traits::Float;

/// How node prices within a layer are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeometryStrategy {
    /// Repeated multiplication by `u / d`.
    #[default]
    Incremental,
    /// Independent exponentiation per node.
    Direct,
}

/// Price of node `node` in layer `layer`.
///
/// # Examples
/// ```
/// use pricer_lattice::geometry::node_price;
///
/// let s = node_price(100.0_f64, 1.1, 1.0 / 1.1, 3, 3);
/// assert!((s - 133.1).abs() < 1e-10);
/// ```
#[inline]
pub fn node_price<T: Float>(spot: T, up: T, down: T, layer: usize, node: usize) -> T {
    debug_assert!(node <= layer);
    spot * down.powi((layer - node) as i32) * up.powi(node as i32)
}

/// Writes the `layer + 1` node prices of `layer` into `out`, reusing its
/// allocation.
pub fn fill_node_prices<T: Float>(
    spot: T,
    up: T,
    down: T,
    layer: usize,
    strategy: GeometryStrategy,
    out: &mut Vec<T>,
) {
    out.clear();
    match strategy {
        GeometryStrategy::Incremental => {
            let ratio = up / down;
            let mut price = spot * down.powi(layer as i32);
            for _ in 0..=layer {
                out.push(price);
                price = price * ratio;
            }
        }
        GeometryStrategy::Direct => {
            out.extend((0..=layer).map(|j| node_price(spot, up, down, layer, j)));
        }
    }
}

/// Ordered node prices of `layer` (length `layer + 1`).
///
/// # Examples
/// ```
/// use pricer_lattice::geometry::{node_prices, GeometryStrategy};
///
/// let layer = node_prices(100.0_f64, 1.1, 1.0 / 1.1, 2, GeometryStrategy::Direct);
/// assert_eq!(layer.len(), 3);
/// assert!((layer[1] - 100.0).abs() < 1e-12);
/// ```
pub fn node_prices<T: Float>(
    spot: T,
    up: T,
    down: T,
    layer: usize,
    strategy: GeometryStrategy,
) -> Vec<T> {
    let mut out = Vec::with_capacity(layer + 1);
    fill_node_prices(spot, up, down, layer, strategy, &mut out);
    out
}
