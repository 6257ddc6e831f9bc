//! Exercise and knock-out policies applied during backward induction.
//!
//! A [`PayoffPolicy`] supplies the terminal payoff at maturity and the
//! per-node transformation applied to the discounted continuation value:
//!
//! | Policy | Terminal | Intermediate node |
//! |---|---|---|
//! | European | `payoff(S)` | `hold` |
//! | American | `payoff(S)` | `max(hold, payoff(S))` |
//! | Barrier (up-and-out) | `0` if `S >= H`, else `payoff(S)` | `0` if `S >= H`, else `hold` |
//!
//! The policy is chosen once per valuation and never changes mid-lattice.
//!
//! Knock-out is discontinuous in `S`, so the engine does not test it on the
//! node prices each strategy computes for itself. It asks
//! [`PayoffPolicy::knock_out_boundary`] once per layer instead, which decides
//! on directly exponentiated prices, and every strategy then agrees on which
//! nodes are dead.

use num_traits::Float;
use pricer_core::types::{BarrierSpec, OptionKind};

use crate::geometry::node_price;

/// Exercise/knock-out policy for a lattice valuation.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `Dual64`)
///
/// # Examples
/// ```
/// use pricer_core::types::{BarrierSpec, OptionKind};
/// use pricer_lattice::PayoffPolicy;
///
/// let american = PayoffPolicy::american(OptionKind::Put);
/// // Early exercise beats a smaller continuation value.
/// assert_eq!(american.node_value(80.0_f64, 100.0, || 15.0), 20.0);
///
/// let barrier = PayoffPolicy::up_and_out(OptionKind::Call, BarrierSpec::up_and_out(125.0));
/// assert_eq!(barrier.terminal_payoff(133.1_f64, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PayoffPolicy<T: Float> {
    /// Exercise at maturity only.
    European {
        /// Call or put
        kind: OptionKind,
    },
    /// Exercise at any node.
    American {
        /// Call or put
        kind: OptionKind,
    },
    /// European exercise, worthless once the barrier is touched.
    Barrier {
        /// Call or put
        kind: OptionKind,
        /// Knock-out barrier
        barrier: BarrierSpec<T>,
    },
}

impl<T: Float> PayoffPolicy<T> {
    /// Creates a European policy.
    #[inline]
    pub fn european(kind: OptionKind) -> Self {
        PayoffPolicy::European { kind }
    }

    /// Creates an American (early-exercise) policy.
    #[inline]
    pub fn american(kind: OptionKind) -> Self {
        PayoffPolicy::American { kind }
    }

    /// Creates a knock-out barrier policy.
    #[inline]
    pub fn up_and_out(kind: OptionKind, barrier: BarrierSpec<T>) -> Self {
        PayoffPolicy::Barrier { kind, barrier }
    }

    /// Returns the option kind.
    #[inline]
    pub fn kind(&self) -> OptionKind {
        match self {
            PayoffPolicy::European { kind }
            | PayoffPolicy::American { kind }
            | PayoffPolicy::Barrier { kind, .. } => *kind,
        }
    }

    /// Returns the barrier, if this is a barrier policy.
    #[inline]
    pub fn barrier(&self) -> Option<&BarrierSpec<T>> {
        match self {
            PayoffPolicy::Barrier { barrier, .. } => Some(barrier),
            _ => None,
        }
    }

    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            PayoffPolicy::European { .. } => "european",
            PayoffPolicy::American { .. } => "american",
            PayoffPolicy::Barrier { .. } => "up-and-out",
        }
    }

    /// Returns whether a node at price `spot` is knocked out.
    #[inline]
    pub fn is_knocked_out(&self, spot: T) -> bool {
        match self {
            PayoffPolicy::Barrier { barrier, .. } => barrier.is_breached(spot),
            _ => false,
        }
    }

    /// Contract value at maturity for a node at price `spot`.
    #[inline]
    pub fn terminal_payoff(&self, spot: T, strike: T) -> T {
        if self.is_knocked_out(spot) {
            return T::zero();
        }
        self.kind().payoff(spot, strike)
    }

    /// Contract value at an intermediate node.
    ///
    /// `continuation` yields the discounted expectation of the two child
    /// nodes. It is not called for knocked-out nodes.
    #[inline]
    pub fn node_value<F>(&self, spot: T, strike: T, continuation: F) -> T
    where
        F: FnOnce() -> T,
    {
        if self.is_knocked_out(spot) {
            T::zero()
        } else {
            self.live_value(spot, strike, continuation)
        }
    }

    /// Contract value at an intermediate node already known to be alive.
    #[inline]
    pub fn live_value<F>(&self, spot: T, strike: T, continuation: F) -> T
    where
        F: FnOnce() -> T,
    {
        match self {
            PayoffPolicy::American { kind } => continuation().max(kind.payoff(spot, strike)),
            PayoffPolicy::European { .. } | PayoffPolicy::Barrier { .. } => continuation(),
        }
    }

    /// Index of the lowest knocked-out node of `layer`, or `layer + 1` when
    /// every node is alive.
    ///
    /// Scans down from the top node on `S0 * d^(i - j) * u^j`; nodes at or
    /// above the returned index are dead.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::{BarrierSpec, OptionKind};
    /// use pricer_lattice::PayoffPolicy;
    ///
    /// let policy = PayoffPolicy::up_and_out(OptionKind::Call, BarrierSpec::up_and_out(125.0));
    /// // Layer 3 prices: 75.13, 90.91, 110.0, 133.1
    /// assert_eq!(policy.knock_out_boundary(100.0_f64, 1.1, 1.0 / 1.1, 3), 3);
    ///
    /// let european = PayoffPolicy::<f64>::european(OptionKind::Call);
    /// assert_eq!(european.knock_out_boundary(100.0, 1.1, 1.0 / 1.1, 3), 4);
    /// ```
    pub fn knock_out_boundary(&self, spot: T, up: T, down: T, layer: usize) -> usize {
        let barrier = match self {
            PayoffPolicy::Barrier { barrier, .. } => barrier,
            _ => return layer + 1,
        };
        let mut boundary = layer + 1;
        while boundary > 0
            && barrier.is_breached(node_price(spot, up, down, layer, boundary - 1))
        {
            boundary -= 1;
        }
        boundary
    }
}
