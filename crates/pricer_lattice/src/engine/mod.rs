//! Backward-induction engine.
//!
//! The engine validates its inputs, calibrates `q` and `disc`, builds the
//! terminal layer, and folds it back one layer at a time until the root
//! remains. Layer `i` depends only on layer `i + 1`, so layers run in
//! strictly decreasing order; nodes within a layer are independent.
//!
//! Three conforming strategies produce the same root value:
//! - [`InductionStrategy::NodeWise`]: one node at a time, prices by
//!   incremental multiplication, working array shrinking by one per layer
//! - [`InductionStrategy::LayerWise`]: whole layer of prices first (direct
//!   exponentiation), then the whole layer of values combined from the
//!   child slice, both into buffers reused across layers
//! - [`InductionStrategy::ParallelLayerWise`]: layer-wise with the nodes of
//!   each layer evaluated as a rayon parallel map
//!
//! Which nodes are knocked out is decided once per layer by
//! [`PayoffPolicy::knock_out_boundary`], never on the strategy's own prices,
//! so a barrier sitting exactly on a node is treated alike by all three.

mod calibration;
mod layer_wise;
mod node_wise;
mod parallel;

pub use calibration::Calibration;

use std::fmt;
use std::str::FromStr;

use num_traits::Float;
use pricer_core::traits::priceable::Priceable;
use pricer_core::types::{ModelParameters, PricingError};
use tracing::debug;

use crate::error::LatticeError;
use crate::policy::PayoffPolicy;
use calibration::{check_extreme_nodes, to_f64, validate_inputs};

/// Work distribution used by the backward induction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum InductionStrategy {
    /// Inner loop over nodes with incremental prices.
    #[cfg_attr(feature = "serde", serde(alias = "node"))]
    NodeWise,
    /// Whole-layer sweep over a reused buffer.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "layer"))]
    LayerWise,
    /// Layer-wise with a parallel map over the nodes of each layer.
    #[cfg_attr(feature = "serde", serde(alias = "parallel"))]
    ParallelLayerWise,
}

impl InductionStrategy {
    /// All strategies, in declaration order.
    pub const ALL: [InductionStrategy; 3] = [
        InductionStrategy::NodeWise,
        InductionStrategy::LayerWise,
        InductionStrategy::ParallelLayerWise,
    ];
}

impl fmt::Display for InductionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InductionStrategy::NodeWise => write!(f, "node-wise"),
            InductionStrategy::LayerWise => write!(f, "layer-wise"),
            InductionStrategy::ParallelLayerWise => write!(f, "parallel-layer-wise"),
        }
    }
}

impl FromStr for InductionStrategy {
    type Err = LatticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "node" | "node-wise" => Ok(InductionStrategy::NodeWise),
            "layer" | "layer-wise" => Ok(InductionStrategy::LayerWise),
            "parallel" | "parallel-layer-wise" => Ok(InductionStrategy::ParallelLayerWise),
            other => Err(LatticeError::UnknownStrategy {
                name: other.to_string(),
            }),
        }
    }
}

/// Result of a lattice valuation with the constants it was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeValuation<T: Float> {
    /// Root value of the lattice.
    pub price: T,
    /// Calibrated constants; `None` for a zero-step lattice.
    pub calibration: Option<Calibration<T>>,
    /// Number of lattice steps.
    pub steps: usize,
    /// Strategy that produced the price.
    pub strategy: InductionStrategy,
}

/// Binomial lattice pricing engine.
///
/// Stateless apart from the chosen strategy; every call allocates fresh
/// working buffers, so one engine may be shared across threads.
///
/// # Examples
/// ```
/// use pricer_core::types::{ModelParameters, OptionKind};
/// use pricer_lattice::{BinomialEngine, InductionStrategy, PayoffPolicy};
///
/// let params = ModelParameters::new(100.0_f64, 100.0, 1.0, 0.06, OptionKind::Call)
///     .with_lattice(3, 1.1, 1.0 / 1.1);
/// let policy = PayoffPolicy::european(OptionKind::Call);
///
/// let engine = BinomialEngine::new(InductionStrategy::NodeWise);
/// let price = engine.price(&params, &policy).unwrap();
/// assert!((price - 10.145735799928817).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BinomialEngine {
    strategy: InductionStrategy,
}

impl BinomialEngine {
    /// Creates an engine using `strategy`.
    pub fn new(strategy: InductionStrategy) -> Self {
        Self { strategy }
    }

    /// Returns the induction strategy.
    #[inline]
    pub fn strategy(&self) -> InductionStrategy {
        self.strategy
    }

    /// Root value of the lattice described by `params` under `policy`.
    pub fn price<T>(
        &self,
        params: &ModelParameters<T>,
        policy: &PayoffPolicy<T>,
    ) -> Result<T, LatticeError>
    where
        T: Float + Send + Sync,
    {
        self.price_with_diagnostics(params, policy)
            .map(|valuation| valuation.price)
    }

    /// Root value together with the calibrated constants.
    ///
    /// # Errors
    /// - `InvalidGeometry` for non-positive spot, strike, maturity, or barrier
    /// - `InvalidCalibration` for `u <= 1`, `u <= d`, or `q` outside `(0, 1)`
    /// - `NumericOverflow` when node prices leave the finite range
    pub fn price_with_diagnostics<T>(
        &self,
        params: &ModelParameters<T>,
        policy: &PayoffPolicy<T>,
    ) -> Result<LatticeValuation<T>, LatticeError>
    where
        T: Float + Send + Sync,
    {
        let span = tracing::debug_span!(
            "lattice_price",
            steps = params.steps(),
            strategy = %self.strategy,
            policy = policy.name(),
        );
        let _guard = span.enter();

        validate_inputs(params, policy)?;

        if params.steps() == 0 {
            debug!("zero-step lattice, pricing terminal payoff at spot");
            return Ok(LatticeValuation {
                price: policy.terminal_payoff(params.spot(), params.strike()),
                calibration: None,
                steps: 0,
                strategy: self.strategy,
            });
        }

        let calibration = Calibration::from_parameters(params)?;
        debug!(
            q = to_f64(calibration.probability()),
            disc = to_f64(calibration.discount()),
            "calibrated lattice"
        );
        check_extreme_nodes(params)?;

        let price = match self.strategy {
            InductionStrategy::NodeWise => {
                node_wise::backward_induction(params, policy, &calibration)?
            }
            InductionStrategy::LayerWise => {
                layer_wise::backward_induction(params, policy, &calibration)?
            }
            InductionStrategy::ParallelLayerWise => {
                parallel::backward_induction(params, policy, &calibration)?
            }
        };

        if !price.is_finite() {
            return Err(LatticeError::NumericOverflow { layer: 0 });
        }

        Ok(LatticeValuation {
            price,
            calibration: Some(calibration),
            steps: params.steps(),
            strategy: self.strategy,
        })
    }
}

/// Prices with the default (layer-wise) engine.
///
/// # Examples
/// ```
/// use pricer_core::types::{ModelParameters, OptionKind};
/// use pricer_lattice::{price, PayoffPolicy};
///
/// let params = ModelParameters::new(100.0_f64, 100.0, 1.0, 0.06, OptionKind::Put)
///     .with_lattice(3, 1.1, 1.0 / 1.1);
/// let value = price(&params, &PayoffPolicy::american(OptionKind::Put)).unwrap();
/// assert!((value - 4.654588754602527).abs() < 1e-6);
/// ```
pub fn price<T>(params: &ModelParameters<T>, policy: &PayoffPolicy<T>) -> Result<T, LatticeError>
where
    T: Float + Send + Sync,
{
    BinomialEngine::default().price(params, policy)
}

/// An option contract bound to a lattice and an engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeOption<T: Float> {
    params: ModelParameters<T>,
    policy: PayoffPolicy<T>,
    engine: BinomialEngine,
}

impl<T: Float> LatticeOption<T> {
    /// Binds `params` and `policy` to the default engine.
    pub fn new(params: ModelParameters<T>, policy: PayoffPolicy<T>) -> Self {
        Self {
            params,
            policy,
            engine: BinomialEngine::default(),
        }
    }

    /// Replaces the engine.
    pub fn with_engine(mut self, engine: BinomialEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Returns the lattice parameters.
    #[inline]
    pub fn params(&self) -> &ModelParameters<T> {
        &self.params
    }

    /// Returns the payoff policy.
    #[inline]
    pub fn policy(&self) -> &PayoffPolicy<T> {
        &self.policy
    }
}

impl<T: Float + Send + Sync> Priceable<T> for LatticeOption<T> {
    fn price(&self) -> Result<T, PricingError> {
        self.engine
            .price(&self.params, &self.policy)
            .map_err(PricingError::from)
    }
}

/// Terminal value of `node`, given the knock-out boundary of the last layer.
#[inline]
pub(crate) fn terminal_value<T: Float>(
    policy: &PayoffPolicy<T>,
    node: usize,
    boundary: usize,
    price: T,
    strike: T,
) -> T {
    if node >= boundary {
        T::zero()
    } else {
        policy.kind().payoff(price, strike)
    }
}

/// Fails with `NumericOverflow` if any price in `layer` is not finite.
pub(crate) fn ensure_finite<T: Float>(
    prices: &[T],
    layer: usize,
) -> Result<(), LatticeError> {
    if prices.iter().all(|price| price.is_finite()) {
        Ok(())
    } else {
        Err(LatticeError::NumericOverflow { layer })
    }
}
