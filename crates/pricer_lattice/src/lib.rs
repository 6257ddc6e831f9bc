//! # pricer_lattice (L2: Business Logic)
//!
//! Recombining binomial lattice valuation of European, American, and
//! up-and-out barrier options.
//!
//! This crate provides:
//! - Node price geometry (`geometry`)
//! - Exercise and knock-out policies (`PayoffPolicy`)
//! - Risk-neutral calibration (`Calibration`)
//! - A backward-induction engine with interchangeable strategies
//!   (`BinomialEngine`, `InductionStrategy`)
//!
//! ## Design Principles
//!
//! - **Enum-based policies** for static dispatch inside the hot loop
//! - **Fail-fast validation**: every error is raised before a value is returned
//! - **Generic over `Float`** so dual numbers flow through for sensitivities
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{BarrierSpec, ModelParameters, OptionKind};
//! use pricer_lattice::{BinomialEngine, InductionStrategy, PayoffPolicy};
//!
//! let params = ModelParameters::new(100.0_f64, 100.0, 1.0, 0.06, OptionKind::Call)
//!     .with_lattice(3, 1.1, 1.0 / 1.1);
//! let barrier = PayoffPolicy::up_and_out(OptionKind::Call, BarrierSpec::up_and_out(125.0));
//!
//! let engine = BinomialEngine::new(InductionStrategy::ParallelLayerWise);
//! let value = engine.price(&params, &barrier).unwrap();
//! assert!((value - 4.00026736854323).abs() < 1e-6);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod engine;
pub mod error;
pub mod geometry;
pub mod policy;

pub use engine::{
    price, BinomialEngine, Calibration, InductionStrategy, LatticeOption, LatticeValuation,
};
pub use error::LatticeError;
pub use policy::PayoffPolicy;
