//! # pricer_core: Foundation types for lattice option pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the workspace, providing:
//! - Option contract types: `OptionKind`, `BarrierSpec` (`types::option`)
//! - Lattice model inputs: `ModelParameters` (`types::params`)
//! - Error types: `PricingError` (`types::error`)
//! - The `Priceable` trait and the `Float` re-export (`traits`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{ModelParameters, OptionKind};
//!
//! let params = ModelParameters::new(100.0_f64, 100.0, 1.0, 0.06, OptionKind::Call)
//!     .with_lattice(3, 1.1, 1.0 / 1.1);
//!
//! assert_eq!(params.steps(), 3);
//! assert_eq!(params.kind().payoff(110.0, params.strike()), 10.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `OptionKind`, `BarrierSpec`, `BarrierDirection`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod traits;
pub mod types;
