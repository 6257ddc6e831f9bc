//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Shared option parsing
//! and policy construction live here.

pub mod check;
pub mod price;
pub mod sweep;

use clap::{Args, ValueEnum};
use pricer_core::types::{BarrierSpec, ModelParameters, OptionKind};
use pricer_lattice::{InductionStrategy, PayoffPolicy};
use serde::Serialize;

use crate::config::LatticeConfig;
use crate::{CliError, Result};

/// Exercise style selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Exercise at maturity only
    European,
    /// Exercise at any step
    American,
    /// Up-and-out knock-out, European exercise
    Barrier,
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON document
    Json,
}

/// Contract options shared by `price` and `sweep`.
#[derive(Debug, Clone, Args)]
pub struct ContractArgs {
    /// Exercise style
    #[arg(short, long, value_enum, default_value = "european")]
    pub style: Style,

    /// Option kind (call, put); defaults to the configured kind
    #[arg(short, long)]
    pub kind: Option<OptionKind>,

    /// Up-and-out barrier level; defaults to the configured barrier
    #[arg(short, long)]
    pub barrier: Option<f64>,

    /// Induction strategy (node, layer, parallel); defaults to the configured strategy
    #[arg(long)]
    pub strategy: Option<InductionStrategy>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ContractArgs {
    /// Effective option kind after applying the command-line override.
    pub fn kind(&self, config: &LatticeConfig) -> OptionKind {
        self.kind.unwrap_or(config.contract.kind)
    }

    /// Effective induction strategy after applying the command-line override.
    pub fn strategy(&self, config: &LatticeConfig) -> InductionStrategy {
        self.strategy.unwrap_or(config.strategy)
    }

    /// Lattice parameters for the configured contract with the kind
    /// override applied, on `steps` steps when given.
    pub fn parameters(&self, config: &LatticeConfig, steps: Option<usize>) -> ModelParameters<f64> {
        let mut contract = config.contract.clone();
        contract.kind = self.kind(config);
        if let Some(steps) = steps {
            contract.steps = steps;
        }
        contract.to_parameters()
    }

    /// Builds the payoff policy for the selected style.
    pub fn policy(&self, config: &LatticeConfig) -> Result<PayoffPolicy<f64>> {
        let kind = self.kind(config);
        match self.style {
            Style::European => Ok(PayoffPolicy::european(kind)),
            Style::American => Ok(PayoffPolicy::american(kind)),
            Style::Barrier => {
                let level = self.barrier.or(config.contract.barrier).ok_or_else(|| {
                    CliError::invalid_argument("--style barrier requires a barrier level")
                })?;
                Ok(PayoffPolicy::up_and_out(kind, BarrierSpec::up_and_out(level)))
            }
        }
    }
}
