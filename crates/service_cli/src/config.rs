//! CLI configuration management.
//!
//! Handles loading of the lattice configuration from TOML files with
//! environment variable override support.
//!
//! ```toml
//! log_level = "info"
//! strategy = "layer-wise"
//!
//! [contract]
//! spot = 100.0
//! strike = 100.0
//! maturity = 1.0
//! rate = 0.06
//! steps = 3
//! kind = "call"
//! up = 1.1            # or: volatility = 0.2
//! barrier = 125.0     # used by --style barrier
//! ```

use pricer_core::types::{ModelParameters, OptionKind};
use pricer_lattice::InductionStrategy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Contract and lattice shape priced by the CLI.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ContractConfig {
    /// Initial underlying price
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Time to maturity in years
    pub maturity: f64,
    /// Continuously compounded risk-free rate
    pub rate: f64,
    /// Number of lattice steps
    pub steps: usize,
    /// Call or put
    pub kind: OptionKind,
    /// Explicit up factor; the down factor is its reciprocal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub up: Option<f64>,
    /// Volatility for Cox-Ross-Rubinstein factors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    /// Up-and-out barrier level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barrier: Option<f64>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            maturity: 1.0,
            rate: 0.06,
            steps: 3,
            kind: OptionKind::Call,
            up: Some(1.1),
            volatility: None,
            barrier: Some(125.0),
        }
    }
}

impl ContractConfig {
    /// Builds lattice parameters, preferring CRR factors when a volatility
    /// is configured.
    pub fn to_parameters(&self) -> ModelParameters<f64> {
        let params =
            ModelParameters::new(self.spot, self.strike, self.maturity, self.rate, self.kind);
        match (self.volatility, self.up) {
            (Some(volatility), _) => params.with_volatility(volatility, self.steps),
            (None, Some(up)) => params.with_lattice(self.steps, up, up.recip()),
            (None, None) => params.with_steps(self.steps),
        }
    }
}

/// Lattice CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LatticeConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Default induction strategy
    #[serde(default)]
    pub strategy: InductionStrategy,

    /// Contract to price
    #[serde(default)]
    pub contract: ContractConfig,

    /// Environment overrides that could not be parsed, reported by `validate`
    #[serde(skip)]
    rejected_overrides: Vec<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            strategy: InductionStrategy::default(),
            contract: ContractConfig::default(),
            rejected_overrides: Vec::new(),
        }
    }
}

impl LatticeConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or the defaults when no file exists
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(steps) = std::env::var("LATTICE_STEPS") {
            match steps.trim().parse() {
                Ok(steps) => self.contract.steps = steps,
                Err(_) => self.reject_override("LATTICE_STEPS", &steps),
            }
        }

        if let Ok(strategy) = std::env::var("LATTICE_STRATEGY") {
            match strategy.parse() {
                Ok(strategy) => self.strategy = strategy,
                Err(_) => self.reject_override("LATTICE_STRATEGY", &strategy),
            }
        }

        if let Ok(log_level) = std::env::var("LATTICE_LOG_LEVEL") {
            self.log_level = log_level;
        }

        self
    }

    fn reject_override(&mut self, name: &str, value: &str) {
        warn!("Ignoring unparsable {}='{}'", name, value);
        self.rejected_overrides.push(format!("Invalid {} override '{}'", name, value));
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = self.rejected_overrides.clone();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        let contract = &self.contract;
        for (name, value) in [
            ("spot", contract.spot),
            ("strike", contract.strike),
            ("maturity", contract.maturity),
        ] {
            if !(value.is_finite() && value > 0.0) {
                errors.push(format!("{} must be positive, got {}", name, value));
            }
        }
        if !contract.rate.is_finite() {
            errors.push(format!("rate must be finite, got {}", contract.rate));
        }

        match (contract.up, contract.volatility) {
            (Some(_), Some(_)) => {
                errors.push("Specify either up or volatility, not both".to_string());
            }
            (None, None) => {
                errors.push("One of up or volatility is required".to_string());
            }
            (Some(up), None) if !(up.is_finite() && up > 1.0) => {
                errors.push(format!("up must be greater than 1, got {}", up));
            }
            (None, Some(volatility)) if !(volatility.is_finite() && volatility > 0.0) => {
                errors.push(format!("volatility must be positive, got {}", volatility));
            }
            _ => {}
        }

        if let Some(barrier) = contract.barrier {
            if !(barrier.is_finite() && barrier > 0.0) {
                errors.push(format!("barrier must be positive, got {}", barrier));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from file (or defaults) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_or_default(path)?.with_env_override();
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error type
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error reading config file
    Io(String),
    /// Parse error in config file
    Parse(String),
    /// Validation error
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Validation(errors) => write!(f, "Validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {}
