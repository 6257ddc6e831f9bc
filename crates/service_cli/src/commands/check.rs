//! Check command implementation
//!
//! Prints the effective configuration and the calibrated lattice constants
//! without pricing.

use pricer_lattice::Calibration;
use tracing::{info, warn};

use crate::config::LatticeConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &LatticeConfig) -> Result<()> {
    info!("Checking configuration...");

    println!("{}", toml::to_string_pretty(config)?);

    let params = config.contract.to_parameters();
    println!("u    = {:.10}", params.up());
    println!("d    = {:.10}", params.down());

    if params.steps() == 0 {
        warn!("Zero-step lattice: valuation returns the terminal payoff at spot");
        return Ok(());
    }

    let calibration = Calibration::from_parameters(&params)?;
    println!("dt   = {:.10}", calibration.dt());
    println!("q    = {:.10}", calibration.probability());
    println!("disc = {:.10}", calibration.discount());

    info!("Configuration OK");
    Ok(())
}
