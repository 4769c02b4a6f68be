//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config: AppConfig = toml::from_str(&content)
    .with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  info!(
    engine = %config.engine.name,
    fraction = config.staking.fraction,
    min_bet = config.staking.min_bet,
    max_payout = config.staking.max_payout,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Staking limits the sizing pipeline relies on
/// - A solver budget that can actually converge
fn validate_config(config: &AppConfig) -> Result<()> {
  // Engine validation
  anyhow::ensure!(
    !config.engine.name.is_empty(),
    "Engine name must not be empty"
  );

  // Staking validation
  anyhow::ensure!(
    config.staking.fraction > 0.0 && config.staking.fraction <= 1.0,
    "Staking fraction must be in (0, 1], got {}",
    config.staking.fraction
  );
  anyhow::ensure!(
    config.staking.min_bet >= 0.0,
    "min_bet must be non-negative, got {}",
    config.staking.min_bet
  );
  anyhow::ensure!(
    config.staking.max_payout > 0.0,
    "max_payout must be positive, got {}",
    config.staking.max_payout
  );

  // Solver validation
  anyhow::ensure!(
    config.solver.max_iterations > 0,
    "Solver max_iterations must be positive"
  );
  anyhow::ensure!(
    config.solver.tolerance > 0.0,
    "Solver tolerance must be positive, got {}",
    config.solver.tolerance
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_rejects_out_of_range_fraction() {
    let config: AppConfig = toml::from_str(
      r#"
        [engine]
        name = "simkelly"

        [staking]
        fraction = 1.5
      "#,
    )
    .unwrap();

    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("fraction"));
  }
}
