//! Configuration Module - TOML-based Engine Configuration
//!
//! Loads and validates configuration from `config.toml`. All staking
//! limits and solver tunables are externalized here - nothing is
//! hardcoded in the domain layer.

pub mod loader;

use serde::Deserialize;

use crate::domain::StakingConfig;

/// Top-level engine configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before any card is sized.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Engine identity and metadata.
  pub engine: EngineConfig,
  /// Staking limits (budget fraction, minimum bet, payout cap).
  #[serde(default)]
  pub staking: StakingConfig,
  /// Solver tunables.
  #[serde(default)]
  pub solver: SolverConfig,
}

/// Engine identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
  /// Human-readable engine name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Projected gradient solver configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SolverConfig {
  /// Hard cap on ascent iterations.
  #[serde(default = "default_max_iterations")]
  pub max_iterations: usize,
  /// First-order residual below which a run counts as converged.
  #[serde(default = "default_tolerance")]
  pub tolerance: f64,
}

impl Default for SolverConfig {
  fn default() -> Self {
    Self {
      max_iterations: default_max_iterations(),
      tolerance: default_tolerance(),
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_max_iterations() -> usize {
  5_000
}

fn default_tolerance() -> f64 {
  1e-8
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_minimal_toml_applies_defaults() {
    let config: AppConfig = toml::from_str(
      r#"
        [engine]
        name = "simkelly"
      "#,
    )
    .unwrap();

    assert_eq!(config.engine.log_level, "info");
    assert!((config.staking.fraction - 0.15).abs() < 1e-12);
    assert!((config.staking.min_bet - 0.10).abs() < 1e-12);
    assert!((config.staking.max_payout - 100_000.0).abs() < 1e-6);
    assert_eq!(config.solver.max_iterations, 5_000);
    assert!((config.solver.tolerance - 1e-8).abs() < 1e-20);
  }
}
