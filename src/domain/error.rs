//! Sizing error taxonomy.
//!
//! Every failure the engine can produce is a variant here. Errors are
//! raised synchronously at the stage that detects them; there are no
//! retries and no silently degraded results.

use thiserror::Error;

/// Errors raised by card validation, staking configuration, and the
/// growth optimization pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    /// American odds of zero are undefined in the convention.
    #[error("American odds of 0 are undefined")]
    InvalidOdds,

    /// A forecast probability fell outside [0, 1] (or was NaN).
    #[error("probability must be within [0, 1], got {value}")]
    InvalidProbability {
        /// The offending probability.
        value: f64,
    },

    /// Bankroll must be a positive, finite dollar amount.
    #[error("bankroll must be positive and finite, got {value}")]
    InvalidBankroll {
        /// The offending bankroll.
        value: f64,
    },

    /// The card exceeds the supported outcome-space size.
    #[error("card has {bouts} bouts, maximum supported is {max}")]
    CardTooLarge {
        /// Bouts on the rejected card.
        bouts: usize,
        /// The hard cap.
        max: usize,
    },

    /// A staking parameter is out of range.
    #[error("invalid staking configuration: {reason}")]
    Config {
        /// Which parameter and why.
        reason: String,
    },

    /// The solver exhausted its iteration budget without reaching
    /// first-order optimality. A zero-stake optimum is NOT this error.
    #[error(
        "growth optimization did not converge after {iterations} iterations \
         (residual {residual:e})"
    )]
    InfeasibleOptimization {
        /// Iterations consumed before giving up.
        iterations: usize,
        /// Final fixed-point residual (infinity norm).
        residual: f64,
    },
}
