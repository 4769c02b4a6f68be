//! Growth Solver Port - Convex Optimization Interface
//!
//! Defines the trait the sizing usecase requires from a numerical
//! optimizer. Adapters implement it with whatever method they like, as
//! long as the returned point respects the feasible set (non-negative
//! weights whose sum stays within the program budget).
//!
//! Key design decisions:
//! - Synchronous: a solve over <= 16 bouts finishes in milliseconds
//! - Non-convergence is data (`SolveStatus`), not an error; the caller
//!   decides whether a near-miss is acceptable
//! - The returned point must be feasible, converged or not

use crate::domain::growth::GrowthProgram;
use crate::domain::SizingError;

/// How a solve run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
  /// First-order optimality reached within tolerance.
  Converged,
  /// Iteration budget exhausted before the tolerance was met.
  IterationLimit,
}

/// Output of a solve run.
#[derive(Debug, Clone)]
pub struct GrowthSolution {
  /// Bankroll fraction per wager slot, feasible by construction.
  pub weights: Vec<f64>,
  /// Objective value at `weights`.
  pub expected_log_growth: f64,
  /// Iterations consumed.
  pub iterations: usize,
  /// Final first-order residual (sup norm of the projected gradient step).
  pub residual: f64,
  /// How the run ended.
  pub status: SolveStatus,
}

/// Trait for expected-log-growth maximizers.
///
/// Implementors maximize `program.expected_log_growth` over the
/// truncated simplex `{ w >= 0, sum(w) <= budget }`.
pub trait GrowthSolver: Send + Sync + 'static {
  /// Short solver name for logs.
  fn name(&self) -> &'static str;

  /// Maximizes the program objective over its feasible set.
  ///
  /// # Errors
  /// Returns an error only for malformed programs; running out of
  /// iterations is reported through `SolveStatus::IterationLimit`.
  fn maximize(&self, program: &GrowthProgram) -> Result<GrowthSolution, SizingError>;
}
