//! Bet Sizer - Card-Level Kelly Staking Workflow
//!
//! The main sizing use case that:
//! 1. Validates the bankroll snapshot
//! 2. Enumerates the joint outcome space of the card
//! 3. Maximizes expected log growth through the solver port
//! 4. Scales fractions to dollars and enforces the payout cap
//! 5. Rounds to cents, zeroes dust, splits into per-corner wagers
//!
//! Pure orchestration: every step is a deterministic function of the
//! input snapshot, so identical calls produce identical stakes.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::domain::growth::GrowthProgram;
use crate::domain::outcomes::OutcomeSpace;
use crate::domain::wagers::{apply_payout_cap, round_and_split, StakingConfig, WagerSheet};
use crate::domain::{FightCard, SizingError};
use crate::ports::solver::{GrowthSolver, SolveStatus};

/// Sizing engine orchestrating the probability-to-wager pipeline.
pub struct BetSizer<S: GrowthSolver> {
  /// Growth maximization backend.
  solver: S,
  /// Risk limits applied to every run.
  staking: StakingConfig,
}

impl<S: GrowthSolver> BetSizer<S> {
  /// Create a sizer after validating the staking limits.
  pub fn new(solver: S, staking: StakingConfig) -> Result<Self, SizingError> {
    staking.validate()?;
    Ok(Self { solver, staking })
  }

  /// Size every wager on a card against the current bankroll.
  ///
  /// Returns a sheet whose stakes are each zero or at least the minimum
  /// bet, jointly within the budget fraction, and individually under the
  /// payout cap. A card with no positive-EV side yields an all-zero
  /// sheet, not an error.
  #[instrument(skip(self, card), fields(bouts = card.len()))]
  pub fn size_card(&self, card: &FightCard, bankroll: f64) -> Result<WagerSheet, SizingError> {
    // 1. Validate the bankroll snapshot
    if !bankroll.is_finite() || bankroll <= 0.0 {
      return Err(SizingError::InvalidBankroll { value: bankroll });
    }
    let Some(bankroll_dec) = Decimal::from_f64(bankroll) else {
      return Err(SizingError::InvalidBankroll { value: bankroll });
    };
    let bankroll_dec = bankroll_dec.round_dp(2);

    if card.is_empty() {
      debug!("Empty card, staking nothing");
      return Ok(WagerSheet::empty(bankroll_dec));
    }

    for bout in card.bouts() {
      debug!(
        label = ?bout.label,
        red = %bout.red_odds,
        blue = %bout.blue_odds,
        overround = bout.overround(),
        "Sizing bout"
      );
    }

    // 2. Enumerate the joint outcome space
    let space = OutcomeSpace::build(card);
    debug!(
      outcomes = space.num_outcomes(),
      wagers = space.num_wagers(),
      mass = space.probability_mass(),
      "Outcome space built"
    );

    // 3. Maximize expected log growth under the budget
    let program = GrowthProgram::new(space, self.staking.fraction);
    let solution = self.solver.maximize(&program)?;
    if solution.status != SolveStatus::Converged {
      warn!(
        solver = self.solver.name(),
        iterations = solution.iterations,
        residual = solution.residual,
        "Solver failed to converge"
      );
      return Err(SizingError::InfeasibleOptimization {
        iterations: solution.iterations,
        residual: solution.residual,
      });
    }

    // 4. Scale to dollars and enforce the payout cap
    let mut dollars: Vec<f64> = solution.weights.iter().map(|w| w * bankroll).collect();
    let halvings =
      apply_payout_cap(&mut dollars, program.space().gains(), self.staking.max_payout);

    // 5. Round to cents, zero dust, split by corner
    let (red_wagers, blue_wagers) =
      round_and_split(&dollars, program.space().gains(), &self.staking);

    // 6. Assemble the sheet
    let labels = card.bouts().iter().map(|b| b.label.clone()).collect();
    let sheet = WagerSheet::new(
      bankroll_dec,
      labels,
      red_wagers,
      blue_wagers,
      solution.expected_log_growth,
      halvings,
    );

    info!(
      sheet_id = %sheet.id,
      total_staked = %sheet.total_staked,
      expected_log_growth = sheet.expected_log_growth,
      halvings = sheet.halvings,
      "Card sized"
    );

    Ok(sheet)
  }
}
