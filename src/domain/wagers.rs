//! Staking policy and dollar wager post-processing.
//!
//! The optimizer hands back bankroll fractions. This module turns them into
//! executable dollar amounts: scale by bankroll, halve until every single
//! wager's potential payout fits under the configured ceiling, round to
//! cents, zero out dust below the minimum bet, and split the interleaved
//! vector back into per-corner wagers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::SizingError;

// ────────────────────────────────────────────
// StakingConfig — risk limits for a sizing run
// ────────────────────────────────────────────

/// Risk limits applied to every sizing run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakingConfig {
    /// Maximum bankroll fraction at risk across the whole card.
    #[serde(default = "default_fraction")]
    pub fraction: f64,
    /// Dollar floor below which a rounded wager is zeroed.
    #[serde(default = "default_min_bet")]
    pub min_bet: f64,
    /// Dollar ceiling on any single wager's potential payout.
    #[serde(default = "default_max_payout")]
    pub max_payout: f64,
}

impl StakingConfig {
    /// Checks the limits the sizing pipeline relies on.
    pub fn validate(&self) -> Result<(), SizingError> {
        if !self.fraction.is_finite() || self.fraction <= 0.0 || self.fraction > 1.0 {
            return Err(SizingError::Config {
                reason: format!("fraction must be in (0, 1], got {}", self.fraction),
            });
        }
        if !self.min_bet.is_finite() || self.min_bet < 0.0 {
            return Err(SizingError::Config {
                reason: format!("min_bet must be >= 0, got {}", self.min_bet),
            });
        }
        if !self.max_payout.is_finite() || self.max_payout <= 0.0 {
            return Err(SizingError::Config {
                reason: format!("max_payout must be > 0, got {}", self.max_payout),
            });
        }
        Ok(())
    }
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            fraction: default_fraction(),
            min_bet: default_min_bet(),
            max_payout: default_max_payout(),
        }
    }
}

// ────────────────────────────────────────────
// Dollar post-processing
// ────────────────────────────────────────────

/// Halves every wager until no single wager's potential payout (stake times
/// proportional gain) exceeds `max_payout`. Returns the number of halvings.
///
/// The count comes from the worst offender analytically rather than an
/// unconditional loop, with one extra halving if float rounding leaves the
/// scaled payout a hair over the ceiling.
pub fn apply_payout_cap(wagers: &mut [f64], gains: &[f64], max_payout: f64) -> u32 {
    let worst = wagers
        .iter()
        .zip(gains)
        .map(|(w, g)| w * g)
        .fold(0.0, f64::max);
    if worst <= max_payout {
        return 0;
    }

    let mut halvings = (worst / max_payout).log2().ceil() as u32;
    let mut scale = 0.5f64.powi(halvings as i32);
    if worst * scale > max_payout {
        halvings += 1;
        scale *= 0.5;
    }
    for w in wagers.iter_mut() {
        *w *= scale;
    }
    halvings
}

/// Rounds dollar wagers to cents and splits the interleaved vector into
/// per-corner outputs, preserving bout order.
///
/// Every returned amount is exactly zero or at least `min_bet`, and never
/// pays out above `max_payout`.
pub fn round_and_split(
    wagers: &[f64],
    gains: &[f64],
    staking: &StakingConfig,
) -> (Vec<Decimal>, Vec<Decimal>) {
    let min_bet = Decimal::from_f64(staking.min_bet).unwrap_or(Decimal::ZERO);
    let cap = Decimal::from_f64(staking.max_payout).unwrap_or(Decimal::MAX);

    let bouts = wagers.len() / 2;
    let mut red = Vec::with_capacity(bouts);
    let mut blue = Vec::with_capacity(bouts);
    for i in 0..bouts {
        red.push(round_wager(wagers[2 * i], gains[2 * i], min_bet, cap));
        blue.push(round_wager(wagers[2 * i + 1], gains[2 * i + 1], min_bet, cap));
    }
    (red, blue)
}

fn round_wager(amount: f64, gain: f64, min_bet: Decimal, cap: Decimal) -> Decimal {
    let Some(raw) = Decimal::from_f64(amount) else {
        return Decimal::ZERO;
    };
    let mut rounded = raw.round_dp(2);

    // Rounding up by half a cent can push the payout back over the cap;
    // one cent down always restores it.
    let gain_dec = Decimal::from_f64(gain).unwrap_or(Decimal::ZERO);
    if rounded * gain_dec > cap {
        rounded -= dec!(0.01);
    }

    if rounded <= Decimal::ZERO || rounded < min_bet {
        return Decimal::ZERO;
    }
    rounded
}

// ────────────────────────────────────────────
// WagerSheet — the final sizing decision
// ────────────────────────────────────────────

/// Final sizing decision for one card, ready for execution and audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WagerSheet {
    /// Unique id for this sizing run.
    pub id: Uuid,
    /// When the sheet was computed (UTC).
    pub computed_at: DateTime<Utc>,
    /// Bankroll the stakes were scaled against.
    pub bankroll: Decimal,
    /// Bout labels, same order as the wager vectors.
    pub labels: Vec<Option<String>>,
    /// Dollar stake on each red corner.
    pub red_wagers: Vec<Decimal>,
    /// Dollar stake on each blue corner.
    pub blue_wagers: Vec<Decimal>,
    /// Sum of all stakes.
    pub total_staked: Decimal,
    /// Expected log growth of the bankroll multiplier at the optimum.
    pub expected_log_growth: f64,
    /// Halvings applied to satisfy the payout cap.
    pub halvings: u32,
}

impl WagerSheet {
    pub fn new(
        bankroll: Decimal,
        labels: Vec<Option<String>>,
        red_wagers: Vec<Decimal>,
        blue_wagers: Vec<Decimal>,
        expected_log_growth: f64,
        halvings: u32,
    ) -> Self {
        let total_staked: Decimal = red_wagers.iter().chain(blue_wagers.iter()).sum();
        Self {
            id: Uuid::new_v4(),
            computed_at: Utc::now(),
            bankroll,
            labels,
            red_wagers,
            blue_wagers,
            total_staked,
            expected_log_growth,
            halvings,
        }
    }

    /// Sheet that stakes nothing, for an empty card.
    pub fn empty(bankroll: Decimal) -> Self {
        Self::new(bankroll, Vec::new(), Vec::new(), Vec::new(), 0.0, 0)
    }
}

// Default value functions for serde

fn default_fraction() -> f64 {
    0.15
}

fn default_min_bet() -> f64 {
    0.10
}

fn default_max_payout() -> f64 {
    100_000.0
}
