//! American odds normalization.
//!
//! Converts bookmaker moneyline quotes into the proportional gain per
//! unit staked that the growth program consumes, plus the implied
//! break-even probability used for vig diagnostics.

use serde::{Deserialize, Serialize};

use crate::domain::error::SizingError;

/// A bookmaker quote in American odds convention, guaranteed nonzero.
///
/// Positive odds quote the profit on a 100-unit stake (+150 wins 150);
/// negative odds quote the stake required to win 100 (-200 risks 200).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct AmericanOdds(i32);

impl AmericanOdds {
    /// Wraps a raw quote. Zero is rejected; the convention has no
    /// meaning for it.
    pub fn new(odds: i32) -> Result<Self, SizingError> {
        if odds == 0 {
            return Err(SizingError::InvalidOdds);
        }
        Ok(Self(odds))
    }

    /// The raw signed quote.
    pub fn value(self) -> i32 {
        self.0
    }

    /// Profit per dollar staked if the bet wins.
    ///
    /// +150 pays 1.5x the stake in profit; -200 pays 0.5x.
    pub fn proportional_gain(self) -> f64 {
        let odds = f64::from(self.0);
        if odds > 0.0 {
            odds / 100.0
        } else {
            100.0 / -odds
        }
    }

    /// Break-even win probability implied by the quote, vig included.
    pub fn implied_probability(self) -> f64 {
        let odds = f64::from(self.0);
        if odds > 0.0 {
            100.0 / (odds + 100.0)
        } else {
            -odds / (-odds + 100.0)
        }
    }
}

impl TryFrom<i32> for AmericanOdds {
    type Error = SizingError;

    fn try_from(odds: i32) -> Result<Self, Self::Error> {
        Self::new(odds)
    }
}

impl From<AmericanOdds> for i32 {
    fn from(odds: AmericanOdds) -> Self {
        odds.0
    }
}

impl std::fmt::Display for AmericanOdds {
    /// Quotes render with an explicit sign: `+150`, `-200`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}
