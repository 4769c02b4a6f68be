//! Fight cards and per-bout inputs.
//!
//! A `Bout` pairs forecast win probabilities with bookmaker quotes for
//! both corners. A `FightCard` is the validated collection the sizing
//! pipeline operates on; `CardSnapshot` is the wire format callers
//! hand to the snapshot runner.

use serde::{Deserialize, Serialize};

use crate::domain::error::SizingError;
use crate::domain::odds::AmericanOdds;

/// Hard cap on bouts per card.
///
/// The joint outcome space has 2^N entries, so 16 bouts bound the
/// enumeration at 65 536 outcomes. Real cards top out around 15.
pub const MAX_BOUTS: usize = 16;

/// One bout: forecast probabilities and quotes for the red and blue
/// corners.
///
/// Probabilities are model forecasts and need not sum to 1; the quotes
/// carry the bookmaker's own margin separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bout {
    /// Optional display label ("Jones vs Miocic").
    #[serde(default)]
    pub label: Option<String>,
    /// Forecast probability that the red corner wins.
    pub red_probability: f64,
    /// Forecast probability that the blue corner wins.
    pub blue_probability: f64,
    /// American odds quoted on the red corner.
    pub red_odds: AmericanOdds,
    /// American odds quoted on the blue corner.
    pub blue_odds: AmericanOdds,
}

impl Bout {
    /// Builds a validated bout from raw inputs.
    pub fn new(
        red_probability: f64,
        blue_probability: f64,
        red_odds: i32,
        blue_odds: i32,
    ) -> Result<Self, SizingError> {
        validate_probability(red_probability)?;
        validate_probability(blue_probability)?;
        Ok(Self {
            label: None,
            red_probability,
            blue_probability,
            red_odds: AmericanOdds::new(red_odds)?,
            blue_odds: AmericanOdds::new(blue_odds)?,
        })
    }

    /// Same as [`new`](Self::new) with a display label attached.
    pub fn labeled(
        label: impl Into<String>,
        red_probability: f64,
        blue_probability: f64,
        red_odds: i32,
        blue_odds: i32,
    ) -> Result<Self, SizingError> {
        let mut bout = Self::new(red_probability, blue_probability, red_odds, blue_odds)?;
        bout.label = Some(label.into());
        Ok(bout)
    }

    /// Bookmaker margin baked into this bout's quotes.
    ///
    /// Zero for a fair book; sportsbooks typically run 2-5%.
    pub fn overround(&self) -> f64 {
        self.red_odds.implied_probability() + self.blue_odds.implied_probability() - 1.0
    }
}

/// A validated collection of bouts ready for sizing.
#[derive(Debug, Clone)]
pub struct FightCard {
    bouts: Vec<Bout>,
}

impl FightCard {
    /// Validates every bout and the card size.
    ///
    /// Bouts arriving through deserialization get their probability
    /// ranges checked here; odds are already nonzero by construction.
    pub fn new(bouts: Vec<Bout>) -> Result<Self, SizingError> {
        if bouts.len() > MAX_BOUTS {
            return Err(SizingError::CardTooLarge {
                bouts: bouts.len(),
                max: MAX_BOUTS,
            });
        }
        for bout in &bouts {
            validate_probability(bout.red_probability)?;
            validate_probability(bout.blue_probability)?;
        }
        Ok(Self { bouts })
    }

    /// Bouts in card order.
    pub fn bouts(&self) -> &[Bout] {
        &self.bouts
    }

    /// Number of bouts on the card.
    pub fn len(&self) -> usize {
        self.bouts.len()
    }

    /// True for a card with no bouts.
    pub fn is_empty(&self) -> bool {
        self.bouts.is_empty()
    }
}

/// Wire format consumed by the snapshot runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSnapshot {
    /// Current bankroll in dollars.
    pub bankroll: f64,
    /// Bouts on the card, red corner listed first in each pair of quotes.
    pub bouts: Vec<Bout>,
}

fn validate_probability(value: f64) -> Result<(), SizingError> {
    // NaN fails the range check too.
    if !(0.0..=1.0).contains(&value) {
        return Err(SizingError::InvalidProbability { value });
    }
    Ok(())
}
