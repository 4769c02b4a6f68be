//! Exhaustive outcome enumeration for a fight card.
//!
//! A card of N bouts has 2^N joint outcomes. Each outcome is indexed by an
//! integer k in [0, 2^N): bit i of k set means the red corner wins bout i,
//! clear means the blue corner wins. The same bit decoding drives both the
//! per-wager return matrix and the joint probability vector, so the two can
//! never disagree about which outcome a row describes.

use super::card::FightCard;

/// Dense enumeration of every joint outcome of a fight card.
///
/// Wagers are interleaved: column 2i is the red-corner wager on bout i and
/// column 2i+1 the blue-corner wager on the same bout. Row k of the return
/// matrix holds the proportional return of each wager under outcome k: the
/// quoted gain when the backed corner wins, -1 (stake lost) when it loses.
#[derive(Debug, Clone)]
pub struct OutcomeSpace {
    /// Number of bouts on the card.
    bouts: usize,
    /// Row-major 2^N x 2N return matrix.
    returns: Vec<f64>,
    /// Joint probability of outcome k, same indexing as `returns` rows.
    probabilities: Vec<f64>,
    /// Proportional gain of each wager, interleaved red/blue.
    gains: Vec<f64>,
}

impl OutcomeSpace {
    /// Enumerates every joint outcome of `card`.
    ///
    /// A single pass over k fills the return row and the probability for
    /// outcome k from the same bit decoding. The empty card yields one
    /// outcome with probability 1 and no wager columns.
    pub fn build(card: &FightCard) -> Self {
        let bouts = card.len();
        let wagers = bouts * 2;
        let outcomes = 1usize << bouts;

        let mut gains = Vec::with_capacity(wagers);
        for bout in card.bouts() {
            gains.push(bout.red_odds.proportional_gain());
            gains.push(bout.blue_odds.proportional_gain());
        }

        let mut returns = vec![0.0; outcomes * wagers];
        let mut probabilities = vec![0.0; outcomes];

        for k in 0..outcomes {
            let row = &mut returns[k * wagers..(k + 1) * wagers];
            let mut mass = 1.0;
            for (i, bout) in card.bouts().iter().enumerate() {
                if (k >> i) & 1 == 1 {
                    row[2 * i] = gains[2 * i];
                    row[2 * i + 1] = -1.0;
                    mass *= bout.red_probability;
                } else {
                    row[2 * i] = -1.0;
                    row[2 * i + 1] = gains[2 * i + 1];
                    mass *= bout.blue_probability;
                }
            }
            probabilities[k] = mass;
        }

        Self {
            bouts,
            returns,
            probabilities,
            gains,
        }
    }

    /// Number of bouts on the enumerated card.
    pub fn bouts(&self) -> usize {
        self.bouts
    }

    /// Number of joint outcomes (2^N).
    pub fn num_outcomes(&self) -> usize {
        1 << self.bouts
    }

    /// Number of wager slots (2N, red/blue interleaved).
    pub fn num_wagers(&self) -> usize {
        self.bouts * 2
    }

    /// Proportional return of each wager under outcome `k`.
    pub fn outcome_row(&self, k: usize) -> &[f64] {
        let wagers = self.num_wagers();
        &self.returns[k * wagers..(k + 1) * wagers]
    }

    /// Joint probability of each outcome.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Proportional gain of each wager, interleaved red/blue.
    pub fn gains(&self) -> &[f64] {
        &self.gains
    }

    /// Total probability mass over all outcomes.
    ///
    /// Equals the product of per-bout (red + blue) probability sums, so it
    /// is 1 exactly when every bout's probabilities are complementary.
    pub fn probability_mass(&self) -> f64 {
        self.probabilities.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::Bout;

    fn two_bout_card() -> FightCard {
        FightCard::new(vec![
            Bout::new(0.6, 0.4, 150, -170).unwrap(),
            Bout::new(0.55, 0.45, -120, 100).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_dimensions() {
        let space = OutcomeSpace::build(&two_bout_card());
        assert_eq!(space.bouts(), 2);
        assert_eq!(space.num_outcomes(), 4);
        assert_eq!(space.num_wagers(), 4);
        assert_eq!(space.probabilities().len(), 4);
        assert_eq!(space.gains().len(), 4);
    }

    #[test]
    fn test_outcome_zero_is_all_blue() {
        let space = OutcomeSpace::build(&two_bout_card());
        // k = 0: both blue corners win, so red wagers lose their stake
        // and blue wagers pay their quoted gain.
        let row = space.outcome_row(0);
        assert_eq!(row[0], -1.0);
        assert!((row[1] - 100.0 / 170.0).abs() < 1e-12);
        assert_eq!(row[2], -1.0);
        assert!((row[3] - 1.0).abs() < 1e-12);
        assert!((space.probabilities()[0] - 0.4 * 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_outcome_one_flips_first_bout() {
        let space = OutcomeSpace::build(&two_bout_card());
        // k = 1: bit 0 set, so red wins bout 0 and blue wins bout 1.
        let row = space.outcome_row(1);
        assert!((row[0] - 1.5).abs() < 1e-12);
        assert_eq!(row[1], -1.0);
        assert_eq!(row[2], -1.0);
        assert!((row[3] - 1.0).abs() < 1e-12);
        assert!((space.probabilities()[1] - 0.6 * 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_probability_mass_is_product_of_bout_sums() {
        let space = OutcomeSpace::build(&two_bout_card());
        let expected = (0.6 + 0.4) * (0.55 + 0.45);
        assert!((space.probability_mass() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_empty_card_has_single_certain_outcome() {
        let space = OutcomeSpace::build(&FightCard::new(vec![]).unwrap());
        assert_eq!(space.num_outcomes(), 1);
        assert_eq!(space.num_wagers(), 0);
        assert_eq!(space.probabilities(), &[1.0]);
        assert!(space.outcome_row(0).is_empty());
    }
}
