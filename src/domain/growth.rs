//! Expected log-growth objective for simultaneous wagers.
//!
//! Kelly (1956), "A New Interpretation of Information Rate": the stake
//! sizing that maximizes long-run bankroll growth maximizes the expected
//! log of the wealth multiplier. For a return matrix R and joint outcome
//! probabilities p this is
//!
//! ```text
//! G(b) = sum_k p_k * ln(1 + sum_j R[k][j] * b[j])
//! ```
//!
//! which is concave in the weight vector b, so any local maximizer over
//! the budget simplex is the global one.

use super::outcomes::OutcomeSpace;

/// Wealth multipliers at or below this are treated as ruin.
const MIN_MULTIPLIER: f64 = 1e-12;

/// Concave maximization program: expected log growth of the wealth
/// multiplier over an outcome space, subject to non-negative weights
/// summing to at most `budget`.
///
/// Weights are bankroll fractions. A weight vector whose multiplier
/// collapses to zero in any reachable outcome scores negative infinity,
/// so full-ruin corners of the feasible set are never optimal.
#[derive(Debug, Clone)]
pub struct GrowthProgram {
    space: OutcomeSpace,
    budget: f64,
}

impl GrowthProgram {
    /// Creates a program over `space` with total stake capped at `budget`.
    ///
    /// `budget` must be positive; validated staking fractions always are.
    pub fn new(space: OutcomeSpace, budget: f64) -> Self {
        debug_assert!(budget > 0.0, "budget must be positive, got {budget}");
        Self { space, budget }
    }

    /// The enumerated outcome space this program optimizes over.
    pub fn space(&self) -> &OutcomeSpace {
        &self.space
    }

    /// Upper bound on the sum of weights.
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Number of decision variables (one per wager slot).
    pub fn dimension(&self) -> usize {
        self.space.num_wagers()
    }

    /// Expected log of the wealth multiplier under `weights`.
    ///
    /// Outcomes with zero probability are skipped, so ruin in an impossible
    /// outcome does not poison the objective. Any reachable outcome whose
    /// multiplier falls to zero yields negative infinity.
    pub fn expected_log_growth(&self, weights: &[f64]) -> f64 {
        let mut total = 0.0;
        for (k, &p) in self.space.probabilities().iter().enumerate() {
            if p == 0.0 {
                continue;
            }
            let multiplier = 1.0 + dot(self.space.outcome_row(k), weights);
            if multiplier <= MIN_MULTIPLIER {
                return f64::NEG_INFINITY;
            }
            total += p * multiplier.ln();
        }
        total
    }

    /// Writes the gradient of the objective at `weights` into `grad`.
    ///
    /// The caller supplies a buffer of length `dimension()`. Outcomes with
    /// zero probability or a collapsed multiplier contribute nothing.
    pub fn gradient(&self, weights: &[f64], grad: &mut [f64]) {
        grad.fill(0.0);
        for (k, &p) in self.space.probabilities().iter().enumerate() {
            if p == 0.0 {
                continue;
            }
            let row = self.space.outcome_row(k);
            let multiplier = 1.0 + dot(row, weights);
            if multiplier <= MIN_MULTIPLIER {
                continue;
            }
            let coefficient = p / multiplier;
            for (g, &r) in grad.iter_mut().zip(row) {
                *g += coefficient * r;
            }
        }
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::{Bout, FightCard};

    fn even_money_program(budget: f64) -> GrowthProgram {
        let card = FightCard::new(vec![Bout::new(0.6, 0.4, 100, 100).unwrap()]).unwrap();
        GrowthProgram::new(OutcomeSpace::build(&card), budget)
    }

    #[test]
    fn test_zero_weights_score_zero_growth() {
        let card = FightCard::new(vec![
            Bout::new(0.6, 0.4, 150, -170).unwrap(),
            Bout::new(0.55, 0.45, -120, 100).unwrap(),
        ])
        .unwrap();
        let program = GrowthProgram::new(OutcomeSpace::build(&card), 0.15);
        assert_eq!(program.expected_log_growth(&[0.0; 4]), 0.0);
    }

    #[test]
    fn test_growth_at_closed_form_optimum() {
        let program = even_money_program(0.3);
        // Closed-form Kelly stake for the even-money bout: p - q = 0.2.
        let value = program.expected_log_growth(&[0.2, 0.0]);
        let expected = 0.6 * 1.2f64.ln() + 0.4 * 0.8f64.ln();
        assert!((value - expected).abs() < 1e-12, "got {value}");
    }

    #[test]
    fn test_gradient_at_origin_is_expected_return() {
        let program = even_money_program(0.3);
        let mut grad = vec![0.0; 2];
        program.gradient(&[0.0, 0.0], &mut grad);
        // At zero stake the gradient of each wager is its expected return:
        // p * gain - q for red, q * gain - p for blue.
        assert!((grad[0] - 0.2).abs() < 1e-12);
        assert!((grad[1] + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_gradient_matches_finite_differences() {
        let card = FightCard::new(vec![
            Bout::new(0.6, 0.4, 150, -170).unwrap(),
            Bout::new(0.55, 0.45, -120, 100).unwrap(),
        ])
        .unwrap();
        let program = GrowthProgram::new(OutcomeSpace::build(&card), 0.5);

        let point = [0.05, 0.02, 0.03, 0.04];
        let mut grad = vec![0.0; program.dimension()];
        program.gradient(&point, &mut grad);

        let h = 1e-7;
        for j in 0..program.dimension() {
            let mut up = point;
            let mut down = point;
            up[j] += h;
            down[j] -= h;
            let numeric = (program.expected_log_growth(&up)
                - program.expected_log_growth(&down))
                / (2.0 * h);
            assert!(
                (grad[j] - numeric).abs() < 1e-5,
                "component {j}: analytic {} vs numeric {numeric}",
                grad[j]
            );
        }
    }

    #[test]
    fn test_full_stake_into_reachable_loss_is_ruin() {
        let program = even_money_program(1.0);
        assert_eq!(
            program.expected_log_growth(&[1.0, 0.0]),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn test_impossible_outcome_does_not_poison_objective() {
        // Blue corner given zero probability: staking everything on red
        // only ruins in an outcome that can never happen.
        let card = FightCard::new(vec![Bout::new(1.0, 0.0, 100, -110).unwrap()]).unwrap();
        let program = GrowthProgram::new(OutcomeSpace::build(&card), 1.0);
        let value = program.expected_log_growth(&[1.0, 0.0]);
        assert!((value - 2.0f64.ln()).abs() < 1e-12, "got {value}");
    }

    #[test]
    #[should_panic(expected = "budget must be positive")]
    fn test_nonpositive_budget_is_rejected() {
        let space = OutcomeSpace::build(&FightCard::new(vec![]).unwrap());
        let _ = GrowthProgram::new(space, 0.0);
    }

    #[test]
    fn test_empty_card_program_scores_zero() {
        let space = OutcomeSpace::build(&FightCard::new(vec![]).unwrap());
        let program = GrowthProgram::new(space, 0.15);
        assert_eq!(program.dimension(), 0);
        assert_eq!(program.expected_log_growth(&[]), 0.0);
    }
}
