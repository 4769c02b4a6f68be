//! Property-Based Tests - Sizing Pipeline Invariants
//!
//! Uses `proptest` to verify that the sizing pipeline maintains its
//! staking invariants across random fight cards.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use rust_decimal_macros::dec;

use simkelly::adapters::solver::{ProjectedGradientConfig, ProjectedGradientSolver};
use simkelly::domain::{AmericanOdds, Bout, FightCard, OutcomeSpace, StakingConfig};
use simkelly::usecases::bet_sizer::BetSizer;

fn arb_odds() -> impl Strategy<Value = i32> {
    prop_oneof![100..=300i32, -300..=-100i32]
}

fn arb_bout() -> impl Strategy<Value = Bout> {
    (0.15f64..0.85, arb_odds(), arb_odds())
        .prop_map(|(p, red, blue)| Bout::new(p, 1.0 - p, red, blue).unwrap())
}

fn arb_card() -> impl Strategy<Value = FightCard> {
    prop::collection::vec(arb_bout(), 1..=3).prop_map(|bouts| FightCard::new(bouts).unwrap())
}

fn robust_solver() -> ProjectedGradientSolver {
    ProjectedGradientSolver::new(ProjectedGradientConfig {
        max_iterations: 20_000,
        tolerance: 1e-7,
        ..ProjectedGradientConfig::default()
    })
}

fn sizer(staking: StakingConfig) -> BetSizer<ProjectedGradientSolver> {
    BetSizer::new(robust_solver(), staking).unwrap()
}

// ── Odds Properties ─────────────────────────────────────────

proptest! {
    /// Every legal American quote maps to a positive gain and an
    /// implied probability strictly inside the unit interval.
    #[test]
    fn odds_normalize_into_positive_gains(
        raw in prop_oneof![1..=100_000i32, -100_000..=-1i32],
    ) {
        let odds = AmericanOdds::new(raw).unwrap();
        prop_assert!(odds.proportional_gain() > 0.0);
        let implied = odds.implied_probability();
        prop_assert!(implied > 0.0 && implied < 1.0, "implied {implied}");
    }
}

// ── Outcome Space Properties ────────────────────────────────

proptest! {
    /// Complementary per-bout probabilities make the joint distribution
    /// sum to one.
    #[test]
    fn probability_mass_sums_to_one(card in arb_card()) {
        let space = OutcomeSpace::build(&card);
        prop_assert!((space.probability_mass() - 1.0).abs() < 1e-9);
    }
}

// ── Pipeline Invariants ─────────────────────────────────────

proptest! {
    /// Total stake never exceeds the budget fraction of bankroll
    /// (beyond cent rounding).
    #[test]
    fn total_stake_stays_within_budget(
        card in arb_card(),
        bankroll in 100.0f64..50_000.0,
    ) {
        let sheet = sizer(StakingConfig::default())
            .size_card(&card, bankroll)
            .unwrap();
        let budget = Decimal::try_from(0.15 * bankroll).unwrap();
        prop_assert!(
            sheet.total_staked <= budget + dec!(0.10),
            "total {} breaches budget {}",
            sheet.total_staked,
            budget
        );
    }

    /// Every wager is exactly zero or at least the minimum bet.
    #[test]
    fn wagers_clear_the_minimum_or_vanish(
        card in arb_card(),
        bankroll in 100.0f64..50_000.0,
    ) {
        let sheet = sizer(StakingConfig::default())
            .size_card(&card, bankroll)
            .unwrap();
        for w in sheet.red_wagers.iter().chain(sheet.blue_wagers.iter()) {
            prop_assert!(
                *w == Decimal::ZERO || *w >= dec!(0.10),
                "wager {} in the dead zone",
                w
            );
        }
    }

    /// No wager can pay out above the configured ceiling.
    #[test]
    fn payouts_respect_the_cap(
        card in arb_card(),
        bankroll in 1_000.0f64..50_000.0,
    ) {
        let staking = StakingConfig {
            max_payout: 50.0,
            ..StakingConfig::default()
        };
        let sheet = sizer(staking).size_card(&card, bankroll).unwrap();

        let cap = dec!(50);
        for (i, bout) in card.bouts().iter().enumerate() {
            let red_gain = Decimal::from_f64(bout.red_odds.proportional_gain()).unwrap();
            let blue_gain = Decimal::from_f64(bout.blue_odds.proportional_gain()).unwrap();
            prop_assert!(sheet.red_wagers[i] * red_gain <= cap);
            prop_assert!(sheet.blue_wagers[i] * blue_gain <= cap);
        }
    }

    /// Identical snapshots produce identical sheets.
    #[test]
    fn sizing_is_deterministic(
        card in arb_card(),
        bankroll in 100.0f64..50_000.0,
    ) {
        let first = sizer(StakingConfig::default())
            .size_card(&card, bankroll)
            .unwrap();
        let second = sizer(StakingConfig::default())
            .size_card(&card, bankroll)
            .unwrap();
        prop_assert_eq!(&first.red_wagers, &second.red_wagers);
        prop_assert_eq!(&first.blue_wagers, &second.blue_wagers);
    }
}
