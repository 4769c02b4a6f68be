//! Domain layer - Core bet-sizing logic and models.
//!
//! This module contains the pure sizing pipeline for a fight card.
//! No external dependencies allowed here (hexagonal architecture inner ring).
//! All types are serializable and testable in isolation.

pub mod card;
pub mod error;
pub mod growth;
pub mod odds;
pub mod outcomes;
pub mod wagers;

// Re-export core types for convenience
pub use card::{Bout, CardSnapshot, FightCard, MAX_BOUTS};
pub use error::SizingError;
pub use growth::GrowthProgram;
pub use odds::AmericanOdds;
pub use outcomes::OutcomeSpace;
pub use wagers::{StakingConfig, WagerSheet};
