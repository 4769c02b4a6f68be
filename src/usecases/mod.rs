//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement the
//! engine's core workflow. Each use case is a self-contained business
//! operation.
//!
//! Use cases:
//! - `BetSizer`: Probability + odds snapshot in, wager sheet out

pub mod bet_sizer;
