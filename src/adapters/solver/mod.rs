//! Solver Adapters - Numerical Optimization Backends
//!
//! Implements the GrowthSolver port with an in-process projected
//! gradient routine. No external solver dependency: the feasible set is
//! a truncated simplex with a cheap exact projection, so a first-order
//! method is enough at fight-card scale.

pub mod projected_gradient;

pub use projected_gradient::{ProjectedGradientConfig, ProjectedGradientSolver};
