//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! numerical machinery. Each sub-module groups adapters by concern.
//!
//! Adapter categories:
//! - `solver`: Projected gradient maximization of expected log growth

pub mod solver;
