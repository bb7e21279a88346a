//! # qf-methods
//!
//! The numerical pricing engines: a Monte Carlo simulation framework
//! (single- and multi-asset, pseudorandom and quasirandom, optionally
//! parallel) and a theta-scheme finite-difference PDE solver with
//! early-exercise support.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Monte Carlo path generation and simulation.
pub mod montecarlo;

/// Finite-difference PDE pricing.
pub mod pde;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use montecarlo::{
    CancelFlag, EulerPathGenerator, McParams, McResult, MonteCarloEngine, PathGenType, UrngType,
};
pub use pde::{Pde1dSolver, PdeParams, PdeResults, TridiagonalSystem};
