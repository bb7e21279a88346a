//! # qf-products
//!
//! Payoff definitions decoupled from the engines that price them.
//!
//! A [`Product`] fixes the observation schedule; the two pricing
//! capabilities are separate traits at the engine seams:
//!
//! * [`PathProduct`] — evaluated on a simulated price path (Monte Carlo)
//! * [`GridProduct`] — evaluated node-by-node on a finite-difference
//!   grid, with an early-exercise hook
//!
//! A product implements whichever capabilities make sense: the European
//! option implements both, the American option only the grid form (there
//! is no early-exercise Monte Carlo here), the Asian basket only the
//! path form.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Asian basket options.
pub mod asian_basket;

/// Simulated price paths.
pub mod path;

/// Product traits and the option-type enum.
pub mod product;

/// Vanilla European and American options.
pub mod vanilla;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use asian_basket::AsianBasketCallPut;
pub use path::SimulationPath;
pub use product::{GridProduct, OptionType, PathProduct, Product};
pub use vanilla::{AmericanCallPut, EuropeanCallPut};
