//! # qf-market
//!
//! Market data: interpolated yield curves, volatility term structures,
//! and the [`Market`] registry that stores them by name.
//!
//! Curves are keyed by year fractions from the valuation date and are
//! immutable after construction; the registry hands out shared handles.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// The named market registry.
pub mod market;

/// Volatility term structures.
pub mod volatility;

/// Yield curves.
pub mod yield_curve;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use market::{Market, MarketContents};
pub use volatility::{VolInput, VolatilityTermStructure};
pub use yield_curve::{YieldCurve, YieldCurveInput};
