//! # quantfin
//!
//! A quantitative-finance analytics engine: named yield curves, Monte
//! Carlo simulation (single- and multi-asset, pseudorandom and
//! quasirandom), and theta-scheme finite-difference PDE pricing with
//! American exercise.
//!
//! This crate is a **façade** that re-exports the workspace crates and
//! adds the top-level pricing entry points in [`pricing`]. Application
//! code should depend on this crate rather than the individual `qf-*`
//! crates.
//!
//! ## Quick start
//!
//! ```rust
//! use quantfin::market::{Market, YieldCurve, YieldCurveInput};
//! use quantfin::methods::PdeParams;
//! use quantfin::products::OptionType;
//! use quantfin::pricing::price_european_pde;
//!
//! let market = Market::new();
//! let curve = YieldCurve::new(&[1.0, 5.0], &[0.04, 0.045], YieldCurveInput::ZeroRate)?;
//! market.insert_yield_curve("USD", curve);
//!
//! let result = price_european_pde(
//!     OptionType::Call,
//!     100.0, // strike
//!     1.0,   // time to expiry
//!     100.0, // spot
//!     &market,
//!     "USD",
//!     0.02, // dividend yield
//!     0.4,  // volatility
//!     &PdeParams::default(),
//! )?;
//! assert!(result.price > 0.0);
//! # Ok::<(), quantfin::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use qf_core as core;

/// Mathematical utilities: linear algebra, distributions, RNG, statistics.
pub use qf_math as math;

/// Market data: yield curves, volatility structures, the named registry.
pub use qf_market as market;

/// Payoff definitions.
pub use qf_products as products;

/// Numerical pricing methods: Monte Carlo and PDE.
pub use qf_methods as methods;

pub mod pricing;
