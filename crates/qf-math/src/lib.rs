//! # qf-math
//!
//! Mathematical building blocks for the pricing engines: a matrix newtype
//! over nalgebra, Cholesky factorization, the normal distribution,
//! piecewise-linear interpolation, uniform random streams (pseudorandom
//! and quasirandom), and a streaming statistics accumulator.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// 1-D piecewise-linear interpolation.
pub mod interpolation;

/// Matrix factorizations.
pub mod linalg;

/// Dense matrix newtype.
pub mod matrix;

/// Uniform random streams.
pub mod random;

/// Streaming statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use interpolation::LinearInterpolation;
pub use linalg::cholesky;
pub use matrix::Matrix;
pub use random::{PseudoRandomRng, SobolRng, UniformRng};
pub use statistics::SampleStatistics;
