//! Error types for quantfin.
//!
//! A single `thiserror`-derived enum covers the whole engine. The variants
//! partition failures by cause rather than by module:
//!
//! * [`Error::Domain`] — an input outside its valid range (negative time,
//!   non-increasing maturities, a theta weight outside `[0, 1]`, …)
//! * [`Error::Numerical`] — an algorithm that cannot proceed on otherwise
//!   well-formed input (Cholesky on a non-positive-definite matrix, a
//!   singular tridiagonal pivot, …)
//! * [`Error::NotFound`] — a name absent from a market registry
//! * [`Error::Configuration`] — an unsupported engine configuration
//! * [`Error::InvalidArgument`] — mismatched shapes and sizes
//!
//! All public operations validate their inputs against this taxonomy before
//! any mutation or allocation takes place.

use thiserror::Error;

/// The top-level error type used throughout quantfin.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// An input value outside its mathematically valid range.
    #[error("domain error: {0}")]
    Domain(String),

    /// A numerical algorithm failed on well-formed input.
    #[error("numerical error: {0}")]
    Numerical(String),

    /// A named object is absent from its registry.
    #[error("not found: {0}")]
    NotFound(String),

    /// An unsupported or inconsistent engine configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Mismatched argument shapes or sizes.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shorthand `Result` type used throughout quantfin.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return early with the given error variant unless `$cond` holds.
///
/// # Example
/// ```
/// use qf_core::{ensure, errors::Result};
/// fn positive(x: f64) -> Result<f64> {
///     ensure!(x > 0.0, Domain, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(positive(-1.0).is_err());
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $variant:ident, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::$variant(
                format!($($msg)*)
            ));
        }
    };
}

/// Return early with the given error variant.
///
/// # Example
/// ```
/// use qf_core::{fail, errors::Result};
/// fn always_err() -> Result<()> {
///     fail!(Configuration, "unsupported option");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($variant:ident, $($msg:tt)*) => {
        return Err($crate::errors::Error::$variant(format!($($msg)*)))
    };
}
