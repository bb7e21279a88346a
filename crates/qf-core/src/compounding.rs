//! Conversions between periodically compounded and continuously
//! compounded rates.
//!
//! Curve pillars and all internal engine math use continuous compounding;
//! these helpers let callers quote in annual, semi-annual, etc. terms.

use crate::errors::Result;
use crate::{Rate, Real};

/// Convert a rate compounded `periods_per_year` times per year to its
/// continuously compounded equivalent: `f · ln(1 + r/f)`.
pub fn to_continuous(rate: Rate, periods_per_year: u32) -> Result<Rate> {
    crate::ensure!(periods_per_year > 0, Domain, "compounding frequency must be positive");
    let f = periods_per_year as Real;
    crate::ensure!(
        rate / f > -1.0,
        Domain,
        "rate {rate} is below the -100% bound for frequency {periods_per_year}"
    );
    Ok(f * (1.0 + rate / f).ln())
}

/// Convert a continuously compounded rate to its equivalent compounded
/// `periods_per_year` times per year: `f · (e^(r/f) − 1)`.
pub fn from_continuous(rate: Rate, periods_per_year: u32) -> Result<Rate> {
    crate::ensure!(periods_per_year > 0, Domain, "compounding frequency must be positive");
    let f = periods_per_year as Real;
    Ok(f * ((rate / f).exp() - 1.0))
}
