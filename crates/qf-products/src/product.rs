//! Product traits.

use crate::path::SimulationPath;
use qf_core::{Real, Time};

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// The payoff sign ω: +1 for calls, −1 for puts.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Immediate-exercise value `max(ω·(spot − strike), 0)`.
    #[inline]
    pub fn intrinsic(self, spot: Real, strike: Real) -> Real {
        (self.sign() * (spot - strike)).max(0.0)
    }
}

/// A contract with a fixed observation schedule.
///
/// Fixing times are strictly increasing and positive; the last one is
/// the expiry, where the (single) payment occurs.
pub trait Product: Send + Sync {
    /// Number of underlying assets.
    fn n_assets(&self) -> usize {
        1
    }

    /// Observation times of the contract, strictly increasing, all > 0.
    fn fixing_times(&self) -> &[Time];

    /// Time of the final fixing (and of the payment).
    fn expiry(&self) -> Time {
        *self
            .fixing_times()
            .last()
            .expect("product has at least one fixing time")
    }
}

/// A product priceable by simulation: maps one simulated path to its
/// (undiscounted) payoff at expiry.
pub trait PathProduct: Product {
    /// Payoff of the path, paid at [`Product::expiry`].
    fn payoff(&self, path: &SimulationPath) -> Real;
}

/// A single-asset product priceable on a finite-difference grid.
pub trait GridProduct: Product {
    /// Terminal condition: contract value at expiry for a given spot.
    fn terminal_value(&self, spot: Real) -> Real;

    /// Value at a grid node given the continuation value from the
    /// backward induction. The default keeps the continuation value
    /// (no early exercise); American-style products override this with
    /// the pointwise maximum against immediate exercise.
    fn early_exercise_value(&self, t: Time, spot: Real, continuation: Real) -> Real {
        let _ = (t, spot);
        continuation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intrinsic_values() {
        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
    }
}
