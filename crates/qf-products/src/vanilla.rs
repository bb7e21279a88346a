//! Vanilla European and American call/put options.

use crate::path::SimulationPath;
use crate::product::{GridProduct, OptionType, PathProduct, Product};
use qf_core::{ensure, errors::Result, Real, Time};

/// A European call or put: exercise only at expiry.
#[derive(Debug, Clone)]
pub struct EuropeanCallPut {
    option_type: OptionType,
    strike: Real,
    fixing_times: Vec<Time>,
}

impl EuropeanCallPut {
    /// Create a European option.
    pub fn new(option_type: OptionType, strike: Real, time_to_expiry: Time) -> Result<Self> {
        ensure!(strike > 0.0, Domain, "strike must be positive, got {strike}");
        ensure!(
            time_to_expiry > 0.0,
            Domain,
            "time to expiry must be positive, got {time_to_expiry}"
        );
        Ok(Self {
            option_type,
            strike,
            fixing_times: vec![time_to_expiry],
        })
    }

    /// The strike price.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }
}

impl Product for EuropeanCallPut {
    fn fixing_times(&self) -> &[Time] {
        &self.fixing_times
    }
}

impl PathProduct for EuropeanCallPut {
    fn payoff(&self, path: &SimulationPath) -> Real {
        self.option_type.intrinsic(path.terminal()[0], self.strike)
    }
}

impl GridProduct for EuropeanCallPut {
    fn terminal_value(&self, spot: Real) -> Real {
        self.option_type.intrinsic(spot, self.strike)
    }
}

/// An American call or put: exercisable at any time up to expiry.
///
/// Priced on the PDE grid only, where the exercise decision is the
/// pointwise maximum of continuation and intrinsic value at every node.
#[derive(Debug, Clone)]
pub struct AmericanCallPut {
    option_type: OptionType,
    strike: Real,
    fixing_times: Vec<Time>,
}

impl AmericanCallPut {
    /// Create an American option.
    pub fn new(option_type: OptionType, strike: Real, time_to_expiry: Time) -> Result<Self> {
        ensure!(strike > 0.0, Domain, "strike must be positive, got {strike}");
        ensure!(
            time_to_expiry > 0.0,
            Domain,
            "time to expiry must be positive, got {time_to_expiry}"
        );
        Ok(Self {
            option_type,
            strike,
            fixing_times: vec![time_to_expiry],
        })
    }

    /// The strike price.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }
}

impl Product for AmericanCallPut {
    fn fixing_times(&self) -> &[Time] {
        &self.fixing_times
    }
}

impl GridProduct for AmericanCallPut {
    fn terminal_value(&self, spot: Real) -> Real {
        self.option_type.intrinsic(spot, self.strike)
    }

    fn early_exercise_value(&self, _t: Time, spot: Real, continuation: Real) -> Real {
        continuation.max(self.option_type.intrinsic(spot, self.strike))
    }
}
