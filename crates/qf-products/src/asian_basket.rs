//! Asian basket call/put: an option on the arithmetic average of a
//! weighted basket observed at a schedule of fixing times.

use crate::path::SimulationPath;
use crate::product::{OptionType, PathProduct, Product};
use qf_core::{ensure, errors::Result, Real, Time};

/// An Asian option on a basket of assets.
///
/// At each fixing the basket value is `Σᵢ qᵢ·Sᵢ`; the payoff at expiry is
/// the intrinsic value of the arithmetic average of those basket values.
#[derive(Debug, Clone)]
pub struct AsianBasketCallPut {
    option_type: OptionType,
    strike: Real,
    fixing_times: Vec<Time>,
    quantities: Vec<Real>,
}

impl AsianBasketCallPut {
    /// Create an Asian basket option.
    ///
    /// `fixing_times` must be strictly increasing and positive;
    /// `quantities` holds one weight per basket asset.
    pub fn new(
        option_type: OptionType,
        strike: Real,
        fixing_times: &[Time],
        quantities: &[Real],
    ) -> Result<Self> {
        ensure!(strike > 0.0, Domain, "strike must be positive, got {strike}");
        ensure!(!fixing_times.is_empty(), InvalidArgument, "need at least one fixing time");
        ensure!(!quantities.is_empty(), InvalidArgument, "need at least one asset quantity");
        ensure!(
            fixing_times[0] > 0.0,
            Domain,
            "first fixing time must be positive, got {}",
            fixing_times[0]
        );
        for w in fixing_times.windows(2) {
            ensure!(
                w[1] > w[0],
                Domain,
                "fixing times must be strictly increasing, got {} after {}",
                w[1],
                w[0]
            );
        }
        for &q in quantities {
            ensure!(q.is_finite(), Domain, "asset quantity must be finite, got {q}");
        }
        Ok(Self {
            option_type,
            strike,
            fixing_times: fixing_times.to_vec(),
            quantities: quantities.to_vec(),
        })
    }

    /// The strike price.
    pub fn strike(&self) -> Real {
        self.strike
    }

    /// Basket weights.
    pub fn quantities(&self) -> &[Real] {
        &self.quantities
    }
}

impl Product for AsianBasketCallPut {
    fn n_assets(&self) -> usize {
        self.quantities.len()
    }

    fn fixing_times(&self) -> &[Time] {
        &self.fixing_times
    }
}

impl PathProduct for AsianBasketCallPut {
    fn payoff(&self, path: &SimulationPath) -> Real {
        let mut avg = 0.0;
        for k in 0..path.n_fixings() {
            let spots = path.fixing(k);
            let basket: Real = self
                .quantities
                .iter()
                .zip(spots)
                .map(|(&q, &s)| q * s)
                .sum();
            avg += basket;
        }
        avg /= path.n_fixings() as Real;
        self.option_type.intrinsic(avg, self.strike)
    }
}
