//! `YieldCurve` — an interpolated term structure of discount factors.
//!
//! The curve stores `(maturity, value)` pillars where the values are
//! zero rates, discount factors, or period forward rates depending on a
//! construction-time flag. Internally everything is converted to log
//! discount factors anchored at `ln P(0) = 0`, and queries interpolate
//! **log-linearly on discount factors** — the arbitrage-consistent
//! convention, equivalent to piecewise-constant instantaneous forwards.
//! Beyond the last pillar the last segment's slope is continued, i.e.
//! the final instantaneous forward rate is held flat.

use qf_core::{ensure, errors::Result, DiscountFactor, Rate, Real, Time};
use qf_math::interpolation::LinearInterpolation;

/// How the construction values are to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YieldCurveInput {
    /// Values are continuously compounded zero (spot) rates.
    ZeroRate,
    /// Values are discount factors.
    DiscountFactor,
    /// Values are continuously compounded forward rates, each spanning
    /// the interval from the previous pillar (or 0) to its own.
    ForwardRate,
}

/// An immutable yield curve defined by discount factors at known
/// maturities.
#[derive(Debug, Clone)]
pub struct YieldCurve {
    /// Pillar maturities (strictly increasing, first > 0).
    times: Vec<Time>,
    /// Log discount factors at the pillars.
    log_discounts: Vec<Real>,
    /// Interpolation over (0, times…) × (0, log_discounts…).
    interp: LinearInterpolation,
}

impl YieldCurve {
    /// Build a curve from maturities and values.
    ///
    /// Validation happens before any allocation: maturities must be
    /// strictly increasing with the first strictly positive, values must
    /// be finite, and discount-factor inputs must be strictly positive.
    pub fn new(tmats: &[Time], vals: &[Real], input: YieldCurveInput) -> Result<Self> {
        ensure!(!tmats.is_empty(), InvalidArgument, "curve needs at least one pillar");
        ensure!(
            tmats.len() == vals.len(),
            InvalidArgument,
            "pillar size mismatch: {} maturities vs {} values",
            tmats.len(),
            vals.len()
        );
        ensure!(tmats[0] > 0.0, Domain, "first maturity must be positive, got {}", tmats[0]);
        for w in tmats.windows(2) {
            ensure!(
                w[1] > w[0],
                Domain,
                "maturities must be strictly increasing, got {} after {}",
                w[1],
                w[0]
            );
        }
        for &v in vals {
            ensure!(v.is_finite(), Domain, "curve value must be finite, got {v}");
            if input == YieldCurveInput::DiscountFactor {
                ensure!(v > 0.0, Domain, "discount factor must be positive, got {v}");
            }
        }

        let mut log_discounts = Vec::with_capacity(vals.len());
        match input {
            YieldCurveInput::ZeroRate => {
                for (&t, &z) in tmats.iter().zip(vals) {
                    log_discounts.push(-z * t);
                }
            }
            YieldCurveInput::DiscountFactor => {
                for &df in vals {
                    log_discounts.push(df.ln());
                }
            }
            YieldCurveInput::ForwardRate => {
                let mut acc = 0.0;
                let mut prev_t = 0.0;
                for (&t, &f) in tmats.iter().zip(vals) {
                    acc -= f * (t - prev_t);
                    log_discounts.push(acc);
                    prev_t = t;
                }
            }
        }

        // Anchor the interpolation at (0, ln 1) so the short end is a
        // genuine segment rather than an extrapolation.
        let mut xs = Vec::with_capacity(tmats.len() + 1);
        let mut ys = Vec::with_capacity(tmats.len() + 1);
        xs.push(0.0);
        ys.push(0.0);
        xs.extend_from_slice(tmats);
        ys.extend_from_slice(&log_discounts);
        let interp = LinearInterpolation::new(&xs, &ys)?;

        Ok(Self {
            times: tmats.to_vec(),
            log_discounts,
            interp,
        })
    }

    /// Pillar maturities.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Discount factors at the pillar maturities.
    pub fn pillar_discounts(&self) -> Vec<DiscountFactor> {
        self.log_discounts.iter().map(|&ld| ld.exp()).collect()
    }

    /// The last pillar maturity.
    pub fn max_time(&self) -> Time {
        *self.times.last().expect("curve has at least one pillar")
    }

    /// Log discount factor at `t ≥ 0` (interpolated / extrapolated).
    fn log_discount(&self, t: Time) -> Real {
        self.interp.value(t)
    }

    /// Discount factor `P(t)`.
    ///
    /// Fails with a domain error for negative maturities; `P(0) = 1`
    /// exactly. Beyond the last pillar the last forward rate is held
    /// flat.
    pub fn discount(&self, tmat: Time) -> Result<DiscountFactor> {
        ensure!(tmat >= 0.0, Domain, "maturity must be non-negative, got {tmat}");
        if tmat == 0.0 {
            return Ok(1.0);
        }
        Ok(self.log_discount(tmat).exp())
    }

    /// Forward discount factor `P(t2)/P(t1)` between two maturities.
    pub fn fwd_discount(&self, tmat1: Time, tmat2: Time) -> Result<DiscountFactor> {
        ensure!(tmat1 >= 0.0, Domain, "first maturity must be non-negative, got {tmat1}");
        ensure!(
            tmat2 > tmat1,
            Domain,
            "second maturity ({tmat2}) must exceed the first ({tmat1})"
        );
        Ok((self.log_discount(tmat2) - self.log_discount(tmat1)).exp())
    }

    /// Continuously compounded spot (zero) rate for maturity `t > 0`:
    /// `-ln P(t) / t`.
    pub fn spot_rate(&self, tmat: Time) -> Result<Rate> {
        ensure!(tmat > 0.0, Domain, "spot rate needs a positive maturity, got {tmat}");
        Ok(-self.log_discount(tmat) / tmat)
    }

    /// Continuously compounded forward rate between `tmat1` and `tmat2`:
    /// `ln(P(t1)/P(t2)) / (t2 − t1)`.
    pub fn forward_rate(&self, tmat1: Time, tmat2: Time) -> Result<Rate> {
        ensure!(tmat1 >= 0.0, Domain, "first maturity must be non-negative, got {tmat1}");
        ensure!(
            tmat2 > tmat1,
            Domain,
            "second maturity ({tmat2}) must exceed the first ({tmat1})"
        );
        Ok((self.log_discount(tmat1) - self.log_discount(tmat2)) / (tmat2 - tmat1))
    }
}
