//! `VolatilityTermStructure` — a term structure of Black volatilities.
//!
//! Pillars carry either spot (cumulative) vols or forward vols; both are
//! converted to total variance `σ²(t)·t` at construction. Queries
//! interpolate **linearly in total variance**, the no-arbitrage analogue
//! of the yield curve's log-linear discounts: forward variance between
//! two maturities is a plain difference. Beyond the last pillar the last
//! forward variance is held flat.

use qf_core::{ensure, errors::Result, Real, Time, Volatility};
use qf_math::interpolation::LinearInterpolation;

/// How the construction values are to be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolInput {
    /// Values are spot volatilities from time 0 to each pillar.
    SpotVol,
    /// Values are forward volatilities, each spanning the interval from
    /// the previous pillar (or 0) to its own.
    FwdVol,
}

/// An immutable volatility term structure over total variance pillars.
#[derive(Debug, Clone)]
pub struct VolatilityTermStructure {
    times: Vec<Time>,
    variances: Vec<Real>,
    interp: LinearInterpolation,
}

impl VolatilityTermStructure {
    /// Build a term structure from maturities and volatilities.
    ///
    /// Spot-vol inputs must imply non-decreasing total variance; a
    /// decrease means a negative forward variance, which is rejected as
    /// a numerical error (the inputs are individually well-formed but
    /// jointly inconsistent).
    pub fn new(tmats: &[Time], vols: &[Volatility], input: VolInput) -> Result<Self> {
        ensure!(!tmats.is_empty(), InvalidArgument, "vol curve needs at least one pillar");
        ensure!(
            tmats.len() == vols.len(),
            InvalidArgument,
            "pillar size mismatch: {} maturities vs {} vols",
            tmats.len(),
            vols.len()
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
        for &v in vols {
            ensure!(v.is_finite() && v >= 0.0, Domain, "volatility must be non-negative, got {v}");
        }

        let mut variances = Vec::with_capacity(vols.len());
        match input {
            VolInput::SpotVol => {
                let mut prev = 0.0;
                for (i, (&t, &v)) in tmats.iter().zip(vols).enumerate() {
                    let var = v * v * t;
                    ensure!(
                        var >= prev,
                        Numerical,
                        "negative forward variance implied at pillar {i} (t = {t})"
                    );
                    variances.push(var);
                    prev = var;
                }
            }
            VolInput::FwdVol => {
                let mut acc = 0.0;
                let mut prev_t = 0.0;
                for (&t, &v) in tmats.iter().zip(vols) {
                    acc += v * v * (t - prev_t);
                    variances.push(acc);
                    prev_t = t;
                }
            }
        }

        let mut xs = Vec::with_capacity(tmats.len() + 1);
        let mut ys = Vec::with_capacity(tmats.len() + 1);
        xs.push(0.0);
        ys.push(0.0);
        xs.extend_from_slice(tmats);
        ys.extend_from_slice(&variances);
        let interp = LinearInterpolation::new(&xs, &ys)?;

        Ok(Self {
            times: tmats.to_vec(),
            variances,
            interp,
        })
    }

    /// Pillar maturities.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Total variance `σ²(t)·t` at `t ≥ 0`.
    pub fn variance(&self, tmat: Time) -> Result<Real> {
        ensure!(tmat >= 0.0, Domain, "maturity must be non-negative, got {tmat}");
        if tmat == 0.0 {
            return Ok(0.0);
        }
        Ok(self.interp.value(tmat))
    }

    /// Spot volatility from 0 to `tmat`.
    ///
    /// At `tmat = 0` the short-end limit (the first interval's forward
    /// vol) is returned.
    pub fn spot_vol(&self, tmat: Time) -> Result<Volatility> {
        ensure!(tmat >= 0.0, Domain, "maturity must be non-negative, got {tmat}");
        if tmat == 0.0 {
            return Ok((self.variances[0] / self.times[0]).sqrt());
        }
        Ok((self.variance(tmat)? / tmat).sqrt())
    }

    /// Forward volatility between `tmat1` and `tmat2`.
    pub fn fwd_vol(&self, tmat1: Time, tmat2: Time) -> Result<Volatility> {
        ensure!(tmat1 >= 0.0, Domain, "first maturity must be non-negative, got {tmat1}");
        ensure!(
            tmat2 > tmat1,
            Domain,
            "second maturity ({tmat2}) must exceed the first ({tmat1})"
        );
        let dvar = self.variance(tmat2)? - self.variance(tmat1)?;
        Ok((dvar.max(0.0) / (tmat2 - tmat1)).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TMATS: [f64; 4] = [0.5, 1.0, 2.0, 5.0];

    #[test]
    fn flat_spot_vols_give_flat_forwards() {
        let vts = VolatilityTermStructure::new(&TMATS, &[0.2; 4], VolInput::SpotVol).unwrap();
        assert_abs_diff_eq!(vts.spot_vol(1.5).unwrap(), 0.2, epsilon = 1e-14);
        assert_abs_diff_eq!(vts.fwd_vol(1.0, 2.0).unwrap(), 0.2, epsilon = 1e-13);
        // Flat forward-vol extrapolation
        assert_abs_diff_eq!(vts.spot_vol(10.0).unwrap(), 0.2, epsilon = 1e-13);
    }

    #[test]
    fn fwd_vol_input_accumulates_variance() {
        let fwds = [0.2, 0.3, 0.25, 0.25];
        let vts = VolatilityTermStructure::new(&TMATS, &fwds, VolInput::FwdVol).unwrap();
        // Total variance at t=1: 0.2²·0.5 + 0.3²·0.5
        let var1 = vts.variance(1.0).unwrap();
        assert_abs_diff_eq!(var1, 0.04 * 0.5 + 0.09 * 0.5, epsilon = 1e-14);
        assert_abs_diff_eq!(vts.fwd_vol(0.5, 1.0).unwrap(), 0.3, epsilon = 1e-13);
    }

    #[test]
    fn spot_vol_short_end_limit() {
        let vts = VolatilityTermStructure::new(&TMATS, &[0.2; 4], VolInput::SpotVol).unwrap();
        assert_abs_diff_eq!(vts.spot_vol(0.0).unwrap(), 0.2, epsilon = 1e-14);
    }

    #[test]
    fn decreasing_spot_vol_can_be_inconsistent() {
        // Spot vol falling fast enough implies negative forward variance
        let res = VolatilityTermStructure::new(&[1.0, 2.0], &[0.4, 0.2], VolInput::SpotVol);
        assert!(res.is_err());
    }

    #[test]
    fn domain_errors() {
        let vts = VolatilityTermStructure::new(&TMATS, &[0.2; 4], VolInput::SpotVol).unwrap();
        assert!(vts.spot_vol(-1.0).is_err());
        assert!(vts.fwd_vol(2.0, 1.0).is_err());
        assert!(VolatilityTermStructure::new(&[1.0], &[-0.1], VolInput::SpotVol).is_err());
    }
}
