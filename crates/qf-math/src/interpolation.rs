//! 1-D piecewise-linear interpolation on strictly increasing abscissae.

use qf_core::{ensure, errors::Result, Real};

/// Piecewise-linear interpolation through `(x, y)` pillars.
///
/// Outside the pillar range the first/last segment is continued with its
/// own slope, so extrapolation is linear rather than flat. Callers that
/// need a different extrapolation policy (the yield curve does) apply it
/// in their own transformed space before delegating here.
#[derive(Debug, Clone)]
pub struct LinearInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
}

impl LinearInterpolation {
    /// Build an interpolation from pillar slices.
    ///
    /// Requires at least two pillars with strictly increasing `xs`.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        ensure!(xs.len() >= 2, InvalidArgument, "need at least 2 pillars, got {}", xs.len());
        ensure!(
            xs.len() == ys.len(),
            InvalidArgument,
            "pillar size mismatch: {} xs vs {} ys",
            xs.len(),
            ys.len()
        );
        for w in xs.windows(2) {
            ensure!(
                w[1] > w[0],
                Domain,
                "abscissae must be strictly increasing, got {} after {}",
                w[1],
                w[0]
            );
        }
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Interpolated (or linearly extrapolated) value at `x`.
    pub fn value(&self, x: Real) -> Real {
        let n = self.xs.len();
        // partition_point returns the number of pillars strictly below x
        let idx = self.xs.partition_point(|&p| p < x).clamp(1, n - 1);
        let (x0, x1) = (self.xs[idx - 1], self.xs[idx]);
        let (y0, y1) = (self.ys[idx - 1], self.ys[idx]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn hits_pillars_exactly() {
        let li = LinearInterpolation::new(&[0.0, 1.0, 3.0], &[1.0, 2.0, 0.0]).unwrap();
        assert_abs_diff_eq!(li.value(0.0), 1.0);
        assert_abs_diff_eq!(li.value(1.0), 2.0);
        assert_abs_diff_eq!(li.value(3.0), 0.0);
    }

    #[test]
    fn interpolates_between_pillars() {
        let li = LinearInterpolation::new(&[0.0, 2.0], &[0.0, 4.0]).unwrap();
        assert_abs_diff_eq!(li.value(0.5), 1.0);
        assert_abs_diff_eq!(li.value(1.5), 3.0);
    }

    #[test]
    fn extrapolates_with_end_slopes() {
        let li = LinearInterpolation::new(&[1.0, 2.0, 3.0], &[1.0, 2.0, 4.0]).unwrap();
        assert_abs_diff_eq!(li.value(0.0), 0.0); // first slope = 1
        assert_abs_diff_eq!(li.value(4.0), 6.0); // last slope = 2
    }

    #[test]
    fn rejects_bad_pillars() {
        assert!(LinearInterpolation::new(&[0.0], &[1.0]).is_err());
        assert!(LinearInterpolation::new(&[0.0, 0.0], &[1.0, 2.0]).is_err());
        assert!(LinearInterpolation::new(&[0.0, 1.0], &[1.0]).is_err());
    }
}
