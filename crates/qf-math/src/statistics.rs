//! Streaming statistics accumulator.
//!
//! Welford's algorithm keeps a running mean and centred second moment, so
//! the variance estimate does not suffer the catastrophic cancellation of
//! the naive sum / sum-of-squares form at large sample counts. Partial
//! accumulators from parallel workers are combined with `merge` (the
//! Chan et al. pairwise formula) instead of re-running samples.

use qf_core::Real;

/// Streaming mean/variance accumulator over weighted-1 samples.
#[derive(Debug, Clone, Default)]
pub struct SampleStatistics {
    count: usize,
    mean: Real,
    m2: Real,
}

impl SampleStatistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single sample.
    pub fn add(&mut self, x: Real) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as Real;
        self.m2 += delta * (x - self.mean);
    }

    /// Absorb another accumulator's samples.
    ///
    /// The result is identical (up to rounding) to having added both
    /// sample sets into a single accumulator.
    pub fn merge(&mut self, other: &SampleStatistics) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = other.clone();
            return;
        }
        let total = (self.count + other.count) as Real;
        let delta = other.mean - self.mean;
        self.m2 += other.m2 + delta * delta * self.count as Real * other.count as Real / total;
        self.mean += delta * other.count as Real / total;
        self.count += other.count;
    }

    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Sample mean. Returns `None` if no samples have been added.
    pub fn mean(&self) -> Option<Real> {
        (self.count > 0).then_some(self.mean)
    }

    /// Unbiased (Bessel-corrected) sample variance. Returns `None` for
    /// fewer than 2 samples.
    pub fn variance(&self) -> Option<Real> {
        (self.count >= 2).then(|| self.m2 / (self.count as Real - 1.0))
    }

    /// Sample standard deviation. Returns `None` for fewer than 2 samples.
    pub fn std_dev(&self) -> Option<Real> {
        self.variance().map(Real::sqrt)
    }

    /// Standard error of the mean: `std_dev / √count`. Returns `None` for
    /// fewer than 2 samples.
    pub fn error_estimate(&self) -> Option<Real> {
        self.std_dev().map(|s| s / (self.count as Real).sqrt())
    }

    /// Reset the accumulator to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn basic_statistics() {
        let mut s = SampleStatistics::new();
        for x in [1.0, 2.0, 3.0, 4.0, 5.0] {
            s.add(x);
        }
        assert_eq!(s.samples(), 5);
        assert_abs_diff_eq!(s.mean().unwrap(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.variance().unwrap(), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(s.std_dev().unwrap(), 2.5_f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(
            s.error_estimate().unwrap(),
            2.5_f64.sqrt() / 5.0_f64.sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn empty_and_single_sample() {
        let mut s = SampleStatistics::new();
        assert!(s.mean().is_none());
        assert!(s.variance().is_none());

        s.add(7.5);
        assert_eq!(s.mean(), Some(7.5));
        assert!(s.variance().is_none());
        assert!(s.error_estimate().is_none());
    }

    #[test]
    fn welford_stable_around_large_offset() {
        // Sum-of-squares accumulation loses all significant digits here;
        // Welford must not.
        let offset = 1.0e9;
        let mut s = SampleStatistics::new();
        for x in [offset + 1.0, offset + 2.0, offset + 3.0] {
            s.add(x);
        }
        assert_abs_diff_eq!(s.variance().unwrap(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn merge_matches_sequential() {
        let xs = [0.3, -1.2, 4.5, 2.2, 0.0, -3.1, 1.1];
        let mut all = SampleStatistics::new();
        for &x in &xs {
            all.add(x);
        }

        let mut left = SampleStatistics::new();
        let mut right = SampleStatistics::new();
        for &x in &xs[..3] {
            left.add(x);
        }
        for &x in &xs[3..] {
            right.add(x);
        }
        left.merge(&right);

        assert_eq!(left.samples(), all.samples());
        assert_abs_diff_eq!(left.mean().unwrap(), all.mean().unwrap(), epsilon = 1e-12);
        assert_abs_diff_eq!(
            left.variance().unwrap(),
            all.variance().unwrap(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let mut s = SampleStatistics::new();
        s.add(1.0);
        s.add(2.0);
        let before = s.clone();
        s.merge(&SampleStatistics::new());
        assert_eq!(s.samples(), before.samples());
        assert_eq!(s.mean(), before.mean());

        let mut empty = SampleStatistics::new();
        empty.merge(&before);
        assert_eq!(empty.mean(), before.mean());
    }

    proptest! {
        #[test]
        fn merge_split_invariance(
            xs in proptest::collection::vec(-100.0_f64..100.0, 2..40),
            split in 0usize..40,
        ) {
            let split = split.min(xs.len());
            let mut all = SampleStatistics::new();
            for &x in &xs {
                all.add(x);
            }
            let mut a = SampleStatistics::new();
            let mut b = SampleStatistics::new();
            for &x in &xs[..split] {
                a.add(x);
            }
            for &x in &xs[split..] {
                b.add(x);
            }
            a.merge(&b);
            prop_assert!((a.mean().unwrap() - all.mean().unwrap()).abs() < 1e-9);
            prop_assert!((a.variance().unwrap() - all.variance().unwrap()).abs() < 1e-9);
        }
    }
}
