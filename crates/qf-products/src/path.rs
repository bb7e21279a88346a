//! A simulated price path.

use qf_core::{Real, Time};

/// Asset prices at each fixing time of one Monte Carlo trial.
///
/// Stored row-major as `n_fixings × n_assets`; the storage is intended to
/// be reused across trials (`fill` / mutation through `fixing_mut`), so a
/// path lives only for the duration of one payoff evaluation.
#[derive(Debug, Clone)]
pub struct SimulationPath {
    times: Vec<Time>,
    n_assets: usize,
    values: Vec<Real>,
}

impl SimulationPath {
    /// Create a zero-filled path over the given fixing times.
    pub fn new(times: Vec<Time>, n_assets: usize) -> Self {
        assert!(n_assets >= 1, "path needs at least one asset");
        assert!(!times.is_empty(), "path needs at least one fixing time");
        let values = vec![0.0; times.len() * n_assets];
        Self {
            times,
            n_assets,
            values,
        }
    }

    /// Fixing times (strictly increasing, all positive).
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Number of fixings.
    pub fn n_fixings(&self) -> usize {
        self.times.len()
    }

    /// Number of assets.
    pub fn n_assets(&self) -> usize {
        self.n_assets
    }

    /// Price of asset `asset` at fixing `fixing`.
    #[inline]
    pub fn value(&self, fixing: usize, asset: usize) -> Real {
        self.values[fixing * self.n_assets + asset]
    }

    /// All asset prices at fixing `fixing`.
    #[inline]
    pub fn fixing(&self, fixing: usize) -> &[Real] {
        let start = fixing * self.n_assets;
        &self.values[start..start + self.n_assets]
    }

    /// Mutable asset prices at fixing `fixing`.
    #[inline]
    pub fn fixing_mut(&mut self, fixing: usize) -> &mut [Real] {
        let start = fixing * self.n_assets;
        &mut self.values[start..start + self.n_assets]
    }

    /// Asset prices at the final fixing.
    pub fn terminal(&self) -> &[Real] {
        self.fixing(self.n_fixings() - 1)
    }
}
