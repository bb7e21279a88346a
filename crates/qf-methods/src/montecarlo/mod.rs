//! Monte Carlo simulation framework.
//!
//! # Overview
//!
//! * [`McParams`] — per-run configuration: stream variant, path scheme,
//!   seed, antithetic pairing
//! * [`EulerPathGenerator`] — advances correlated lognormal paths over
//!   the product's fixing times
//! * [`MonteCarloEngine`] — partitions trials into batches, evaluates the
//!   payoff per trial, accumulates streaming statistics, and reports
//!   price and standard error
//! * [`CancelFlag`] — cooperative cancellation checked between batches
//!
//! Trials are independent, so batches run in parallel under rayon. Each
//! batch restarts a fresh uniform stream at the vector index of its first
//! trial (one vector per trial), which makes the simulation result a pure
//! function of the configuration — the degree of parallelism never
//! changes the estimate.

use qf_core::{ensure, errors::Result, fail, Real, Time};
use qf_market::YieldCurve;
use qf_math::linalg::cholesky;
use qf_math::random::{PseudoRandomRng, SobolRng, UniformRng, SOBOL_MAX_DIMENSION};
use qf_math::statistics::SampleStatistics;
use qf_math::{normal_cdf_inverse, Matrix};
use qf_products::{PathProduct, SimulationPath};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Trials per work unit; also the granularity of cancellation checks.
const TRIALS_PER_BATCH: usize = 4096;

/// Uniform draws are clamped this far away from {0, 1} before the
/// inverse-CDF transform.
const UNIFORM_FLOOR: Real = 1.0e-12;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Which uniform stream variant drives the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrngType {
    /// Seedable Mersenne Twister (MT19937-64) stream.
    Pseudorandom,
    /// Deterministic Sobol' low-discrepancy stream.
    Quasirandom,
}

/// Which discretization scheme advances the paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathGenType {
    /// Lognormal Euler stepping over the fixing times.
    Euler,
}

/// Monte Carlo run configuration, fixed for the whole run.
#[derive(Debug, Clone, Copy)]
pub struct McParams {
    /// Uniform stream variant.
    pub urng: UrngType,
    /// Path discretization scheme.
    pub path_gen: PathGenType,
    /// Seed for the pseudorandom stream (ignored by the Sobol' stream).
    pub seed: u64,
    /// Run trials as antithetic pairs (pseudorandom streams only).
    pub antithetic: bool,
}

impl Default for McParams {
    fn default() -> Self {
        Self {
            urng: UrngType::Pseudorandom,
            path_gen: PathGenType::Euler,
            seed: 5489,
            antithetic: false,
        }
    }
}

/// Cooperative cancellation flag for long simulations.
///
/// Cloned handles share the flag; the engine checks it between trial
/// batches only, never mid-trial.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a new, unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Simulation outcome.
#[derive(Debug, Clone, Copy)]
pub struct McResult {
    /// Discounted Monte Carlo price estimate.
    pub mean: Real,
    /// Standard error of the estimate: discounted sample standard
    /// deviation over √(sample count). `NaN` below 2 samples — the price
    /// remains valid, the uncertainty is simply undefined.
    pub std_error: Real,
    /// Number of paths actually generated.
    pub paths_run: usize,
    /// Whether the run stopped early on a [`CancelFlag`].
    pub cancelled: bool,
}

// ─── Euler path generator ─────────────────────────────────────────────────────

/// Advances one or more correlated lognormal asset paths over a fixing
/// schedule with the Euler scheme.
///
/// Per interval `[t_k, t_{k+1})` and asset i:
///
/// `S_i ← S_i · exp[(f_k − q_i − ½σ_i²)Δt + σ_i√Δt·(L·Z)_i]`
///
/// where `f_k` is the curve's forward rate over the interval, `L` the
/// Cholesky factor of the correlation matrix, and `Z` independent
/// standard normals obtained from the uniform stream through the inverse
/// normal CDF. The path is a deterministic function of the draw
/// sequence, which is what makes antithetic pairing and restartable
/// parallel partitioning possible.
pub struct EulerPathGenerator {
    times: Vec<Time>,
    n_assets: usize,
    spots: Vec<Real>,
    /// Per (step, asset): `(f_k − q_i − ½σ_i²)·Δt_k`, row-major.
    drifts: Vec<Real>,
    /// Per (step, asset): `σ_i·√Δt_k`, row-major.
    diffusions: Vec<Real>,
    chol: Matrix,
    stream: Box<dyn UniformRng>,
    uniforms: Vec<Real>,
    normals: Vec<Real>,
    correlated: Vec<Real>,
}

impl EulerPathGenerator {
    /// Create a generator.
    ///
    /// `chol` is the lower-triangular Cholesky factor of the asset
    /// correlation matrix; `stream` must produce vectors of dimension
    /// `times.len() × n_assets`.
    pub fn new(
        curve: &YieldCurve,
        spots: &[Real],
        div_yields: &[Real],
        vols: &[Real],
        chol: Matrix,
        times: Vec<Time>,
        stream: Box<dyn UniformRng>,
    ) -> Result<Self> {
        let n_assets = spots.len();
        ensure!(n_assets >= 1, InvalidArgument, "need at least one asset");
        ensure!(
            div_yields.len() == n_assets && vols.len() == n_assets,
            InvalidArgument,
            "asset vector size mismatch: {} spots, {} dividend yields, {} vols",
            n_assets,
            div_yields.len(),
            vols.len()
        );
        ensure!(
            chol.rows() == n_assets && chol.cols() == n_assets,
            InvalidArgument,
            "Cholesky factor must be {n_assets}×{n_assets}, got {}×{}",
            chol.rows(),
            chol.cols()
        );
        ensure!(!times.is_empty(), InvalidArgument, "need at least one fixing time");
        let dimension = times.len() * n_assets;
        ensure!(
            stream.dimension() == dimension,
            InvalidArgument,
            "stream dimension {} does not match {} steps × {} assets",
            stream.dimension(),
            times.len(),
            n_assets
        );

        let n_steps = times.len();
        let mut drifts = Vec::with_capacity(n_steps * n_assets);
        let mut diffusions = Vec::with_capacity(n_steps * n_assets);
        let mut prev_t = 0.0;
        for &t in &times {
            ensure!(t > prev_t, Domain, "fixing times must be strictly increasing and positive");
            let dt = t - prev_t;
            let fwd = curve.forward_rate(prev_t, t)?;
            for i in 0..n_assets {
                drifts.push((fwd - div_yields[i] - 0.5 * vols[i] * vols[i]) * dt);
                diffusions.push(vols[i] * dt.sqrt());
            }
            prev_t = t;
        }

        Ok(Self {
            times,
            n_assets,
            spots: spots.to_vec(),
            drifts,
            diffusions,
            chol,
            stream,
            uniforms: vec![0.0; dimension],
            normals: vec![0.0; dimension],
            correlated: vec![0.0; n_assets],
        })
    }

    /// The fixing times the generator steps over.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Number of uniform draws consumed per path (= stream dimension).
    pub fn dimension(&self) -> usize {
        self.normals.len()
    }

    /// Draw the next trial's normals from the uniform stream.
    fn draw_normals(&mut self) {
        self.stream.next_vector(&mut self.uniforms);
        for (z, &u) in self.normals.iter_mut().zip(self.uniforms.iter()) {
            *z = normal_cdf_inverse(u.clamp(UNIFORM_FLOOR, 1.0 - UNIFORM_FLOOR));
        }
    }

    /// Evolve `path` from the normals in `self.normals`, scaled by
    /// `sign` (−1 gives the antithetic mirror).
    fn evolve(&mut self, sign: Real, path: &mut SimulationPath) {
        debug_assert_eq!(path.n_fixings(), self.times.len());
        debug_assert_eq!(path.n_assets(), self.n_assets);

        let n = self.n_assets;
        let mut state = self.spots.clone();
        for k in 0..self.times.len() {
            let z = &self.normals[k * n..(k + 1) * n];
            self.chol.lower_mul_vec_into(z, &mut self.correlated);
            let slots = path.fixing_mut(k);
            for i in 0..n {
                let increment =
                    self.drifts[k * n + i] + self.diffusions[k * n + i] * sign * self.correlated[i];
                state[i] *= increment.exp();
                slots[i] = state[i];
            }
        }
    }

    /// Generate the next path into `path`.
    pub fn fill_path(&mut self, path: &mut SimulationPath) {
        self.draw_normals();
        self.evolve(1.0, path);
    }

    /// Generate the next antithetic pair into `path` and `mirror` from a
    /// single draw.
    pub fn fill_path_pair(&mut self, path: &mut SimulationPath, mirror: &mut SimulationPath) {
        self.draw_normals();
        self.evolve(1.0, path);
        self.evolve(-1.0, mirror);
    }

    /// Generate and return the next path.
    pub fn next_path(&mut self) -> SimulationPath {
        let mut path = SimulationPath::new(self.times.clone(), self.n_assets);
        self.fill_path(&mut path);
        path
    }
}

// ─── Monte Carlo engine ───────────────────────────────────────────────────────

/// Orchestrates path generation, payoff evaluation, and statistics
/// accumulation across independent trials.
pub struct MonteCarloEngine<'a> {
    product: &'a dyn PathProduct,
    curve: &'a YieldCurve,
    spots: Vec<Real>,
    div_yields: Vec<Real>,
    vols: Vec<Real>,
    chol: Matrix,
    params: McParams,
    discount: Real,
    dimension: usize,
}

impl<'a> MonteCarloEngine<'a> {
    /// Create an engine.
    ///
    /// All validation happens here, before any trial runs: vector sizes
    /// against the product's asset count, positivity of spots and vols,
    /// the correlation factorization, the stream dimension against the
    /// quasirandom cap, and the antithetic/stream compatibility.
    pub fn new(
        product: &'a dyn PathProduct,
        curve: &'a YieldCurve,
        spots: &[Real],
        div_yields: &[Real],
        vols: &[Real],
        correlation: &Matrix,
        params: McParams,
    ) -> Result<Self> {
        let n = product.n_assets();
        ensure!(
            spots.len() == n && div_yields.len() == n && vols.len() == n,
            InvalidArgument,
            "product has {n} assets but got {} spots, {} dividend yields, {} vols",
            spots.len(),
            div_yields.len(),
            vols.len()
        );
        for &s in spots {
            ensure!(s > 0.0 && s.is_finite(), Domain, "spot must be positive, got {s}");
        }
        for &v in vols {
            ensure!(v >= 0.0 && v.is_finite(), Domain, "volatility must be non-negative, got {v}");
        }
        for &q in div_yields {
            ensure!(q.is_finite(), Domain, "dividend yield must be finite, got {q}");
        }
        ensure!(
            correlation.rows() == n && correlation.cols() == n,
            InvalidArgument,
            "correlation matrix must be {n}×{n}, got {}×{}",
            correlation.rows(),
            correlation.cols()
        );

        let chol = cholesky(correlation)?;
        let dimension = product.fixing_times().len() * n;
        if params.urng == UrngType::Quasirandom {
            ensure!(
                dimension <= SOBOL_MAX_DIMENSION,
                Configuration,
                "quasirandom stream supports at most {SOBOL_MAX_DIMENSION} dimensions, \
                 product needs {dimension}"
            );
            if params.antithetic {
                fail!(Configuration, "antithetic pairing requires a pseudorandom stream");
            }
        }
        let discount = curve.discount(product.expiry())?;

        Ok(Self {
            product,
            curve,
            spots: spots.to_vec(),
            div_yields: div_yields.to_vec(),
            vols: vols.to_vec(),
            chol,
            params,
            discount,
            dimension,
        })
    }

    /// The discount factor applied to the terminal payoff.
    pub fn discount(&self) -> Real {
        self.discount
    }

    /// Build a path generator whose stream starts at `offset` vectors
    /// into the sequence (one vector per trial).
    fn make_generator(&self, offset: u64) -> Result<EulerPathGenerator> {
        let mut stream: Box<dyn UniformRng> = match self.params.urng {
            UrngType::Pseudorandom => {
                Box::new(PseudoRandomRng::new(self.params.seed, self.dimension))
            }
            UrngType::Quasirandom => Box::new(SobolRng::new(self.dimension)?),
        };
        stream.skip(offset);
        match self.params.path_gen {
            PathGenType::Euler => EulerPathGenerator::new(
                self.curve,
                &self.spots,
                &self.div_yields,
                &self.vols,
                self.chol.clone(),
                self.product.fixing_times().to_vec(),
                stream,
            ),
        }
    }

    /// Run one batch of trials sequentially, returning its accumulator.
    fn run_batch(&self, first_trial: usize, count: usize) -> Result<SampleStatistics> {
        let mut generator = self.make_generator(first_trial as u64)?;
        let mut stats = SampleStatistics::new();
        let times = self.product.fixing_times().to_vec();
        let n = self.product.n_assets();
        let mut path = SimulationPath::new(times.clone(), n);

        if self.params.antithetic {
            let mut mirror = SimulationPath::new(times, n);
            for _ in 0..count {
                generator.fill_path_pair(&mut path, &mut mirror);
                let payoff =
                    0.5 * (self.product.payoff(&path) + self.product.payoff(&mirror));
                stats.add(payoff * self.discount);
            }
        } else {
            for _ in 0..count {
                generator.fill_path(&mut path);
                stats.add(self.product.payoff(&path) * self.discount);
            }
        }
        Ok(stats)
    }

    /// Run `n_paths` trials (or `⌈n_paths/2⌉` antithetic pairs) and
    /// report the discounted price and its standard error.
    pub fn run(&self, n_paths: usize) -> Result<McResult> {
        self.run_cancellable(n_paths, &CancelFlag::new())
    }

    /// As [`run`](Self::run), checking `cancel` between batches.
    ///
    /// On cancellation the result carries the statistics of the trials
    /// that actually completed, with [`McResult::cancelled`] set.
    pub fn run_cancellable(&self, n_paths: usize, cancel: &CancelFlag) -> Result<McResult> {
        ensure!(n_paths >= 1, Domain, "trial count must be at least 1, got {n_paths}");

        let units = if self.params.antithetic {
            n_paths.div_ceil(2)
        } else {
            n_paths
        };
        let n_batches = units.div_ceil(TRIALS_PER_BATCH);

        let partials: Vec<SampleStatistics> = (0..n_batches)
            .into_par_iter()
            .map(|b| -> Result<SampleStatistics> {
                if cancel.is_cancelled() {
                    return Ok(SampleStatistics::new());
                }
                let first = b * TRIALS_PER_BATCH;
                let count = TRIALS_PER_BATCH.min(units - first);
                self.run_batch(first, count)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut total = SampleStatistics::new();
        for partial in &partials {
            total.merge(partial);
        }

        let samples = total.samples();
        let paths_run = if self.params.antithetic { samples * 2 } else { samples };
        Ok(McResult {
            mean: total.mean().unwrap_or(Real::NAN),
            std_error: total.error_estimate().unwrap_or(Real::NAN),
            paths_run,
            cancelled: samples < units,
        })
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
