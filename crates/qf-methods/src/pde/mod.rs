//! Finite-difference PDE pricing.
//!
//! # Overview
//!
//! * [`PdeParams`] — grid configuration: time steps, spot nodes,
//!   standard-deviation span, and the theta weight
//! * [`TridiagonalSystem`] — tridiagonal operator with a direct Thomas
//!   solver
//! * [`Pde1dSolver`] — backward induction of the one-dimensional
//!   Black-Scholes PDE over a log-spot grid, with an early-exercise
//!   projection hook for American-style products
//!
//! The time stepping is the generalized theta scheme
//!
//! `(I − (1−θ)·Δt·L)·Vⁿ = (I + θ·Δt·L)·Vⁿ⁺¹`
//!
//! with `θ = 0` fully implicit, `θ = 1` fully explicit, and `θ = ½`
//! Crank-Nicolson (second-order accurate in time). Implicit-leaning
//! weights are unconditionally stable; explicit-leaning weights are
//! subject to the usual diffusion bound `Δt ≲ Δx²/σ²`, which is a
//! documented precondition of [`PdeParams`] rather than an enforced one.

use qf_core::{ensure, errors::Result, Real};
use qf_market::YieldCurve;
use qf_math::interpolation::LinearInterpolation;
use qf_products::GridProduct;

/// Pivots smaller than this abort the tridiagonal elimination.
const PIVOT_TOL: Real = 1.0e-14;

// ─── Grid configuration ───────────────────────────────────────────────────────

/// Finite-difference grid configuration.
///
/// The explicit-leaning end of the theta range (`theta` near 1) is only
/// stable when `Δt ≲ Δx²/σ²`; callers selecting it are responsible for
/// honouring that bound.
#[derive(Debug, Clone, Copy)]
pub struct PdeParams {
    /// Number of uniform time steps from valuation date to expiry.
    pub n_time_steps: usize,
    /// Number of spot (log-price) grid nodes.
    pub n_spot_nodes: usize,
    /// Standard deviations of log-price movement covered on each side of
    /// the forward.
    pub n_std_devs: Real,
    /// Scheme weight: 0 = fully implicit, 1 = fully explicit,
    /// ½ = Crank-Nicolson.
    pub theta: Real,
}

impl Default for PdeParams {
    fn default() -> Self {
        Self {
            n_time_steps: 50,
            n_spot_nodes: 50,
            n_std_devs: 4.0,
            theta: 0.5,
        }
    }
}

impl PdeParams {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.n_time_steps >= 1,
            Configuration,
            "need at least one time step, got {}",
            self.n_time_steps
        );
        ensure!(
            self.n_spot_nodes >= 3,
            Configuration,
            "need at least 3 spot nodes, got {}",
            self.n_spot_nodes
        );
        ensure!(
            self.n_std_devs > 0.0 && self.n_std_devs.is_finite(),
            Domain,
            "standard-deviation span must be positive, got {}",
            self.n_std_devs
        );
        ensure!(
            (0.0..=1.0).contains(&self.theta),
            Domain,
            "theta must lie in [0, 1], got {}",
            self.theta
        );
        Ok(())
    }
}

// ─── Tridiagonal system ───────────────────────────────────────────────────────

/// A tridiagonal operator stored as its three bands.
///
/// `lower[0]` and `upper[n−1]` are structurally unused.
#[derive(Debug, Clone)]
pub struct TridiagonalSystem {
    /// Sub-diagonal band.
    pub lower: Vec<Real>,
    /// Main diagonal.
    pub diag: Vec<Real>,
    /// Super-diagonal band.
    pub upper: Vec<Real>,
}

impl TridiagonalSystem {
    /// Create a zero operator of size `n ≥ 2`.
    pub fn new(n: usize) -> Self {
        assert!(n >= 2, "tridiagonal system needs at least 2 rows");
        Self {
            lower: vec![0.0; n],
            diag: vec![0.0; n],
            upper: vec![0.0; n],
        }
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        self.diag.len()
    }

    /// Apply the operator: `out = A·x`.
    pub fn apply(&self, x: &[Real], out: &mut [Real]) {
        let n = self.size();
        assert_eq!(x.len(), n);
        assert_eq!(out.len(), n);
        out[0] = self.diag[0] * x[0] + self.upper[0] * x[1];
        for i in 1..n - 1 {
            out[i] = self.lower[i] * x[i - 1] + self.diag[i] * x[i] + self.upper[i] * x[i + 1];
        }
        out[n - 1] = self.lower[n - 1] * x[n - 2] + self.diag[n - 1] * x[n - 1];
    }

    /// Solve `A·x = rhs` by the Thomas algorithm (direct tridiagonal
    /// elimination). Fails with a numerical error on a vanishing pivot.
    pub fn solve(&self, rhs: &[Real]) -> Result<Vec<Real>> {
        let n = self.size();
        assert_eq!(rhs.len(), n);

        let mut c_prime = vec![0.0; n];
        let mut d_prime = vec![0.0; n];

        ensure!(
            self.diag[0].abs() > PIVOT_TOL,
            Numerical,
            "singular tridiagonal pivot at row 0"
        );
        c_prime[0] = self.upper[0] / self.diag[0];
        d_prime[0] = rhs[0] / self.diag[0];

        for i in 1..n {
            let m = self.diag[i] - self.lower[i] * c_prime[i - 1];
            ensure!(m.abs() > PIVOT_TOL, Numerical, "singular tridiagonal pivot at row {i}");
            if i < n - 1 {
                c_prime[i] = self.upper[i] / m;
            }
            d_prime[i] = (rhs[i] - self.lower[i] * d_prime[i - 1]) / m;
        }

        let mut x = vec![0.0; n];
        x[n - 1] = d_prime[n - 1];
        for i in (0..n - 1).rev() {
            x[i] = d_prime[i] - c_prime[i] * x[i + 1];
        }
        Ok(x)
    }
}

// ─── Results ──────────────────────────────────────────────────────────────────

/// Output of a PDE solve.
#[derive(Debug, Clone)]
pub struct PdeResults {
    /// Contract value at the initial spot, interpolated off the grid.
    pub price: Real,
    /// The spot grid nodes.
    pub spots: Vec<Real>,
    /// Contract values at the valuation date, one per spot node.
    pub values: Vec<Real>,
}

// ─── Solver ───────────────────────────────────────────────────────────────────

/// Backward-induction solver for the one-dimensional Black-Scholes PDE.
///
/// The spatial grid lives in log-spot, centred at the forward
/// `ln S₀ + (r̄ − q)·T` and spanning the configured number of standard
/// deviations `σ√T` on each side. The short rate is time-dependent
/// through the discount curve (each step uses the curve's forward rate
/// over that step); dividend yield and volatility are constants.
///
/// Boundary rows drop the diffusion term and use one-sided first
/// differences, which is exact for the linear asymptotics of vanilla
/// payoffs and keeps the system tridiagonal for every theta.
///
/// After each backward step the grid is projected through the product's
/// [`GridProduct::early_exercise_value`]; for American-style products
/// that is the pointwise maximum with intrinsic value, enforcing the
/// free-boundary constraint without a linear-complementarity solve (at
/// the cost of first-order accuracy near the exercise boundary).
pub struct Pde1dSolver<'a> {
    product: &'a dyn GridProduct,
    curve: &'a YieldCurve,
    spot: Real,
    div_yield: Real,
    vol: Real,
}

impl<'a> Pde1dSolver<'a> {
    /// Create a solver. Validates spot, dividend yield, and volatility.
    pub fn new(
        product: &'a dyn GridProduct,
        curve: &'a YieldCurve,
        spot: Real,
        div_yield: Real,
        vol: Real,
    ) -> Result<Self> {
        ensure!(
            product.n_assets() == 1,
            InvalidArgument,
            "the PDE solver prices single-asset products, got {} assets",
            product.n_assets()
        );
        ensure!(spot > 0.0 && spot.is_finite(), Domain, "spot must be positive, got {spot}");
        ensure!(
            div_yield.is_finite(),
            Domain,
            "dividend yield must be finite, got {div_yield}"
        );
        ensure!(vol > 0.0 && vol.is_finite(), Domain, "volatility must be positive, got {vol}");
        Ok(Self {
            product,
            curve,
            spot,
            div_yield,
            vol,
        })
    }

    /// Solve backward from expiry and extract the price at the initial
    /// spot.
    pub fn solve(&self, params: &PdeParams) -> Result<PdeResults> {
        params.validate()?;

        let t_exp = self.product.expiry();
        let n_nodes = params.n_spot_nodes;
        let n_steps = params.n_time_steps;
        let sigma = self.vol;

        // Log-spot grid centred at the forward
        let r_avg = self.curve.spot_rate(t_exp)?;
        let x_center = self.spot.ln() + (r_avg - self.div_yield) * t_exp;
        let half_span = params.n_std_devs * sigma * t_exp.sqrt();
        let x_min = x_center - half_span;
        let dx = 2.0 * half_span / (n_nodes - 1) as Real;

        let x_spot = self.spot.ln();
        ensure!(
            x_spot >= x_min && x_spot <= x_center + half_span,
            Domain,
            "initial spot lies outside the grid span; increase n_std_devs"
        );

        let x_grid: Vec<Real> = (0..n_nodes).map(|j| x_min + j as Real * dx).collect();
        let spots: Vec<Real> = x_grid.iter().map(|&x| x.exp()).collect();

        // Terminal condition
        let mut values: Vec<Real> = spots.iter().map(|&s| self.product.terminal_value(s)).collect();

        let dt = t_exp / n_steps as Real;
        let theta = params.theta;
        let mut operator = TridiagonalSystem::new(n_nodes);
        let mut lhs = TridiagonalSystem::new(n_nodes);
        let mut rhs = vec![0.0; n_nodes];

        for step in (0..n_steps).rev() {
            let t_new = step as Real * dt;
            let t_old = t_new + dt;
            let r = self.curve.forward_rate(t_new, t_old)?;
            let mu = r - self.div_yield - 0.5 * sigma * sigma;

            // Spatial operator L: a·V_xx + μ·V_x − r·V on the interior,
            // zero-diffusion one-sided rows at the boundaries
            let a = 0.5 * sigma * sigma / (dx * dx);
            let b = mu / (2.0 * dx);
            for j in 1..n_nodes - 1 {
                operator.lower[j] = a - b;
                operator.diag[j] = -2.0 * a - r;
                operator.upper[j] = a + b;
            }
            operator.diag[0] = -mu / dx - r;
            operator.upper[0] = mu / dx;
            operator.lower[n_nodes - 1] = -mu / dx;
            operator.diag[n_nodes - 1] = mu / dx - r;

            // rhs = (I + θ·Δt·L)·Vⁿ⁺¹
            operator.apply(&values, &mut rhs);
            for j in 0..n_nodes {
                rhs[j] = values[j] + theta * dt * rhs[j];
            }

            // lhs = I − (1−θ)·Δt·L
            let w = (1.0 - theta) * dt;
            for j in 0..n_nodes {
                lhs.lower[j] = -w * operator.lower[j];
                lhs.diag[j] = 1.0 - w * operator.diag[j];
                lhs.upper[j] = -w * operator.upper[j];
            }

            values = lhs.solve(&rhs)?;

            // Early-exercise projection (identity for European products)
            for j in 0..n_nodes {
                values[j] = self.product.early_exercise_value(t_new, spots[j], values[j]);
            }
        }

        // The spot rarely lands exactly on a node; interpolate in log-spot
        let price = LinearInterpolation::new(&x_grid, &values)?.value(x_spot);

        Ok(PdeResults {
            price,
            spots,
            values,
        })
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
