//! Top-level pricing entry points.
//!
//! Thin orchestration over the engine crates: each function resolves the
//! named discount curve from the caller's [`Market`], builds the product
//! and the appropriate engine, and runs it. Lookups fail with
//! [`qf_core::Error::NotFound`] when the curve name is absent.

use qf_core::{errors::Result, Rate, Real, Time, Volatility};
use qf_market::Market;
use qf_math::Matrix;
use qf_methods::montecarlo::{McParams, McResult, MonteCarloEngine};
use qf_methods::pde::{Pde1dSolver, PdeParams, PdeResults};
use qf_products::{AmericanCallPut, AsianBasketCallPut, EuropeanCallPut, OptionType};

/// Price a European call or put on a finite-difference grid.
#[allow(clippy::too_many_arguments)]
pub fn price_european_pde(
    option_type: OptionType,
    strike: Real,
    time_to_expiry: Time,
    spot: Real,
    market: &Market,
    curve_name: &str,
    div_yield: Rate,
    volatility: Volatility,
    params: &PdeParams,
) -> Result<PdeResults> {
    let curve = market.yield_curve(curve_name)?;
    let product = EuropeanCallPut::new(option_type, strike, time_to_expiry)?;
    Pde1dSolver::new(&product, &curve, spot, div_yield, volatility)?.solve(params)
}

/// Price an American call or put on a finite-difference grid, with the
/// early-exercise projection applied at every backward step.
#[allow(clippy::too_many_arguments)]
pub fn price_american_pde(
    option_type: OptionType,
    strike: Real,
    time_to_expiry: Time,
    spot: Real,
    market: &Market,
    curve_name: &str,
    div_yield: Rate,
    volatility: Volatility,
    params: &PdeParams,
) -> Result<PdeResults> {
    let curve = market.yield_curve(curve_name)?;
    let product = AmericanCallPut::new(option_type, strike, time_to_expiry)?;
    Pde1dSolver::new(&product, &curve, spot, div_yield, volatility)?.solve(params)
}

/// Price a European call or put by Monte Carlo simulation.
#[allow(clippy::too_many_arguments)]
pub fn price_monte_carlo(
    option_type: OptionType,
    strike: Real,
    time_to_expiry: Time,
    spot: Real,
    market: &Market,
    curve_name: &str,
    div_yield: Rate,
    volatility: Volatility,
    params: &McParams,
    n_paths: usize,
) -> Result<McResult> {
    let curve = market.yield_curve(curve_name)?;
    let product = EuropeanCallPut::new(option_type, strike, time_to_expiry)?;
    let engine = MonteCarloEngine::new(
        &product,
        &curve,
        &[spot],
        &[div_yield],
        &[volatility],
        &Matrix::identity(1),
        *params,
    )?;
    engine.run(n_paths)
}

/// Price an Asian basket call or put by multi-asset Monte Carlo
/// simulation under the given correlation structure.
#[allow(clippy::too_many_arguments)]
pub fn price_asian_basket_monte_carlo(
    option_type: OptionType,
    strike: Real,
    fixing_times: &[Time],
    quantities: &[Real],
    spots: &[Real],
    market: &Market,
    curve_name: &str,
    div_yields: &[Rate],
    volatilities: &[Volatility],
    correlation: &Matrix,
    params: &McParams,
    n_paths: usize,
) -> Result<McResult> {
    let curve = market.yield_curve(curve_name)?;
    let product = AsianBasketCallPut::new(option_type, strike, fixing_times, quantities)?;
    let engine = MonteCarloEngine::new(
        &product,
        &curve,
        spots,
        div_yields,
        volatilities,
        correlation,
        *params,
    )?;
    engine.run(n_paths)
}
