//! End-to-end pricing properties: the engines against the closed-form
//! Black-Scholes reference and against each other.

use quantfin::market::{Market, YieldCurve, YieldCurveInput};
use quantfin::math::{normal_cdf, Matrix};
use quantfin::methods::montecarlo::{CancelFlag, McParams, MonteCarloEngine, UrngType};
use quantfin::methods::pde::PdeParams;
use quantfin::pricing::{
    price_american_pde, price_asian_basket_monte_carlo, price_european_pde, price_monte_carlo,
};
use quantfin::products::{EuropeanCallPut, OptionType};

/// Black-Scholes-Merton reference price.
fn bs_price(ot: OptionType, s: f64, k: f64, r: f64, q: f64, sigma: f64, t: f64) -> f64 {
    let d1 = ((s / k).ln() + (r - q + 0.5 * sigma * sigma) * t) / (sigma * t.sqrt());
    let d2 = d1 - sigma * t.sqrt();
    let w = ot.sign();
    w * (s * (-q * t).exp() * normal_cdf(w * d1) - k * (-r * t).exp() * normal_cdf(w * d2))
}

/// A market holding a single flat curve named "USD".
fn usd_market(rate: f64) -> Market {
    let market = Market::new();
    let curve = YieldCurve::new(&[1.0, 5.0], &[rate, rate], YieldCurveInput::ZeroRate).unwrap();
    market.insert_yield_curve("USD", curve);
    market
}

#[test]
fn fine_grid_crank_nicolson_matches_black_scholes() {
    let market = usd_market(0.04);
    let params = PdeParams {
        n_time_steps: 400,
        n_spot_nodes: 400,
        n_std_devs: 4.0,
        theta: 0.5,
    };
    let result = price_european_pde(
        OptionType::Call,
        100.0,
        1.0,
        100.0,
        &market,
        "USD",
        0.02,
        0.4,
        &params,
    )
    .unwrap();

    let reference = bs_price(OptionType::Call, 100.0, 100.0, 0.04, 0.02, 0.4, 1.0);
    let rel_err = (result.price - reference).abs() / reference;
    assert!(
        rel_err < 0.005,
        "CN 400×400 price {} vs BS {reference}: relative error {rel_err}",
        result.price
    );
}

#[test]
fn american_dominates_european_with_dividends() {
    let market = usd_market(0.04);
    let params = PdeParams {
        n_time_steps: 200,
        n_spot_nodes: 200,
        ..Default::default()
    };

    for q in [0.02, 0.05, 0.10] {
        let euro = price_european_pde(
            OptionType::Call,
            100.0,
            1.0,
            100.0,
            &market,
            "USD",
            q,
            0.4,
            &params,
        )
        .unwrap()
        .price;
        let amer = price_american_pde(
            OptionType::Call,
            100.0,
            1.0,
            100.0,
            &market,
            "USD",
            q,
            0.4,
            &params,
        )
        .unwrap()
        .price;
        assert!(
            amer >= euro - 1e-9,
            "American call {amer} below European {euro} at q={q}"
        );
    }
}

#[test]
fn american_call_equals_european_without_dividends() {
    // With no dividends, early exercise of a call is never optimal
    let market = usd_market(0.04);
    let params = PdeParams {
        n_time_steps: 200,
        n_spot_nodes: 200,
        ..Default::default()
    };

    let euro = price_european_pde(
        OptionType::Call,
        100.0,
        1.0,
        100.0,
        &market,
        "USD",
        0.0,
        0.4,
        &params,
    )
    .unwrap()
    .price;
    let amer = price_american_pde(
        OptionType::Call,
        100.0,
        1.0,
        100.0,
        &market,
        "USD",
        0.0,
        0.4,
        &params,
    )
    .unwrap()
    .price;
    assert!(
        (amer - euro).abs() < 1e-6,
        "no-dividend American call {amer} should equal European {euro}"
    );
}

#[test]
fn monte_carlo_matches_black_scholes_within_three_std_errors() {
    let market = usd_market(0.04);
    let result = price_monte_carlo(
        OptionType::Call,
        100.0,
        1.0,
        100.0,
        &market,
        "USD",
        0.02,
        0.4,
        &McParams::default(),
        1_000_000,
    )
    .unwrap();

    let reference = bs_price(OptionType::Call, 100.0, 100.0, 0.04, 0.02, 0.4, 1.0);
    assert_eq!(result.paths_run, 1_000_000);
    assert!(result.std_error < 0.1, "std error {} too large", result.std_error);
    assert!(
        (result.mean - reference).abs() < 3.0 * result.std_error + 0.01,
        "MC {} ± {} vs BS {reference}",
        result.mean,
        result.std_error
    );
}

#[test]
fn standard_error_halves_when_trials_quadruple() {
    let market = usd_market(0.04);
    let price = |n: usize| {
        price_monte_carlo(
            OptionType::Call,
            100.0,
            1.0,
            100.0,
            &market,
            "USD",
            0.02,
            0.4,
            &McParams::default(),
            n,
        )
        .unwrap()
    };

    let small = price(25_000);
    let large = price(100_000);
    let ratio = small.std_error / large.std_error;
    assert!(
        (ratio - 2.0).abs() < 0.2,
        "expected ~2× error reduction, got {ratio}"
    );
}

#[test]
fn quasirandom_converges_at_least_as_fast_as_pseudorandom() {
    let market = usd_market(0.04);
    let reference = bs_price(OptionType::Call, 100.0, 100.0, 0.04, 0.02, 0.4, 1.0);
    let n = 65_536;

    let run = |urng: UrngType| {
        price_monte_carlo(
            OptionType::Call,
            100.0,
            1.0,
            100.0,
            &market,
            "USD",
            0.02,
            0.4,
            &McParams {
                urng,
                ..Default::default()
            },
            n,
        )
        .unwrap()
    };

    let mt_err = (run(UrngType::Pseudorandom).mean - reference).abs();
    let sobol_err = (run(UrngType::Quasirandom).mean - reference).abs();
    assert!(
        sobol_err <= mt_err.max(0.02),
        "Sobol error {sobol_err} should not exceed MT error {mt_err} on a smooth payoff"
    );
}

#[test]
fn single_trial_yields_finite_mean_and_nan_std_error() {
    let market = usd_market(0.04);
    let result = price_monte_carlo(
        OptionType::Call,
        100.0,
        1.0,
        100.0,
        &market,
        "USD",
        0.02,
        0.4,
        &McParams::default(),
        1,
    )
    .unwrap();
    assert!(result.mean.is_finite());
    assert!(result.std_error.is_nan());
    assert_eq!(result.paths_run, 1);
}

#[test]
fn antithetic_pairing_prices_correctly() {
    let market = usd_market(0.04);
    let result = price_monte_carlo(
        OptionType::Call,
        100.0,
        1.0,
        100.0,
        &market,
        "USD",
        0.02,
        0.4,
        &McParams {
            antithetic: true,
            ..Default::default()
        },
        200_000,
    )
    .unwrap();

    let reference = bs_price(OptionType::Call, 100.0, 100.0, 0.04, 0.02, 0.4, 1.0);
    assert!(
        (result.mean - reference).abs() < 4.0 * result.std_error + 0.05,
        "antithetic MC {} ± {} vs BS {reference}",
        result.mean,
        result.std_error
    );
}

#[test]
fn asian_basket_price_is_sane() {
    // Five perfectly symmetric assets: the basket price must sit below the
    // equivalent vanilla (averaging reduces variance) but stay positive
    let market = usd_market(0.04);
    let correl = Matrix::from_row_slice(
        5,
        5,
        &[
            1.0, 0.5, 0.7, 0.6, 0.6, //
            0.5, 1.0, 0.8, 0.7, 0.5, //
            0.7, 0.8, 1.0, 0.7, 0.5, //
            0.6, 0.7, 0.7, 1.0, 0.6, //
            0.6, 0.5, 0.5, 0.6, 1.0,
        ],
    );
    let result = price_asian_basket_monte_carlo(
        OptionType::Call,
        100.0,
        &[0.5, 1.0, 1.5, 2.0],
        &[0.2; 5],
        &[100.0; 5],
        &market,
        "USD",
        &[0.02; 5],
        &[0.3; 5],
        &correl,
        &McParams::default(),
        200_000,
    )
    .unwrap();

    let vanilla = bs_price(OptionType::Call, 100.0, 100.0, 0.04, 0.02, 0.3, 2.0);
    assert!(result.mean > 0.0, "basket price {}", result.mean);
    assert!(
        result.mean < vanilla,
        "averaged basket {} should be cheaper than the vanilla {vanilla}",
        result.mean
    );
}

#[test]
fn cancellation_stops_between_batches() {
    let market = usd_market(0.04);
    let curve = market.yield_curve("USD").unwrap();
    let call = EuropeanCallPut::new(OptionType::Call, 100.0, 1.0).unwrap();
    let engine = MonteCarloEngine::new(
        &call,
        &curve,
        &[100.0],
        &[0.02],
        &[0.4],
        &Matrix::identity(1),
        McParams::default(),
    )
    .unwrap();

    let flag = CancelFlag::new();
    flag.cancel();
    let result = engine.run_cancellable(1_000_000, &flag).unwrap();
    assert!(result.cancelled);
    assert!(result.paths_run < 1_000_000);
}

#[test]
fn theta_bounds_rejected_at_the_boundary() {
    let market = usd_market(0.04);
    for theta in [-0.01, 1.01, f64::NAN] {
        let params = PdeParams {
            theta,
            ..Default::default()
        };
        assert!(
            price_european_pde(
                OptionType::Call,
                100.0,
                1.0,
                100.0,
                &market,
                "USD",
                0.02,
                0.4,
                &params,
            )
            .is_err(),
            "theta={theta} should be rejected"
        );
    }
}
