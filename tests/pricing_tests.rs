mod test_utils;

use approx::assert_abs_diff_eq;
use bsm_pricer::{
    bs_price, price, price_with_validator, Bound, DomainError, OptionType, Payoff, PricingError,
    Validator,
};
use proptest::prelude::*;
use test_utils::{
    date, discounted_intrinsic, params_with_days, parity_rhs, reference_params, REFERENCE_CALL,
    REFERENCE_PUT,
};

/// Reference scenario against an independently computed closed-form value.
#[test]
fn test_reference_scenario() {
    let params = reference_params();
    assert_eq!(params.time_to_maturity(), 1.0);

    let call = price(&params, &Payoff::call(100.0)).expect("reference call prices");
    assert_abs_diff_eq!(call.value, REFERENCE_CALL, epsilon = 1e-6);
    assert_abs_diff_eq!(call.value, REFERENCE_CALL, epsilon = 1e-10);

    let put = price(&params, &Payoff::put(100.0)).expect("reference put prices");
    assert_abs_diff_eq!(put.value, REFERENCE_PUT, epsilon = 1e-10);

    // Factors used by the post-condition checks
    assert!(call.factors.growth > 1.0);
    assert!(call.factors.discount > 0.0 && call.factors.discount < 1.0);
    assert!(call.factors.vol_std_dev > 0.0);
}

/// The source valued on "today"; with an explicit valuation date after the
/// 2024-05-15 maturity the computation is undefined and must say so.
#[test]
fn test_valuation_after_maturity_is_domain_error() {
    let params = reference_params().with_valuation_date(date(2026, 10, 19));
    let err = price(&params, &Payoff::call(100.0)).unwrap_err();
    match err {
        PricingError::Domain(DomainError::MaturityNotAfterValuation {
            tau,
            valuation,
            maturity,
        }) => {
            assert!(tau < 0.0);
            assert_eq!(valuation, date(2026, 10, 19));
            assert_eq!(maturity, date(2024, 5, 15));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_validation_failure_propagates() {
    // A negative tolerance tightens the lower bound past any attainable price
    let strict = Validator::new(-1.0);
    let err =
        price_with_validator(&reference_params(), &Payoff::call(100.0), &strict).unwrap_err();
    match err {
        PricingError::Validation(v) => {
            assert_eq!(v.bound, Bound::LowerBound);
            assert_abs_diff_eq!(v.value, REFERENCE_CALL, epsilon = 1e-10);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_zero_volatility_limit() {
    let (r, q, tau) = (0.05, 0.02, 1.0);
    for (spot, strike) in [(100.0, 100.0), (90.0, 100.0), (120.0, 100.0)] {
        for option_type in [OptionType::Call, OptionType::Put] {
            let value = bs_price(option_type, spot, strike, r, q, tau, 1e-9).unwrap();
            let limit = discounted_intrinsic(option_type, spot, strike, q, r, tau);
            assert_abs_diff_eq!(value, limit, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_expiry_limit() {
    let (r, q, sigma) = (0.05, 0.02, 0.2);
    let tau = 1e-12;
    assert_abs_diff_eq!(
        bs_price(OptionType::Call, 110.0, 100.0, r, q, tau, sigma).unwrap(),
        Payoff::call(100.0).value(110.0),
        epsilon = 1e-6
    );
    assert_abs_diff_eq!(
        bs_price(OptionType::Call, 90.0, 100.0, r, q, tau, sigma).unwrap(),
        0.0,
        epsilon = 1e-6
    );
    assert_abs_diff_eq!(
        bs_price(OptionType::Call, 100.0, 100.0, r, q, tau, sigma).unwrap(),
        0.0,
        epsilon = 1e-4
    );
    assert_abs_diff_eq!(
        bs_price(OptionType::Put, 90.0, 100.0, r, q, tau, sigma).unwrap(),
        10.0,
        epsilon = 1e-6
    );
}

#[test]
fn test_non_positive_inputs() {
    let params = reference_params();
    assert!(matches!(
        price(&params.with_volatility(0.0), &Payoff::call(100.0)),
        Err(PricingError::Domain(DomainError::NonPositiveVolatility(_)))
    ));

    let mut zero_spot = params;
    zero_spot.spot = 0.0;
    assert!(matches!(
        price(&zero_spot, &Payoff::put(100.0)),
        Err(PricingError::Domain(DomainError::NonPositiveSpot(_)))
    ));

    let mut zero_strike = params;
    zero_strike.strike = 0.0;
    assert!(matches!(
        price(&zero_strike, &Payoff::call(0.0)),
        Err(PricingError::Domain(DomainError::NonPositiveStrike(_)))
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_put_call_parity(
        spot in 10.0f64..500.0,
        strike in 10.0f64..500.0,
        q in 0.001f64..0.1,
        r in 0.001f64..0.1,
        sigma in 0.01f64..1.0,
        days in 1i64..3650,
    ) {
        let params = params_with_days(spot, strike, q, r, sigma, days);
        let tau = params.time_to_maturity();
        let call = price(&params, &Payoff::call(strike)).unwrap().value;
        let put = price(&params, &Payoff::put(strike)).unwrap().value;

        let rhs = parity_rhs(spot, strike, q, r, tau);
        let tol = 1e-9 * (spot + strike);
        prop_assert!(
            (call - put - rhs).abs() <= tol,
            "C - P = {}, expected {}",
            call - put,
            rhs
        );
    }

    #[test]
    fn test_no_arbitrage_bounds(
        spot in 10.0f64..500.0,
        strike in 10.0f64..500.0,
        q in 0.001f64..0.1,
        r in 0.001f64..0.1,
        sigma in 0.01f64..1.0,
        days in 1i64..3650,
    ) {
        let params = params_with_days(spot, strike, q, r, sigma, days);
        let tau = params.time_to_maturity();
        let eps = 1e-9 * (spot + strike);

        let call = price(&params, &Payoff::call(strike)).unwrap().value;
        let put = price(&params, &Payoff::put(strike)).unwrap().value;

        let call_floor = discounted_intrinsic(OptionType::Call, spot, strike, q, r, tau);
        let put_floor = discounted_intrinsic(OptionType::Put, spot, strike, q, r, tau);

        prop_assert!(call >= call_floor - eps);
        prop_assert!(put >= put_floor - eps);
        prop_assert!(call <= spot * (-q * tau).exp() + eps);
        prop_assert!(put <= strike * (-r * tau).exp() + eps);
    }

    #[test]
    fn test_price_is_pure(
        spot in 10.0f64..500.0,
        sigma in 0.01f64..1.0,
        days in 1i64..3650,
    ) {
        let params = params_with_days(spot, 100.0, 0.02, 0.05, sigma, days);
        let a = price(&params, &Payoff::call(100.0)).unwrap();
        let b = price(&params, &Payoff::call(100.0)).unwrap();
        prop_assert_eq!(a.value.to_bits(), b.value.to_bits());
        prop_assert_eq!(a, b);
    }
}
