//! Closed-form Black-Scholes-Merton pricing of European options with a
//! continuous dividend yield, plus the analytic Greeks of the same formula.
//!
//! ```text
//! d1 = [ln(S/K) + (r - q + σ²/2)·τ] / (σ·√τ)
//! d2 = d1 - σ·√τ
//! call = S·e^{-qτ}·Φ(d1) - K·e^{-rτ}·Φ(d2)
//! put  = K·e^{-rτ}·Φ(-d2) - S·e^{-qτ}·Φ(-d1)
//! ```
//!
//! [`price`] runs the post-condition checks of [`crate::validation`] before
//! returning; [`price_unchecked`] skips them.

use tracing::{debug, trace};

use crate::error::{ensure_finite, DomainError, PricingError};
use crate::market::{DerivedFactors, MarketParameters};
use crate::models::payoff::{OptionType, Payoff};
use crate::models::utils::{norm_cdf, norm_pdf};
use crate::validation::Validator;

/// Present value of an option together with the inputs it was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingResult {
    /// Theoretical present value
    pub value: f64,
    pub option_type: OptionType,
    pub spot: f64,
    pub strike: f64,
    pub risk_free_rate: f64,
    pub dividend_yield: f64,
    pub factors: DerivedFactors,
    pub d1: f64,
    pub d2: f64,
}

impl PricingResult {
    /// max(0, ω·(S·e^{-qτ} - K·e^{-rτ})), the discounted intrinsic value.
    pub fn lower_bound(&self) -> f64 {
        let sign = self.option_type.sign();
        (sign * (self.discounted_spot() - self.discounted_strike())).max(0.0)
    }

    /// S·e^{-qτ} for calls, K·e^{-rτ} for puts.
    pub fn upper_bound(&self) -> f64 {
        match self.option_type {
            OptionType::Call => self.discounted_spot(),
            OptionType::Put => self.discounted_strike(),
        }
    }

    pub fn discounted_spot(&self) -> f64 {
        self.spot * self.factors.dividend_discount()
    }

    pub fn discounted_strike(&self) -> f64 {
        self.strike * self.factors.discount
    }
}

/// Analytic sensitivities of the closed form.
///
/// Theta is the derivative with respect to calendar time per year, so it is
/// usually negative for long positions. Rho and dividend rho are per unit
/// change of the continuously compounded rate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    pub delta: f64,
    pub gamma: f64,
    pub vega: f64,
    pub theta: f64,
    pub rho: f64,
    pub dividend_rho: f64,
    /// Risk-neutral probability of finishing in the money, Φ(ω·d2)
    pub itm_cash_probability: f64,
}

/// Evaluates the closed form for one option once d1 and d2 are known.
#[derive(Debug, Clone, Copy)]
pub struct BlackScholesCalculator {
    option_type: OptionType,
    spot: f64,
    strike: f64,
    risk_free_rate: f64,
    dividend_yield: f64,
    volatility: f64,
    factors: DerivedFactors,
    d1: f64,
    d2: f64,
}

impl BlackScholesCalculator {
    /// Builds a calculator from flat inputs with τ given as a year fraction.
    pub fn new(
        payoff: &Payoff,
        spot: f64,
        risk_free_rate: f64,
        dividend_yield: f64,
        volatility: f64,
        tau: f64,
    ) -> Result<Self, PricingError> {
        let factors = DerivedFactors::from_time(tau, risk_free_rate, dividend_yield, volatility)?;
        Self::with_factors(payoff, spot, risk_free_rate, dividend_yield, volatility, factors)
    }

    /// Builds a calculator from market parameters, deriving τ from the dates.
    pub fn from_params(params: &MarketParameters, payoff: &Payoff) -> Result<Self, PricingError> {
        if params.strike != payoff.strike {
            return Err(DomainError::StrikeMismatch {
                market: params.strike,
                payoff: payoff.strike,
            }
            .into());
        }
        let factors = params.derive_factors()?;
        Self::with_factors(
            payoff,
            params.spot,
            params.risk_free_rate,
            params.dividend_yield,
            params.volatility,
            factors,
        )
    }

    // `factors` must come from the same τ, r, q and σ.
    fn with_factors(
        payoff: &Payoff,
        spot: f64,
        risk_free_rate: f64,
        dividend_yield: f64,
        volatility: f64,
        factors: DerivedFactors,
    ) -> Result<Self, PricingError> {
        if !spot.is_finite() {
            return Err(DomainError::NonFiniteInput {
                name: "spot",
                value: spot,
            }
            .into());
        }
        if !payoff.strike.is_finite() {
            return Err(DomainError::NonFiniteInput {
                name: "strike",
                value: payoff.strike,
            }
            .into());
        }
        if spot <= 0.0 {
            return Err(DomainError::NonPositiveSpot(spot).into());
        }
        if payoff.strike <= 0.0 {
            return Err(DomainError::NonPositiveStrike(payoff.strike).into());
        }

        let log_moneyness = ensure_finite("ln(S/K)", (spot / payoff.strike).ln())?;
        let v = factors.vol_std_dev;
        let carry = risk_free_rate - dividend_yield + 0.5 * volatility * volatility;
        let drift = carry * factors.tau;
        let d1 = ensure_finite("d1", (log_moneyness + drift) / v)?;
        let d2 = ensure_finite("d2", d1 - v)?;

        trace!(d1, d2, tau = factors.tau, "black-scholes terms");

        Ok(Self {
            option_type: payoff.option_type,
            spot,
            strike: payoff.strike,
            risk_free_rate,
            dividend_yield,
            volatility,
            factors,
            d1,
            d2,
        })
    }

    pub fn d1(&self) -> f64 {
        self.d1
    }

    pub fn d2(&self) -> f64 {
        self.d2
    }

    pub fn factors(&self) -> &DerivedFactors {
        &self.factors
    }

    /// Present value, floored at zero against rounding in the far wings.
    pub fn value(&self) -> Result<f64, PricingError> {
        let w = self.option_type.sign();
        let fwd_leg = self.spot * self.factors.dividend_discount() * norm_cdf(w * self.d1);
        let strike_leg = self.strike * self.factors.discount * norm_cdf(w * self.d2);
        let value = ensure_finite("option value", w * (fwd_leg - strike_leg))?;
        Ok(value.max(0.0))
    }

    pub fn greeks(&self) -> Greeks {
        let w = self.option_type.sign();
        let tau = self.factors.tau;
        let sqrt_tau = tau.sqrt();
        let dq = self.factors.dividend_discount();
        let df = self.factors.discount;
        let pdf_d1 = norm_pdf(self.d1);
        let cdf_d1 = norm_cdf(w * self.d1);
        let cdf_d2 = norm_cdf(w * self.d2);

        let decay = -self.spot * dq * pdf_d1 * self.volatility / (2.0 * sqrt_tau);

        Greeks {
            delta: w * dq * cdf_d1,
            gamma: dq * pdf_d1 / (self.spot * self.factors.vol_std_dev),
            vega: self.spot * dq * pdf_d1 * sqrt_tau,
            theta: decay - w * self.risk_free_rate * self.strike * df * cdf_d2
                + w * self.dividend_yield * self.spot * dq * cdf_d1,
            rho: w * self.strike * tau * df * cdf_d2,
            dividend_rho: -w * self.spot * tau * dq * cdf_d1,
            itm_cash_probability: cdf_d2,
        }
    }

    pub fn result(&self) -> Result<PricingResult, PricingError> {
        Ok(PricingResult {
            value: self.value()?,
            option_type: self.option_type,
            spot: self.spot,
            strike: self.strike,
            risk_free_rate: self.risk_free_rate,
            dividend_yield: self.dividend_yield,
            factors: self.factors,
            d1: self.d1,
            d2: self.d2,
        })
    }
}

/// Prices a European option and checks the result against the no-arbitrage bounds.
///
/// # Errors
///
/// * [`PricingError::Domain`] if S, K or σ are not positive, the maturity does
///   not fall after the valuation date, or the payoff strike differs from the
///   market strike.
/// * [`PricingError::Numerical`] if an intermediate quantity is not finite.
/// * [`PricingError::Validation`] if a factor or the price breaks a sanity bound.
///
/// # Example
///
/// ```rust
/// use bsm_pricer::{price, DayCount, MarketParameters, Payoff};
/// use chrono::NaiveDate;
///
/// let params = MarketParameters::new(
///     100.0, 100.0, 0.02, 0.05, 0.20,
///     NaiveDate::from_ymd_opt(2023, 5, 16).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
///     DayCount::Actual365Fixed,
/// );
/// let result = price(&params, &Payoff::call(100.0))?;
/// assert!((result.value - 9.227005508154036).abs() < 1e-9);
/// # Ok::<(), bsm_pricer::PricingError>(())
/// ```
pub fn price(params: &MarketParameters, payoff: &Payoff) -> Result<PricingResult, PricingError> {
    price_with_validator(params, payoff, &Validator::default())
}

/// [`price`] with a caller-supplied [`Validator`].
pub fn price_with_validator(
    params: &MarketParameters,
    payoff: &Payoff,
    validator: &Validator,
) -> Result<PricingResult, PricingError> {
    let result = price_unchecked(params, payoff)?;
    validator.validate(&result)?;
    debug!(
        option_type = %result.option_type,
        value = result.value,
        tau = result.factors.tau,
        "priced european option"
    );
    Ok(result)
}

/// Prices without the post-condition checks.
pub fn price_unchecked(
    params: &MarketParameters,
    payoff: &Payoff,
) -> Result<PricingResult, PricingError> {
    BlackScholesCalculator::from_params(params, payoff)?.result()
}

/// Analytic Greeks for the option described by `params` and `payoff`.
pub fn greeks(params: &MarketParameters, payoff: &Payoff) -> Result<Greeks, PricingError> {
    Ok(BlackScholesCalculator::from_params(params, payoff)?.greeks())
}

/// Validated price from flat inputs with τ given directly as a year fraction.
pub fn bs_price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    r: f64,
    q: f64,
    tau: f64,
    sigma: f64,
) -> Result<f64, PricingError> {
    let payoff = Payoff::new(option_type, strike);
    let result = BlackScholesCalculator::new(&payoff, spot, r, q, sigma, tau)?.result()?;
    Validator::default().validate(&result)?;
    Ok(result.value)
}
