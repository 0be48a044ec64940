//! Post-condition checks applied to a computed price before it is trusted.
//!
//! Each check is a standalone function so it can be exercised on its own;
//! [`Validator::validate`] runs all of them in order and stops at the first
//! violation.
//!
//! The lower bound is the textbook `max(0, ω·(S·e^{-qτ} - K·e^{-rτ}))`. A
//! variant seen in the wild, `S·D - K·G`, swaps the roles of the discount and
//! growth factors and is deliberately not used.

use tracing::warn;

use crate::error::{Bound, ValidationError};
use crate::models::bs::PricingResult;

/// Default relative tolerance for the price bounds.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Runs the sanity bounds on a [`PricingResult`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Validator {
    /// Relative tolerance, scaled by `S·e^{-qτ} + K·e^{-rτ}`, for the price bounds
    pub tolerance: f64,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Validator {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn validate(&self, result: &PricingResult) -> Result<(), ValidationError> {
        let factors = &result.factors;
        let eps = self.tolerance * (result.discounted_spot() + result.discounted_strike());

        check_growth_factor(result.dividend_yield, factors.tau, factors.growth)
            .and_then(|_| {
                check_discount_factor(result.risk_free_rate, factors.tau, factors.discount)
            })
            .and_then(|_| check_volatility_scale(factors.vol_std_dev))
            .and_then(|_| check_positive_price(result.value, result.lower_bound()))
            .and_then(|_| check_lower_bound(result.value, result.lower_bound(), eps))
            .and_then(|_| check_upper_bound(result.value, result.upper_bound(), eps))
            .inspect_err(|e| {
                warn!(
                    bound = ?e.bound,
                    value = e.value,
                    limit = e.limit,
                    option_type = %result.option_type,
                    "price failed validation"
                )
            })
    }
}

/// G = exp(q·τ) must exceed 1 whenever q > 0.
///
/// Skipped when q·τ is below machine epsilon, where `exp` rounds to exactly 1.
pub fn check_growth_factor(
    dividend_yield: f64,
    tau: f64,
    growth: f64,
) -> Result<(), ValidationError> {
    if dividend_yield * tau >= f64::EPSILON && growth <= 1.0 {
        return Err(ValidationError::new(Bound::GrowthFactor, growth, 1.0));
    }
    Ok(())
}

/// D = exp(-r·τ) must lie strictly inside (0, 1) whenever r > 0.
///
/// The upper end is not checked when r·τ is below machine epsilon.
pub fn check_discount_factor(
    risk_free_rate: f64,
    tau: f64,
    discount: f64,
) -> Result<(), ValidationError> {
    if risk_free_rate <= 0.0 {
        return Ok(());
    }
    if discount <= 0.0 {
        return Err(ValidationError::new(Bound::DiscountFactor, discount, 0.0));
    }
    if risk_free_rate * tau >= f64::EPSILON && discount >= 1.0 {
        return Err(ValidationError::new(Bound::DiscountFactor, discount, 1.0));
    }
    Ok(())
}

/// v = σ·√τ must be positive.
pub fn check_volatility_scale(vol_std_dev: f64) -> Result<(), ValidationError> {
    if vol_std_dev <= 0.0 {
        return Err(ValidationError::new(Bound::VolatilityScale, vol_std_dev, 0.0));
    }
    Ok(())
}

/// The price must be positive.
///
/// A price of exactly zero is accepted only when the discounted intrinsic value
/// is zero too, which is where a far out-of-the-money value underflows.
pub fn check_positive_price(value: f64, lower_bound: f64) -> Result<(), ValidationError> {
    let degenerate = value == 0.0 && lower_bound == 0.0;
    if value > 0.0 || degenerate {
        Ok(())
    } else {
        Err(ValidationError::new(Bound::PositivePrice, value, 0.0))
    }
}

/// The price must not fall below the discounted intrinsic value by more than `eps`.
pub fn check_lower_bound(value: f64, lower_bound: f64, eps: f64) -> Result<(), ValidationError> {
    if value < lower_bound - eps {
        return Err(ValidationError::new(Bound::LowerBound, value, lower_bound));
    }
    Ok(())
}

/// The price must not exceed `S·e^{-qτ}` (call) or `K·e^{-rτ}` (put) by more than `eps`.
pub fn check_upper_bound(value: f64, upper_bound: f64, eps: f64) -> Result<(), ValidationError> {
    if value > upper_bound + eps {
        return Err(ValidationError::new(Bound::UpperBound, value, upper_bound));
    }
    Ok(())
}
