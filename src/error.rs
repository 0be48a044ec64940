//! Error taxonomy for the pricer.
//!
//! Three families, all fatal for a single evaluation:
//! - [`DomainError`]: inputs for which the closed form is undefined.
//! - [`PricingError::Numerical`]: a log/exp/sqrt produced a non-finite value.
//! - [`ValidationError`]: a computed factor or price broke a sanity bound.

use std::fmt;
use thiserror::Error;

/// Top-level error returned by every pricing operation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("numerical error: {quantity} is not finite ({value})")]
    Numerical { quantity: &'static str, value: f64 },

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Market inputs outside the domain of the Black-Scholes formula.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("spot price must be positive, got {0}")]
    NonPositiveSpot(f64),

    #[error("strike must be positive, got {0}")]
    NonPositiveStrike(f64),

    #[error("volatility must be positive, got {0}")]
    NonPositiveVolatility(f64),

    #[error("time to maturity must be positive, got {0}")]
    NonPositiveTime(f64),

    #[error("maturity {maturity} must fall after valuation date {valuation} (year fraction {tau})")]
    MaturityNotAfterValuation {
        tau: f64,
        valuation: chrono::NaiveDate,
        maturity: chrono::NaiveDate,
    },

    #[error("payoff strike {payoff} does not match market strike {market}")]
    StrikeMismatch { market: f64, payoff: f64 },

    #[error("{name} must be finite, got {value}")]
    NonFiniteInput { name: &'static str, value: f64 },
}

/// Which sanity bound was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    GrowthFactor,
    DiscountFactor,
    VolatilityScale,
    PositivePrice,
    LowerBound,
    UpperBound,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Bound::GrowthFactor => "growth factor must exceed 1 for a positive dividend yield",
            Bound::DiscountFactor => "discount factor must lie in (0, 1) for a positive rate",
            Bound::VolatilityScale => "volatility-time scale must be positive",
            Bound::PositivePrice => "option price must be positive",
            Bound::LowerBound => "option price is below the no-arbitrage lower bound",
            Bound::UpperBound => "option price is above the no-arbitrage upper bound",
        };
        f.write_str(s)
    }
}

/// A failed post-condition with the offending value and the limit it was checked against.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{bound}: value {value}, limit {limit}")]
pub struct ValidationError {
    pub bound: Bound,
    pub value: f64,
    pub limit: f64,
}

impl ValidationError {
    pub fn new(bound: Bound, value: f64, limit: f64) -> Self {
        Self {
            bound,
            value,
            limit,
        }
    }
}

/// Returns `value` if it is finite, otherwise a [`PricingError::Numerical`] naming it.
pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::Numerical { quantity, value })
    }
}
