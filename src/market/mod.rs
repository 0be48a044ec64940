//! Market inputs and the factors derived from them.
//!
//! [`MarketParameters`] is a plain immutable value: the valuation date travels
//! with the parameters instead of living in process-wide settings, and flat
//! rates and volatility are stored as scalars rather than shared term
//! structures.

pub mod day_count;

use chrono::NaiveDate;

use crate::error::{ensure_finite, DomainError, PricingError};
pub use day_count::DayCount;

/// Scalar market inputs for a single European option evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketParameters {
    /// Spot price of the underlying (S)
    pub spot: f64,
    /// Strike (K)
    pub strike: f64,
    /// Continuously compounded dividend yield (q)
    pub dividend_yield: f64,
    /// Continuously compounded risk-free rate (r)
    pub risk_free_rate: f64,
    /// Annualized volatility (σ)
    pub volatility: f64,
    pub valuation_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub day_count: DayCount,
}

impl MarketParameters {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spot: f64,
        strike: f64,
        dividend_yield: f64,
        risk_free_rate: f64,
        volatility: f64,
        valuation_date: NaiveDate,
        maturity_date: NaiveDate,
        day_count: DayCount,
    ) -> Self {
        Self {
            spot,
            strike,
            dividend_yield,
            risk_free_rate,
            volatility,
            valuation_date,
            maturity_date,
            day_count,
        }
    }

    /// Returns a copy with a different valuation date.
    pub fn with_valuation_date(mut self, valuation_date: NaiveDate) -> Self {
        self.valuation_date = valuation_date;
        self
    }

    /// Returns a copy with a different volatility.
    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    /// Time to maturity under the configured day count.
    pub fn time_to_maturity(&self) -> f64 {
        self.day_count
            .year_fraction(self.valuation_date, self.maturity_date)
    }

    /// Checks the preconditions of the closed form that do not depend on dates.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (name, value) in [
            ("spot", self.spot),
            ("strike", self.strike),
            ("dividend yield", self.dividend_yield),
            ("risk-free rate", self.risk_free_rate),
            ("volatility", self.volatility),
        ] {
            if !value.is_finite() {
                return Err(DomainError::NonFiniteInput { name, value });
            }
        }
        if self.spot <= 0.0 {
            return Err(DomainError::NonPositiveSpot(self.spot));
        }
        if self.strike <= 0.0 {
            return Err(DomainError::NonPositiveStrike(self.strike));
        }
        if self.volatility <= 0.0 {
            return Err(DomainError::NonPositiveVolatility(self.volatility));
        }
        Ok(())
    }

    /// Validates the inputs and computes τ, G, D and v.
    pub fn derive_factors(&self) -> Result<DerivedFactors, PricingError> {
        self.validate()?;

        let tau = self.time_to_maturity();
        if tau <= 0.0 {
            return Err(DomainError::MaturityNotAfterValuation {
                tau,
                valuation: self.valuation_date,
                maturity: self.maturity_date,
            }
            .into());
        }

        DerivedFactors::from_time(tau, self.risk_free_rate, self.dividend_yield, self.volatility)
    }
}

/// Quantities derived from [`MarketParameters`] for a given valuation date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedFactors {
    /// Time to maturity in years (τ)
    pub tau: f64,
    /// exp(q·τ) (G)
    pub growth: f64,
    /// exp(-r·τ) (D)
    pub discount: f64,
    /// σ·√τ (v)
    pub vol_std_dev: f64,
}

impl DerivedFactors {
    /// Computes the factors directly from a year fraction, bypassing dates.
    pub fn from_time(
        tau: f64,
        risk_free_rate: f64,
        dividend_yield: f64,
        volatility: f64,
    ) -> Result<Self, PricingError> {
        for (name, value) in [
            ("time to maturity", tau),
            ("risk-free rate", risk_free_rate),
            ("dividend yield", dividend_yield),
            ("volatility", volatility),
        ] {
            if !value.is_finite() {
                return Err(DomainError::NonFiniteInput { name, value }.into());
            }
        }
        if tau <= 0.0 {
            return Err(DomainError::NonPositiveTime(tau).into());
        }
        if volatility <= 0.0 {
            return Err(DomainError::NonPositiveVolatility(volatility).into());
        }

        let growth = ensure_finite("growth factor", (dividend_yield * tau).exp())?;
        let discount = ensure_finite("discount factor", (-risk_free_rate * tau).exp())?;
        let vol_std_dev = ensure_finite("volatility-time scale", volatility * tau.sqrt())?;

        Ok(Self {
            tau,
            growth,
            discount,
            vol_std_dev,
        })
    }

    /// exp(-q·τ), the factor applied to spot in the closed form.
    pub fn dividend_discount(&self) -> f64 {
        1.0 / self.growth
    }

    /// Forward price S·exp((r-q)·τ).
    pub fn forward(&self, spot: f64) -> f64 {
        spot * self.dividend_discount() / self.discount
    }
}
