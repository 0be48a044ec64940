//! # bsm-pricer: Closed-Form European Option Pricing with Sanity Checks
//!
//! `bsm-pricer` evaluates the Black-Scholes-Merton price of European calls and
//! puts on an underlying paying a continuous dividend yield, and refuses to
//! hand back a number that breaks the model's no-arbitrage bounds.
//!
//! ## Core Features
//!
//! - **Closed form**: `S·e^{-qτ}·Φ(d1) - K·e^{-rτ}·Φ(d2)` and its put counterpart
//! - **Explicit dates**: time to maturity comes from the valuation date and maturity
//!   carried on [`MarketParameters`], under a chosen [`DayCount`]
//! - **Post-condition checks**: growth and discount factors, volatility scale,
//!   positivity, lower and upper no-arbitrage bounds
//! - **Typed errors**: domain, numerical and validation failures are distinct
//!   [`PricingError`] variants
//! - **Greeks** and **batch pricing** of CSV parameter sets
//!
//! ## Quick Start
//!
//! ```rust
//! use bsm_pricer::{price, DayCount, MarketParameters, Payoff};
//! use chrono::NaiveDate;
//!
//! let params = MarketParameters::new(
//!     100.0,  // spot
//!     100.0,  // strike
//!     0.02,   // dividend yield
//!     0.05,   // risk-free rate
//!     0.20,   // volatility
//!     NaiveDate::from_ymd_opt(2023, 5, 16).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
//!     DayCount::Actual365Fixed,
//! );
//!
//! let result = price(&params, &Payoff::call(100.0))?;
//! println!("{}", bsm_pricer::report_line(result.value));
//! # Ok::<(), bsm_pricer::PricingError>(())
//! ```

// ================================================================================================
// MODULES
// ================================================================================================

#[cfg(feature = "serde")]
pub mod batch;
#[cfg(feature = "serde")]
pub mod config;
pub mod error;
pub mod market;
pub mod models;
pub mod validation;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

pub use error::{Bound, DomainError, PricingError, ValidationError};
pub use market::{DayCount, DerivedFactors, MarketParameters};
pub use models::bs::{
    bs_price, greeks, price, price_unchecked, price_with_validator, BlackScholesCalculator,
    Greeks, PricingResult,
};
pub use models::payoff::{OptionType, Payoff};
pub use validation::Validator;

#[cfg(feature = "serde")]
pub use batch::{load_batch, price_batch, read_batch, BatchRow};
#[cfg(feature = "serde")]
pub use config::{BatchConfig, MarketConfig, PricerConfig};

// ================================================================================================
// REPORTING
// ================================================================================================

/// The single line printed for a successful evaluation.
pub fn report_line(value: f64) -> String {
    format!("The theoretical price of the option is: {}", value)
}

/// Prices the option described by a configuration with its own tolerance.
#[cfg(feature = "serde")]
pub fn price_config(config: &PricerConfig) -> Result<PricingResult, PricingError> {
    price_with_validator(
        &config.market_parameters(),
        &config.payoff(),
        &config.validator(),
    )
}
