//! TOML configuration for the pricer.
//!
//! Every field has a default, so an empty document yields the reference
//! scenario: S = K = 100, q = 2%, r = 5%, σ = 20%, Actual/365 Fixed, maturity
//! 2024-05-15 valued on 2023-05-16. Dates are written as quoted ISO strings.
//!
//! ```toml
//! option_type = "put"
//!
//! [market]
//! spot = 105.0
//! valuation_date = "2023-11-15"
//! day_count = "actual360"
//! ```
//!
//! Day counts are spelled `actual365_fixed`, `actual360`, `actual36525` and
//! `thirty360`.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::market::{DayCount, MarketParameters};
use crate::models::payoff::{OptionType, Payoff};
use crate::validation::{Validator, DEFAULT_TOLERANCE};

/// Market inputs as they appear in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_spot")]
    pub spot: f64,

    #[serde(default = "default_strike")]
    pub strike: f64,

    #[serde(default = "default_dividend_yield")]
    pub dividend_yield: f64,

    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,

    #[serde(default = "default_volatility")]
    pub volatility: f64,

    #[serde(default = "default_valuation_date")]
    pub valuation_date: NaiveDate,

    #[serde(default = "default_maturity_date")]
    pub maturity_date: NaiveDate,

    #[serde(default)]
    pub day_count: DayCount,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            spot: default_spot(),
            strike: default_strike(),
            dividend_yield: default_dividend_yield(),
            risk_free_rate: default_risk_free_rate(),
            volatility: default_volatility(),
            valuation_date: default_valuation_date(),
            maturity_date: default_maturity_date(),
            day_count: DayCount::default(),
        }
    }
}

/// Settings for pricing a CSV file of parameter sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Price rows on the rayon thread pool
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Run the post-condition checks on every row
    #[serde(default = "default_true")]
    pub validate: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            validate: true,
        }
    }
}

/// Main configuration struct
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricerConfig {
    #[serde(default)]
    pub market: MarketConfig,

    #[serde(default = "default_option_type")]
    pub option_type: OptionType,

    /// Relative tolerance for the price bounds
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    #[serde(default)]
    pub batch: BatchConfig,
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            market: MarketConfig::default(),
            option_type: default_option_type(),
            tolerance: default_tolerance(),
            batch: BatchConfig::default(),
        }
    }
}

impl PricerConfig {
    /// The European call from the reference scenario.
    pub fn reference() -> Self {
        Self::default()
    }

    /// Same market, put payoff.
    pub fn reference_put() -> Self {
        Self {
            option_type: OptionType::Put,
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to parse pricer configuration")
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn market_parameters(&self) -> MarketParameters {
        let m = &self.market;
        MarketParameters::new(
            m.spot,
            m.strike,
            m.dividend_yield,
            m.risk_free_rate,
            m.volatility,
            m.valuation_date,
            m.maturity_date,
            m.day_count,
        )
    }

    pub fn payoff(&self) -> Payoff {
        Payoff::new(self.option_type, self.market.strike)
    }

    pub fn validator(&self) -> Validator {
        Validator::new(self.tolerance)
    }
}

fn default_spot() -> f64 {
    100.0
}

fn default_strike() -> f64 {
    100.0
}

fn default_dividend_yield() -> f64 {
    0.02
}

fn default_risk_free_rate() -> f64 {
    0.05
}

fn default_volatility() -> f64 {
    0.20
}

// One Act/365F year before maturity
fn default_valuation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 5, 16).unwrap_or_default()
}

fn default_maturity_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 15).unwrap_or_default()
}

fn default_option_type() -> OptionType {
    OptionType::Call
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_true() -> bool {
    true
}
