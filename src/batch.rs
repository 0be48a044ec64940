//! Pricing many independent parameter sets read from CSV.
//!
//! Expected header:
//!
//! ```text
//! option_type,spot,strike,dividend_yield,risk_free_rate,volatility,valuation_date,maturity_date[,day_count]
//! ```
//!
//! Each row is priced on its own; a failing row yields an `Err` in its slot and
//! does not affect the others. Output order matches input order.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::BatchConfig;
use crate::error::PricingError;
use crate::market::{DayCount, MarketParameters};
use crate::models::bs::{price_unchecked, price_with_validator, PricingResult};
use crate::models::payoff::{OptionType, Payoff};
use crate::validation::Validator;

/// One parameter set as stored in the CSV file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchRow {
    pub option_type: OptionType,
    pub spot: f64,
    pub strike: f64,
    pub dividend_yield: f64,
    pub risk_free_rate: f64,
    pub volatility: f64,
    pub valuation_date: NaiveDate,
    pub maturity_date: NaiveDate,
    /// Missing column or empty field means Actual/365 Fixed
    #[serde(default)]
    pub day_count: Option<DayCount>,
}

impl BatchRow {
    pub fn market_parameters(&self) -> MarketParameters {
        MarketParameters::new(
            self.spot,
            self.strike,
            self.dividend_yield,
            self.risk_free_rate,
            self.volatility,
            self.valuation_date,
            self.maturity_date,
            self.day_count.unwrap_or_default(),
        )
    }

    pub fn payoff(&self) -> Payoff {
        Payoff::new(self.option_type, self.strike)
    }
}

/// Reads rows from any CSV source.
pub fn read_batch<R: Read>(reader: R) -> Result<Vec<BatchRow>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut rows = Vec::new();
    for (i, record) in reader.deserialize().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let row: BatchRow =
            record.with_context(|| format!("invalid batch row at line {}", i + 2))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Reads rows from a CSV file.
pub fn load_batch(path: impl AsRef<Path>) -> Result<Vec<BatchRow>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open batch file {}", path.display()))?;
    read_batch(file).with_context(|| format!("failed to read batch file {}", path.display()))
}

/// Prices every row, in parallel when `config.parallel` is set.
pub fn price_batch(
    rows: &[BatchRow],
    config: &BatchConfig,
    validator: &Validator,
) -> Vec<Result<PricingResult, PricingError>> {
    let price_row = |row: &BatchRow| {
        let params = row.market_parameters();
        let payoff = row.payoff();
        if config.validate {
            price_with_validator(&params, &payoff, validator)
        } else {
            price_unchecked(&params, &payoff)
        }
    };

    let results: Vec<_> = if config.parallel {
        rows.par_iter().map(price_row).collect()
    } else {
        rows.iter().map(price_row).collect()
    };

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(rows = rows.len(), failed, "batch priced");
    for (i, result) in results.iter().enumerate() {
        if let Err(e) = result {
            debug!(row = i, error = %e, "batch row failed");
        }
    }

    results
}
