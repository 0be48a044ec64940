#![allow(dead_code)]

use bsm_pricer::{DayCount, MarketParameters, OptionType, PricerConfig};
use chrono::NaiveDate;

/// S = K = 100, q = 2%, r = 5%, σ = 20%, τ = 1 under Act/365F.
pub const REFERENCE_CALL: f64 = 9.227_005_508_154_036;
pub const REFERENCE_PUT: f64 = 6.330_080_627_549_918;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

/// Market parameters of the reference scenario.
pub fn reference_params() -> MarketParameters {
    PricerConfig::reference().market_parameters()
}

/// Market parameters with an explicit year fraction encoded as a day offset under Act/365F.
pub fn params_with_days(
    spot: f64,
    strike: f64,
    q: f64,
    r: f64,
    sigma: f64,
    days: i64,
) -> MarketParameters {
    let valuation = date(2023, 5, 16);
    MarketParameters::new(
        spot,
        strike,
        q,
        r,
        sigma,
        valuation,
        valuation + chrono::Duration::days(days),
        DayCount::Actual365Fixed,
    )
}

/// S·e^{-qτ} - K·e^{-rτ}, the right-hand side of put-call parity.
pub fn parity_rhs(spot: f64, strike: f64, q: f64, r: f64, tau: f64) -> f64 {
    spot * (-q * tau).exp() - strike * (-r * tau).exp()
}

/// Discounted intrinsic value of a vanilla option.
pub fn discounted_intrinsic(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    q: f64,
    r: f64,
    tau: f64,
) -> f64 {
    let forward_gap = parity_rhs(spot, strike, q, r, tau);
    match option_type {
        OptionType::Call => forward_gap.max(0.0),
        OptionType::Put => (-forward_gap).max(0.0),
    }
}

/// Writes `contents` to a fresh file under the target temp dir and returns its path.
pub fn write_temp_file(name: &str, contents: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("bsm-pricer-tests");
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write temp file");
    path
}
