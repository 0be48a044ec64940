//! Command-line front end: prices the configured option and prints it.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bsm_pricer::{
    greeks, load_batch, price_batch, price_config, report_line, OptionType, PricerConfig,
};

/// Black-Scholes-Merton price of a European option
#[derive(Parser, Debug)]
#[command(name = "bsm-pricer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Valuation date (YYYY-MM-DD), overrides the config
    #[arg(long, value_name = "DATE")]
    valuation_date: Option<NaiveDate>,

    /// Option type (call or put), overrides the config
    #[arg(long)]
    option_type: Option<OptionType>,

    /// Price every row of a CSV file instead of the configured option
    #[arg(long, value_name = "CSV")]
    batch: Option<PathBuf>,

    /// Also print the Greeks
    #[arg(long)]
    greeks: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "BSM_LOG_LEVEL", default_value = "warn")]
    log_level: String,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(args: &Args) -> Result<PricerConfig> {
    let mut config = match &args.config {
        Some(path) => PricerConfig::from_file(path)?,
        None => PricerConfig::reference(),
    };
    if let Some(date) = args.valuation_date {
        config.market.valuation_date = date;
    }
    if let Some(option_type) = args.option_type {
        config.option_type = option_type;
    }
    Ok(config)
}

fn run_batch(path: &Path, config: &PricerConfig) -> Result<()> {
    let rows = load_batch(path)?;
    let results = price_batch(&rows, &config.batch, &config.validator());

    let mut failed = 0;
    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(r) => println!("{}\t{}\t{}", i + 1, r.option_type, r.value),
            Err(e) => {
                failed += 1;
                println!("{}\terror\t{}", i + 1, e);
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} batch rows failed", failed, results.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = load_config(&args)?;
    tracing::info!(
        spot = config.market.spot,
        strike = config.market.strike,
        dividend_yield = config.market.dividend_yield,
        risk_free_rate = config.market.risk_free_rate,
        volatility = config.market.volatility,
        valuation_date = %config.market.valuation_date,
        maturity_date = %config.market.maturity_date,
        day_count = config.market.day_count.name(),
        "Pricer configuration loaded"
    );

    if let Some(path) = &args.batch {
        return run_batch(path, &config);
    }

    let result = price_config(&config).context("option pricing failed")?;
    println!("{}", report_line(result.value));

    if args.greeks {
        let g = greeks(&config.market_parameters(), &config.payoff())?;
        println!("delta: {}", g.delta);
        println!("gamma: {}", g.gamma);
        println!("vega: {}", g.vega);
        println!("theta: {}", g.theta);
        println!("rho: {}", g.rho);
        println!("dividend rho: {}", g.dividend_rho);
        println!("itm cash probability: {}", g.itm_cash_probability);
    }

    Ok(())
}
