// demos/pricing_demo.rs

//! Demonstration of Black-Scholes-Merton pricing with sanity checks
//!
//! This example shows how to:
//! 1. Build market parameters with an explicit valuation date
//! 2. Price the reference call and put
//! 3. Inspect the Greeks
//! 4. See the pricer refuse an undefined evaluation

use anyhow::Result;
use bsm_pricer::{greeks, price, report_line, Payoff, PricerConfig};
use chrono::NaiveDate;

fn main() -> Result<()> {
    println!("Black-Scholes-Merton Pricing Demo");
    println!("=================================");

    let params = PricerConfig::reference().market_parameters();
    let factors = params.derive_factors()?;

    println!(
        "S={} K={} q={} r={} sigma={}",
        params.spot, params.strike, params.dividend_yield, params.risk_free_rate, params.volatility
    );
    println!(
        "Valuation {} -> maturity {} ({}): tau = {:.6}",
        params.valuation_date,
        params.maturity_date,
        params.day_count.name(),
        factors.tau
    );
    println!(
        "Growth {:.6}, discount {:.6}, vol-time scale {:.6}",
        factors.growth, factors.discount, factors.vol_std_dev
    );

    println!("\nStep 1: Pricing...");
    let call = price(&params, &Payoff::call(params.strike))?;
    let put = price(&params, &Payoff::put(params.strike))?;
    println!("{}", report_line(call.value));
    println!("  put: {:.6}", put.value);
    println!(
        "  parity gap: {:.3e}",
        call.value - put.value - (call.discounted_spot() - call.discounted_strike())
    );

    println!("\nStep 2: Greeks of the call...");
    let g = greeks(&params, &Payoff::call(params.strike))?;
    println!("  delta {:.6}  gamma {:.6}  vega {:.6}", g.delta, g.gamma, g.vega);
    println!("  theta {:.6}  rho {:.6}  div rho {:.6}", g.theta, g.rho, g.dividend_rho);

    println!("\nStep 3: Volatility ladder...");
    println!("{:<8} {:<12}", "Vol", "Call");
    println!("{}", "-".repeat(20));
    for vol in [0.10, 0.15, 0.20, 0.30, 0.50] {
        let value = price(&params.with_volatility(vol), &Payoff::call(params.strike))?.value;
        println!("{:<8.2} {:<12.6}", vol, value);
    }

    println!("\nStep 4: Valuing after maturity...");
    let late = params.with_valuation_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap_or_default());
    match price(&late, &Payoff::call(params.strike)) {
        Ok(r) => println!("  unexpected price {}", r.value),
        Err(e) => println!("  rejected: {}", e),
    }

    Ok(())
}
