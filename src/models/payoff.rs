//! Plain-vanilla striked payoffs.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};

/// Option type of a vanilla payoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// +1 for a call, -1 for a put.
    pub fn sign(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => f.write_str("call"),
            OptionType::Put => f.write_str("put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(anyhow!("Invalid option type: {}", s)),
        }
    }
}

/// Terminal payoff `max(ω·(S_T - K), 0)` with ω = +1 for calls and -1 for puts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Payoff {
    pub option_type: OptionType,
    pub strike: f64,
}

impl Payoff {
    pub fn new(option_type: OptionType, strike: f64) -> Self {
        Self {
            option_type,
            strike,
        }
    }

    pub fn call(strike: f64) -> Self {
        Self::new(OptionType::Call, strike)
    }

    pub fn put(strike: f64) -> Self {
        Self::new(OptionType::Put, strike)
    }

    /// Cash flow at expiry for a terminal underlying price `spot`.
    pub fn value(&self, spot: f64) -> f64 {
        (self.option_type.sign() * (spot - self.strike)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_payoff() {
        let call = Payoff::call(100.0);
        assert_eq!(call.value(120.0), 20.0);
        assert_eq!(call.value(80.0), 0.0);

        let put = Payoff::put(100.0);
        assert_eq!(put.value(80.0), 20.0);
        assert_eq!(put.value(120.0), 0.0);
        assert_eq!(put.value(100.0), 0.0);
    }

    #[test]
    fn test_option_type_parsing() {
        assert_eq!("call".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!(" Put ".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!("C".parse::<OptionType>().unwrap(), OptionType::Call);
        assert!("straddle".parse::<OptionType>().is_err());
        assert_eq!(OptionType::Put.to_string(), "put");
    }
}
