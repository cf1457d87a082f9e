use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Display currencies supported by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Jpy,
    Inr,
    Zar,
}

impl Currency {
    /// Lowercase rate-table key
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "usd",
            Currency::Eur => "eur",
            Currency::Jpy => "jpy",
            Currency::Inr => "inr",
            Currency::Zar => "zar",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code().to_uppercase())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "usd" => Ok(Currency::Usd),
            "eur" => Ok(Currency::Eur),
            "jpy" => Ok(Currency::Jpy),
            "inr" => Ok(Currency::Inr),
            "zar" => Ok(Currency::Zar),
            other => Err(format!("unsupported currency: {}", other)),
        }
    }
}

/// Foreign-exchange magnitudes keyed by lowercase currency code, each
/// expressed relative to a common base
#[derive(Debug, Clone, Default)]
pub struct RateTable(HashMap<String, f64>);

impl RateTable {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self(rates)
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.0.get(code).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Re-express a USD amount in the selected display currency.
///
/// USD is an identity that never touches the table, so conversion works
/// before the rate table has loaded. A missing rate degrades to a
/// multiplier of 1; a non-positive rate is treated as missing since it
/// would divide the value away.
pub fn convert(value_usd: f64, currency: Currency, rates: &RateTable) -> f64 {
    if currency == Currency::Usd {
        return value_usd;
    }

    let usd_rate = rates.get("usd").filter(|r| *r > 0.0).unwrap_or(1.0);
    let target_rate = rates.get(currency.code()).filter(|r| *r > 0.0).unwrap_or(1.0);

    value_usd * (target_rate / usd_rate)
}
