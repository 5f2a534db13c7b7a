use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};

/// Buy and sell price of one unit of a foreign currency, in IDR.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CurrencyRate {
    buy: f64,
    sell: f64,
}

impl CurrencyRate {
    pub fn new(buy: f64, sell: f64) -> Self {
        Self { buy, sell }
    }

    /// What the money changer pays per unit.
    pub fn buy(&self) -> f64 {
        self.buy
    }

    /// What the money changer charges per unit.
    pub fn sell(&self) -> f64 {
        self.sell
    }

    pub fn get(&self, kind: RateKind) -> f64 {
        match kind {
            RateKind::Buy => self.buy,
            RateKind::Sell => self.sell,
        }
    }
}

/// Rates keyed by upper-case three-letter currency code.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct CurrencyTable {
    rates: HashMap<String, CurrencyRate>,
}

impl CurrencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the rate for `code`, returning the previous one.
    pub fn upsert(&mut self, code: &str, rate: CurrencyRate) -> Option<CurrencyRate> {
        self.rates.insert(code.to_ascii_uppercase(), rate)
    }

    /// Case-insensitive lookup.
    pub fn get(&self, code: &str) -> Option<&CurrencyRate> {
        self.rates.get(&code.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Currency codes in alphabetical order.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CurrencyRate)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), rate))
    }
}

/// One successful read of the rate page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub currencies: CurrencyTable,
    /// Last update shown on the page, if it could be recovered.
    #[serde(rename = "mtime", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<FixedOffset>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RateKind {
    Buy,
    #[default]
    Sell,
}

impl FromStr for RateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(RateKind::Buy),
            "sell" => Ok(RateKind::Sell),
            other => Err(format!("unknown rate kind '{}', expected buy or sell", other)),
        }
    }
}

impl fmt::Display for RateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateKind::Buy => write!(f, "buy"),
            RateKind::Sell => write!(f, "sell"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Status envelope returned by [`crate::CurrencyService::get_currencies`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RatesResponse {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ExtractionResult>,
}

impl RatesResponse {
    pub fn success(data: ExtractionResult) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: "OK".to_string(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}
