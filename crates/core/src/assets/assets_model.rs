use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::categories::AssetCategory;
use crate::errors::ValidationError;

/// Currency accepted on import rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Try,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Try => "TRY",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "TRY" | "TL" => Ok(Currency::Try),
            other => Err(ValidationError::UnsupportedCurrency(other.to_string())),
        }
    }
}

/// Coarse instrument classification carried on stored instruments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstrumentType {
    Stock,
    Fund,
    Crypto,
    Commodity,
    Fx,
    Cash,
}

impl InstrumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentType::Stock => "STOCK",
            InstrumentType::Fund => "FUND",
            InstrumentType::Crypto => "CRYPTO",
            InstrumentType::Commodity => "COMMODITY",
            InstrumentType::Fx => "FX",
            InstrumentType::Cash => "CASH",
        }
    }

    /// Parse a CSV- or provider-supplied type label.
    ///
    /// Providers use various naming conventions ("CRYPTOCURRENCY", "ETF",
    /// "Equity"); CSV exports add their own ("FON", "GOLD"). Returns
    /// `None` for labels that don't map to a known type (caller decides
    /// the fallback).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "STOCK" | "EQUITY" | "BOND" => Some(InstrumentType::Stock),
            "FUND" | "ETF" | "MUTUALFUND" | "MUTUAL FUND" | "FON" | "TEFAS" | "INDEX" => {
                Some(InstrumentType::Fund)
            }
            "CRYPTO" | "CRYPTOCURRENCY" => Some(InstrumentType::Crypto),
            "COMMODITY" | "GOLD" | "SILVER" | "FUTURE" | "FUTURES" => {
                Some(InstrumentType::Commodity)
            }
            "FX" | "CURRENCY" | "FOREX" => Some(InstrumentType::Fx),
            "CASH" => Some(InstrumentType::Cash),
            _ => None,
        }
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A durable instrument record held in a portfolio.
///
/// Created on first import `add`, mutated on `update`/`close`. The
/// import path never deletes instruments; a `close` sets the quantity
/// to zero while keeping cost basis and history.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub id: String,
    pub portfolio_id: String,
    pub symbol: String,
    pub isin: Option<String>,
    /// Resolved display name
    pub name: String,
    /// Free-text name as it appeared in the source CSV
    pub original_name: Option<String>,
    pub instrument_type: InstrumentType,
    pub category: AssetCategory,
    pub quantity: Decimal,
    pub buy_price: Decimal,
    pub currency: String,
    pub exchange: String,
    pub country: String,
    pub sector: String,
    pub platform: Option<String>,
    pub custom_group: Option<String>,
    pub sort_order: i32,
    pub logo_url: Option<String>,
}

/// Payload for creating a new instrument.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInstrument {
    pub id: String,
    pub portfolio_id: String,
    pub symbol: String,
    pub isin: Option<String>,
    pub name: String,
    pub original_name: Option<String>,
    pub instrument_type: InstrumentType,
    pub category: AssetCategory,
    pub quantity: Decimal,
    pub buy_price: Decimal,
    pub currency: String,
    pub exchange: String,
    pub country: String,
    pub sector: String,
    pub platform: Option<String>,
    pub custom_group: Option<String>,
    pub sort_order: i32,
    pub logo_url: Option<String>,
}

/// Payload for updating an existing instrument during merge.
///
/// Classification metadata is always refreshed; the display name is
/// only carried when the merge decided the stored name should change.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentUpdate {
    pub quantity: Decimal,
    pub buy_price: Decimal,
    pub name: Option<String>,
    pub isin: Option<String>,
    pub instrument_type: InstrumentType,
    pub category: AssetCategory,
    pub currency: String,
    pub exchange: String,
    pub country: String,
    pub sector: String,
    pub logo_url: Option<String>,
}
