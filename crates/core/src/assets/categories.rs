//! Market category classification.
//!
//! Every instrument in the system belongs to exactly one coarse market
//! category. The category drives default metadata (exchange, country,
//! sector, currency) and decides whether profile enrichment applies.

use serde::{Deserialize, Serialize};

use super::assets_model::InstrumentType;

/// Coarse market category for a resolved instrument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetCategory {
    /// Borsa Istanbul stocks
    Bist,
    /// Turkish mutual funds
    Tefas,
    /// NASDAQ, NYSE, AMEX
    UsMarkets,
    /// European exchanges (Paris, Amsterdam, Frankfurt, Milan, London, ...)
    EuMarkets,
    /// Cryptocurrencies
    Crypto,
    /// Gold, silver, oil, ...
    Commodities,
    /// Foreign exchange pairs
    Fx,
    /// Cash holdings
    Cash,
}

/// Exchange markers per market category.
const BIST_EXCHANGES: [&str; 3] = ["BIST", "IST", "ISTANBUL"];
const US_EXCHANGES: [&str; 7] = ["NASDAQ", "NYSE", "AMEX", "NYQ", "NMS", "NGM", "PCX"];
const EU_EXCHANGES: [&str; 18] = [
    "PAR", "PARIS", "AMS", "AMSTERDAM", "FRA", "FRANKFURT", "GER", "XETRA", "MIL", "MILAN", "LSE",
    "LON", "LONDON", "MAD", "MADRID", "LIS", "SWX", "VTX",
];

/// Default metadata applied where the resolution left fields empty.
#[derive(Clone, Debug)]
pub struct CategoryDefaults {
    pub sector: &'static str,
    pub country: &'static str,
    pub currency: &'static str,
}

impl AssetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Bist => "BIST",
            AssetCategory::Tefas => "TEFAS",
            AssetCategory::UsMarkets => "US_MARKETS",
            AssetCategory::EuMarkets => "EU_MARKETS",
            AssetCategory::Crypto => "CRYPTO",
            AssetCategory::Commodities => "COMMODITIES",
            AssetCategory::Fx => "FX",
            AssetCategory::Cash => "CASH",
        }
    }

    /// Classify an instrument from its resolved type, exchange, symbol
    /// and ISIN.
    pub fn classify(
        instrument_type: InstrumentType,
        exchange: Option<&str>,
        symbol: &str,
        isin: Option<&str>,
    ) -> AssetCategory {
        let upper_exchange = exchange.map(str::to_uppercase).unwrap_or_default();
        let upper_symbol = symbol.to_uppercase();
        let tr_isin = isin
            .map(|i| i.to_uppercase().starts_with("TR"))
            .unwrap_or(false);

        if instrument_type == InstrumentType::Cash {
            return AssetCategory::Cash;
        }

        if instrument_type == InstrumentType::Fx
            || upper_symbol.contains("=X")
            || (upper_symbol.contains("USD") && upper_symbol.contains("TRY"))
            || (upper_symbol.contains("EUR") && upper_symbol.contains("USD"))
        {
            return AssetCategory::Fx;
        }

        if instrument_type == InstrumentType::Crypto {
            return AssetCategory::Crypto;
        }

        if instrument_type == InstrumentType::Commodity
            || matches!(upper_symbol.as_str(), "GAUTRY" | "XAGTRY" | "XAU" | "XAG")
        {
            return AssetCategory::Commodities;
        }

        // Turkish funds: explicit registry marker, or a TR-prefixed ISIN
        // on a fund-typed row
        if instrument_type == InstrumentType::Fund
            && (upper_exchange.contains("TEFAS") || tr_isin)
        {
            return AssetCategory::Tefas;
        }

        if Self::matches(&upper_exchange, &BIST_EXCHANGES)
            || upper_symbol.ends_with(".IS")
            || tr_isin
        {
            return AssetCategory::Bist;
        }

        if Self::matches(&upper_exchange, &EU_EXCHANGES) || has_eu_suffix(&upper_symbol) {
            return AssetCategory::EuMarkets;
        }

        if Self::matches(&upper_exchange, &US_EXCHANGES) {
            return AssetCategory::UsMarkets;
        }

        // Stocks and funds without a recognizable exchange default to US
        AssetCategory::UsMarkets
    }

    /// Default metadata for the category.
    ///
    /// The symbol refines a few cases: crypto pairs carry their quote
    /// currency, Turkish gram gold/silver trade in TRY.
    pub fn defaults(&self, symbol: &str) -> CategoryDefaults {
        let upper = symbol.to_uppercase();
        match self {
            AssetCategory::Bist => CategoryDefaults {
                sector: "UNKNOWN",
                country: "Turkey",
                currency: "TRY",
            },
            AssetCategory::Tefas => CategoryDefaults {
                sector: "Fund",
                country: "Turkey",
                currency: "TRY",
            },
            AssetCategory::UsMarkets => CategoryDefaults {
                sector: "UNKNOWN",
                country: "USA",
                currency: "USD",
            },
            AssetCategory::EuMarkets => CategoryDefaults {
                sector: "UNKNOWN",
                country: "Europe",
                currency: "EUR",
            },
            AssetCategory::Crypto => CategoryDefaults {
                sector: "Crypto",
                country: "Global",
                currency: crypto_quote_currency(&upper),
            },
            AssetCategory::Commodities => CategoryDefaults {
                sector: "Commodity",
                country: "Global",
                currency: match upper.as_str() {
                    "GAUTRY" | "XAGTRY" => "TRY",
                    _ => "USD",
                },
            },
            AssetCategory::Fx => CategoryDefaults {
                sector: "Currency",
                country: "Global",
                currency: "USD",
            },
            AssetCategory::Cash => CategoryDefaults {
                sector: "Cash",
                country: match upper.as_str() {
                    "USD" => "USA",
                    "EUR" => "Europe",
                    "TRY" => "Turkey",
                    _ => "Global",
                },
                currency: "USD",
            },
        }
    }

    fn matches(exchange: &str, table: &[&str]) -> bool {
        !exchange.is_empty() && table.iter().any(|marker| exchange.contains(marker))
    }
}

/// Quote currency of a crypto pair symbol ("BTC-EUR" -> "EUR").
fn crypto_quote_currency(symbol: &str) -> &'static str {
    match symbol.rsplit('-').next() {
        Some("EUR") => "EUR",
        Some("TRY") => "TRY",
        _ => "USD",
    }
}

fn has_eu_suffix(symbol: &str) -> bool {
    const SUFFIXES: [&str; 9] = [".AS", ".PA", ".DE", ".F", ".MI", ".L", ".MC", ".LS", ".SW"];
    SUFFIXES.iter().any(|s| symbol.ends_with(s))
}
