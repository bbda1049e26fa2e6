//! Latest-quote model returned by quote providers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A latest market quote for a single instrument.
///
/// Only `symbol` and `price` are guaranteed; everything else depends on
/// what the provider returns for the instrument kind.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    /// Provider symbol the quote was fetched for (e.g. "AAPL", "BTC-EUR")
    pub symbol: String,

    /// Last traded / regular market price
    pub price: Decimal,

    /// Trading currency (e.g. "USD", "TRY")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Exchange name or code (e.g. "NMS", "IST")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,

    /// Short display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,

    /// Long display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,

    /// Provider quote type (e.g. "EQUITY", "ETF", "CRYPTOCURRENCY")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_type: Option<String>,
}

impl Quote {
    /// Best available display name: short name, then long name.
    pub fn display_name(&self) -> Option<&str> {
        self.short_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.long_name.as_deref().filter(|s| !s.is_empty()))
    }
}
