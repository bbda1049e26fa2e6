//! Search result models for symbol lookup.

use serde::{Deserialize, Serialize};

/// Result from a ticker/text/ISIN search.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResult {
    /// Symbol/ticker (e.g. "AAPL", "SHOP.TO")
    pub symbol: String,

    /// Short display name (e.g. "Apple Inc")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,

    /// Long display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,

    /// Exchange name or code (e.g. "NASDAQ", "IST")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,

    /// Provider quote type (e.g. "EQUITY", "ETF", "CRYPTOCURRENCY")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_type: Option<String>,

    /// Relevance score from provider (higher = better match)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SearchResult {
    /// Create a new search result with just a symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            short_name: None,
            long_name: None,
            exchange: None,
            quote_type: None,
            score: None,
        }
    }

    /// Set the short display name.
    pub fn with_short_name(mut self, name: impl Into<String>) -> Self {
        self.short_name = Some(name.into());
        self
    }

    /// Set the long display name.
    pub fn with_long_name(mut self, name: impl Into<String>) -> Self {
        self.long_name = Some(name.into());
        self
    }

    /// Set the exchange.
    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }

    /// Set the provider quote type.
    pub fn with_quote_type(mut self, quote_type: impl Into<String>) -> Self {
        self.quote_type = Some(quote_type.into());
        self
    }

    /// Best available display name: short name, then long name, then symbol.
    pub fn display_name(&self) -> &str {
        self.short_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.long_name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(&self.symbol)
    }

    /// Whether the provider classified this result as a cryptocurrency.
    pub fn is_crypto(&self) -> bool {
        matches!(
            self.quote_type.as_deref().map(str::to_uppercase).as_deref(),
            Some("CRYPTOCURRENCY") | Some("CRYPTO")
        )
    }
}
