//! Market data provider trait definitions.
//!
//! This module defines the core `MarketDataProvider` trait that all
//! market data providers must implement, plus the narrower
//! `FundProvider` trait for national fund registries.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{AssetProfile, FundInfo, Quote, SearchResult};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source.
/// The registry uses the provider's priority to decide ordering when
/// multiple providers can answer the same request.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO", "FINNHUB", etc.
    /// Used for logging and error attribution.
    fn id(&self) -> &'static str;

    /// Provider priority for ordering.
    ///
    /// Lower values = higher priority. Default is 10.
    fn priority(&self) -> u8 {
        10
    }

    /// Fetch the latest quote for a symbol.
    ///
    /// Returns `Ok(None)` when the provider does not know the symbol,
    /// and an error only for transport/parse failures.
    async fn get_quote(&self, symbol: &str) -> Result<Option<Quote>, MarketDataError>;

    /// Search for symbols matching a free-text query, ticker, or ISIN.
    ///
    /// Default implementation returns `NotSupported`.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let _ = query;
        Err(MarketDataError::NotSupported {
            operation: "search".to_string(),
            provider: self.id().to_string(),
        })
    }

    /// Fetch classification metadata (country, sector, industry) for a symbol.
    ///
    /// Default implementation returns `NotSupported`.
    async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
        let _ = symbol;
        Err(MarketDataError::NotSupported {
            operation: "profile".to_string(),
            provider: self.id().to_string(),
        })
    }
}

/// Trait for national fund registry providers (e.g. TEFAS).
///
/// Fund registries are keyed by short fund codes rather than exchange
/// tickers, so they sit outside the `MarketDataProvider` chain.
#[async_trait]
pub trait FundProvider: Send + Sync {
    /// Unique identifier for this provider.
    fn id(&self) -> &'static str;

    /// Look up a fund by its registry code.
    ///
    /// Returns `Ok(None)` when the code is not listed.
    async fn lookup_fund(&self, code: &str) -> Result<Option<FundInfo>, MarketDataError>;
}
