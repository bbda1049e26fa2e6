//! Market lookup facade.
//!
//! The resolver only needs four lookups; this trait is the seam that
//! keeps it independent of concrete providers (and mockable in tests).

use std::sync::Arc;

use folionest_market_data::registry::ProviderRegistry;
use folionest_market_data::{
    AssetProfile, FundInfo, FundProvider, MarketDataError, Quote, SearchResult,
};

use crate::errors::Result;

/// External lookups available to the resolution pipeline.
#[async_trait::async_trait]
pub trait MarketLookupTrait: Send + Sync {
    /// Latest quote by provider ticker, `None` when unknown.
    async fn get_quote(&self, symbol: &str) -> Result<Option<Quote>>;

    /// Search by free text, ticker, or ISIN.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;

    /// Fund registry lookup by code, `None` when not listed.
    async fn lookup_fund(&self, code: &str) -> Result<Option<FundInfo>>;

    /// Profile metadata cascade, `None` when no provider had any.
    async fn get_profile(&self, symbol: &str) -> Result<Option<AssetProfile>>;
}

/// Production facade over the provider registry and fund registry.
pub struct MarketDataClient {
    registry: ProviderRegistry,
    fund_provider: Arc<dyn FundProvider>,
}

impl MarketDataClient {
    pub fn new(registry: ProviderRegistry, fund_provider: Arc<dyn FundProvider>) -> Self {
        Self {
            registry,
            fund_provider,
        }
    }
}

#[async_trait::async_trait]
impl MarketLookupTrait for MarketDataClient {
    async fn get_quote(&self, symbol: &str) -> Result<Option<Quote>> {
        Ok(self.registry.get_quote(symbol).await?)
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        Ok(self.registry.search(query).await?)
    }

    async fn lookup_fund(&self, code: &str) -> Result<Option<FundInfo>> {
        Ok(self.fund_provider.lookup_fund(code).await?)
    }

    async fn get_profile(&self, symbol: &str) -> Result<Option<AssetProfile>> {
        match self.registry.get_profile(symbol).await {
            Ok(profile) => Ok(Some(profile)),
            Err(MarketDataError::AllProvidersFailed) => Ok(None),
            Err(MarketDataError::SymbolNotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
