//! Provider registry for orchestrating market data providers.
//!
//! The registry manages multiple providers, handling:
//! - Provider ordering by priority
//! - Fallback to the next provider on recoverable failure
//! - Profile cascading: partial profiles from successive providers are
//!   merged until both country and sector are usable

use std::sync::Arc;

use log::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{AssetProfile, Quote, SearchResult};
use crate::provider::MarketDataProvider;

/// Registry over an ordered set of market data providers.
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn MarketDataProvider>>,
}

impl ProviderRegistry {
    /// Create a new registry. Providers are ordered by their declared
    /// priority (lower value = tried first).
    pub fn new(mut providers: Vec<Arc<dyn MarketDataProvider>>) -> Self {
        providers.sort_by_key(|p| p.priority());
        Self { providers }
    }

    /// Fetch the latest quote, trying providers in priority order.
    ///
    /// `Ok(None)` means at least one provider answered and none of them
    /// knows the symbol. An error is returned only when every provider
    /// failed outright.
    pub async fn get_quote(&self, symbol: &str) -> Result<Option<Quote>, MarketDataError> {
        let mut answered = false;

        for provider in &self.providers {
            match provider.get_quote(symbol).await {
                Ok(Some(quote)) => return Ok(Some(quote)),
                Ok(None) => {
                    answered = true;
                }
                Err(e) if e.tries_next_provider() => {
                    debug!("Quote via {} failed for {}: {}", provider.id(), symbol, e);
                }
                Err(MarketDataError::SymbolNotFound(_)) => {
                    answered = true;
                }
                Err(e) => return Err(e),
            }
        }

        if answered {
            Ok(None)
        } else {
            Err(MarketDataError::AllProvidersFailed)
        }
    }

    /// Search for symbols, returning the first non-empty result set.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let mut answered = false;

        for provider in &self.providers {
            match provider.search(query).await {
                Ok(results) if !results.is_empty() => return Ok(results),
                Ok(_) => {
                    answered = true;
                }
                Err(e) if e.tries_next_provider() => {
                    debug!("Search via {} failed for '{}': {}", provider.id(), query, e);
                }
                Err(e) => return Err(e),
            }
        }

        if answered {
            Ok(Vec::new())
        } else {
            Err(MarketDataError::AllProvidersFailed)
        }
    }

    /// Fetch profile metadata through the provider cascade.
    ///
    /// Partial profiles are merged in priority order; the cascade stops
    /// as soon as the merged profile carries a usable country and sector.
    pub async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
        let mut merged = AssetProfile::default();
        let mut answered = false;

        for provider in &self.providers {
            match provider.get_profile(symbol).await {
                Ok(profile) => {
                    answered = true;
                    merged.merge_missing(profile);
                    if merged.is_complete() {
                        break;
                    }
                }
                Err(e) if e.tries_next_provider() => {
                    debug!("Profile via {} failed for {}: {}", provider.id(), symbol, e);
                }
                Err(MarketDataError::SymbolNotFound(_)) => {
                    answered = true;
                }
                Err(e) => return Err(e),
            }
        }

        if answered {
            Ok(merged)
        } else {
            warn!("No provider produced a profile for {}", symbol);
            Err(MarketDataError::AllProvidersFailed)
        }
    }
}
