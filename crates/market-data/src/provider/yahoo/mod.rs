//! Yahoo Finance market data provider.
//!
//! Covers quotes, symbol/ISIN search, and company profiles for:
//! - Equities/ETFs (e.g. AAPL, ASML.AS, THYAO.IS)
//! - Cryptocurrencies (e.g. BTC-EUR)

mod models;

use std::sync::RwLock;

use async_trait::async_trait;
use lazy_static::lazy_static;
use log::{debug, warn};
use reqwest::header;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use urlencoding::encode;

use crate::errors::MarketDataError;
use crate::models::{AssetProfile, Quote, SearchResult};
use crate::provider::MarketDataProvider;

use models::{YahooQuoteSummaryResponse, YahooQuoteSummaryResult, YahooSearchResponse};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

lazy_static! {
    /// Global cache for Yahoo authentication crumb
    static ref YAHOO_CRUMB: RwLock<Option<CrumbData>> = RwLock::default();
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    client: reqwest::Client,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(MarketDataError::Network)?;
        Ok(Self { client })
    }

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        {
            let guard = YAHOO_CRUMB.read().unwrap();
            if let Some(crumb) = guard.as_ref() {
                return Ok(crumb.clone());
            }
        }
        self.fetch_crumb().await
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self.client.get("https://fc.yahoo.com").send().await.map_err(|e| {
            MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: format!("Failed to get cookie: {}", e),
            }
        })?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
            .ok_or_else(|| MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: "No session cookie returned".to_string(),
            })?;

        // Step 2: Exchange the cookie for a crumb
        let crumb = self
            .client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: format!("Failed to get crumb: {}", e),
            })?
            .text()
            .await
            .map_err(MarketDataError::Network)?;

        if crumb.is_empty() || crumb.contains("Unauthorized") {
            return Err(MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: "Invalid crumb response".to_string(),
            });
        }

        let crumb_data = CrumbData { cookie, crumb };

        let mut guard = YAHOO_CRUMB.write().unwrap();
        *guard = Some(crumb_data.clone());

        Ok(crumb_data)
    }

    /// Clear the cached crumb (used when authentication fails)
    fn clear_crumb(&self) {
        let mut guard = YAHOO_CRUMB.write().unwrap();
        *guard = None;
    }

    /// Fetch a quoteSummary document for a symbol with the given modules.
    async fn fetch_quote_summary(
        &self,
        symbol: &str,
        modules: &str,
    ) -> Result<Option<YahooQuoteSummaryResult>, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules={}&crumb={}",
            encode(symbol),
            modules,
            encode(&crumb.crumb)
        );

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(MarketDataError::Network)?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.clear_crumb();
            return Err(MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: "Yahoo authentication expired".to_string(),
            });
        }

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let data: YahooQuoteSummaryResponse =
            response.json().await.map_err(|e| MarketDataError::ParseFailed {
                provider: "YAHOO".to_string(),
                message: format!("Failed to parse quoteSummary response: {}", e),
            })?;

        Ok(data.quote_summary.result.into_iter().next())
    }
}

/// Convert a quoteSummary price module to our Quote model.
fn price_to_quote(symbol: &str, result: &YahooQuoteSummaryResult) -> Option<Quote> {
    let price_module = result.price.as_ref()?;
    let price = price_module
        .regular_market_price
        .as_ref()
        .and_then(|p| p.raw)
        .and_then(Decimal::from_f64)?;

    Some(Quote {
        symbol: price_module
            .symbol
            .clone()
            .unwrap_or_else(|| symbol.to_string()),
        price,
        currency: price_module.currency.clone(),
        exchange: price_module.exchange_name.clone(),
        short_name: price_module.short_name.clone(),
        long_name: price_module.long_name.clone(),
        quote_type: price_module.quote_type.clone(),
    })
}

/// Convert a search response to our SearchResult list, dropping
/// symbol-less entries (news/screener rows mixed into the payload).
fn search_response_to_results(data: YahooSearchResponse) -> Vec<SearchResult> {
    data.quotes
        .into_iter()
        .filter_map(|q| {
            let symbol = q.symbol?;
            let mut result = SearchResult::new(symbol);
            if let Some(name) = q.shortname {
                result = result.with_short_name(name);
            }
            if let Some(name) = q.longname {
                result = result.with_long_name(name);
            }
            if let Some(exchange) = q.exchange {
                result = result.with_exchange(exchange);
            }
            if let Some(quote_type) = q.quote_type {
                result = result.with_quote_type(quote_type);
            }
            result.score = q.score;
            Some(result)
        })
        .collect()
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        "YAHOO"
    }

    fn priority(&self) -> u8 {
        1
    }

    async fn get_quote(&self, symbol: &str) -> Result<Option<Quote>, MarketDataError> {
        let result = match self.fetch_quote_summary(symbol, "price").await? {
            Some(result) => result,
            None => return Ok(None),
        };

        match price_to_quote(symbol, &result) {
            Some(quote) => {
                debug!("Yahoo quote for {}: {} {:?}", symbol, quote.price, quote.currency);
                Ok(Some(quote))
            }
            None => Ok(None),
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, MarketDataError> {
        let url = format!(
            "https://query1.finance.yahoo.com/v1/finance/search?q={}&quotesCount=10&newsCount=0",
            encode(query)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(MarketDataError::Network)?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: "YAHOO".to_string(),
            });
        }

        let data: YahooSearchResponse =
            response.json().await.map_err(|e| MarketDataError::ParseFailed {
                provider: "YAHOO".to_string(),
                message: format!("Failed to parse search response: {}", e),
            })?;

        Ok(search_response_to_results(data))
    }

    async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
        let result = self
            .fetch_quote_summary(symbol, "summaryProfile,price")
            .await?
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        let mut profile = AssetProfile::default();
        if let Some(summary) = result.summary_profile {
            profile.country = summary.country;
            profile.sector = summary.sector;
            profile.industry = summary.industry;
        } else {
            warn!("No summaryProfile module for {}", symbol);
        }
        if let Some(price) = result.price {
            profile.exchange = price.exchange_name;
        }

        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_to_quote_from_fixture() {
        let payload = r#"{
            "quoteSummary": {
                "result": [{
                    "price": {
                        "symbol": "ASML.AS",
                        "currency": "EUR",
                        "exchangeName": "Amsterdam",
                        "shortName": "ASML Holding N.V.",
                        "quoteType": "EQUITY",
                        "regularMarketPrice": { "raw": 612.5, "fmt": "612.50" }
                    }
                }]
            }
        }"#;

        let data: YahooQuoteSummaryResponse = serde_json::from_str(payload).unwrap();
        let result = data.quote_summary.result.into_iter().next().unwrap();
        let quote = price_to_quote("ASML.AS", &result).unwrap();

        assert_eq!(quote.symbol, "ASML.AS");
        assert_eq!(quote.price, dec!(612.5));
        assert_eq!(quote.currency.as_deref(), Some("EUR"));
        assert_eq!(quote.quote_type.as_deref(), Some("EQUITY"));
    }

    #[test]
    fn test_search_response_drops_symbolless_rows() {
        let payload = r#"{
            "quotes": [
                { "symbol": "BTC-EUR", "shortname": "Bitcoin EUR", "quoteType": "CRYPTOCURRENCY" },
                { "shortname": "a news row without symbol" }
            ]
        }"#;

        let data: YahooSearchResponse = serde_json::from_str(payload).unwrap();
        let results = search_response_to_results(data);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "BTC-EUR");
        assert!(results[0].is_crypto());
    }
}
