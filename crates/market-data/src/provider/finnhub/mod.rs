//! Finnhub provider.
//!
//! Profile-only provider used as the second rung of the metadata
//! cascade; quotes and search stay with Yahoo.

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use urlencoding::encode;

use crate::errors::MarketDataError;
use crate::models::{AssetProfile, Quote};
use crate::provider::MarketDataProvider;

const BASE_URL: &str = "https://finnhub.io/api/v1";

/// Finnhub company-profile provider. Requires an API key.
pub struct FinnhubProvider {
    client: reqwest::Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct FinnhubProfile {
    country: Option<String>,
    #[serde(rename = "finnhubIndustry")]
    industry: Option<String>,
    exchange: Option<String>,
    #[serde(rename = "gsector")]
    sector: Option<String>,
}

impl FinnhubProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl MarketDataProvider for FinnhubProvider {
    fn id(&self) -> &'static str {
        "FINNHUB"
    }

    fn priority(&self) -> u8 {
        5
    }

    async fn get_quote(&self, symbol: &str) -> Result<Option<Quote>, MarketDataError> {
        let _ = symbol;
        Err(MarketDataError::NotSupported {
            operation: "quote".to_string(),
            provider: self.id().to_string(),
        })
    }

    async fn get_profile(&self, symbol: &str) -> Result<AssetProfile, MarketDataError> {
        let url = format!(
            "{}/stock/profile2?symbol={}&token={}",
            BASE_URL,
            encode(symbol),
            encode(&self.api_key)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(MarketDataError::Network)?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: self.id().to_string(),
            });
        }

        let profile: FinnhubProfile =
            response.json().await.map_err(|e| MarketDataError::ParseFailed {
                provider: self.id().to_string(),
                message: format!("Failed to parse profile response: {}", e),
            })?;

        // Finnhub returns an empty object for unknown symbols.
        if profile.country.is_none() && profile.industry.is_none() && profile.sector.is_none() {
            return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
        }

        debug!("Finnhub profile for {}: {:?}", symbol, profile.country);

        Ok(AssetProfile {
            country: profile.country,
            // Finnhub's industry field is closer to a GICS sector than
            // its gsector field, which is often absent on the free tier.
            sector: profile.sector.or(profile.industry.clone()),
            industry: profile.industry,
            exchange: profile.exchange,
        })
    }
}
