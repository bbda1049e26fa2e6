//! Serde models for Yahoo Finance API responses.

use serde::Deserialize;

// ============================================================================
// Search (v1/finance/search)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct YahooSearchResponse {
    #[serde(default)]
    pub quotes: Vec<YahooSearchQuote>,
}

#[derive(Debug, Deserialize)]
pub struct YahooSearchQuote {
    pub symbol: Option<String>,
    pub shortname: Option<String>,
    pub longname: Option<String>,
    #[serde(rename = "exchange")]
    pub exchange: Option<String>,
    #[serde(rename = "quoteType")]
    pub quote_type: Option<String>,
    pub score: Option<f64>,
}

// ============================================================================
// Quote Summary (v10/finance/quoteSummary)
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummaryResponse {
    #[serde(rename = "quoteSummary")]
    pub quote_summary: YahooQuoteSummary,
}

#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummary {
    #[serde(default)]
    pub result: Vec<YahooQuoteSummaryResult>,
}

#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummaryResult {
    pub price: Option<YahooPrice>,
    #[serde(rename = "summaryProfile")]
    pub summary_profile: Option<YahooSummaryProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooPrice {
    pub symbol: Option<String>,
    pub currency: Option<String>,
    pub exchange_name: Option<String>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub quote_type: Option<String>,
    pub regular_market_price: Option<YahooRawValue>,
}

/// Yahoo wraps numeric fields in `{ "raw": 123.45, "fmt": "123.45" }`.
#[derive(Debug, Deserialize)]
pub struct YahooRawValue {
    pub raw: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooSummaryProfile {
    pub country: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
}
