//! TEFAS fund registry provider.
//!
//! TEFAS (Türkiye Elektronik Fon Alım Satım Platformu) publishes Turkish
//! mutual fund prices. There is no JSON API for single-fund lookups, so
//! this provider scrapes the fund analysis page and extracts the title
//! and latest price with regexes. Prices use Turkish decimal notation
//! ("37,076155", thousands separated by dots).

use async_trait::async_trait;
use lazy_static::lazy_static;
use log::warn;
use regex::Regex;
use rust_decimal::Decimal;
use urlencoding::encode;

use crate::errors::MarketDataError;
use crate::models::FundInfo;
use crate::provider::FundProvider;

const FUND_PAGE_URL: &str = "https://www.tefas.gov.tr/FonAnaliz.aspx?FonKod=";
const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

lazy_static! {
    static ref TITLE_RE: Regex =
        Regex::new(r#"<span id="MainContent_LabelFonAdi">([^<]+)</span>"#).unwrap();
    static ref PRICE_RE: Regex =
        Regex::new(r#"<span id="MainContent_LabelSonFiyat">([\d.,]+)</span>"#).unwrap();
}

/// TEFAS fund registry provider.
pub struct TefasProvider {
    client: reqwest::Client,
}

impl TefasProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for TefasProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract a fund record from the analysis page HTML.
///
/// Returns `None` when the page carries no fund title or no parsable
/// price (both happen for delisted codes).
fn parse_fund_page(code: &str, html: &str) -> Option<FundInfo> {
    let title = TITLE_RE
        .captures(html)
        .map(|c| c[1].trim().to_string())
        .filter(|t| !t.is_empty())?;

    let raw_price = PRICE_RE.captures(html).map(|c| c[1].to_string())?;
    // "37,076155" -> "37.076155"; dots are thousands separators
    let normalized = raw_price.replace('.', "").replace(',', ".");
    let price: Decimal = normalized.parse().ok()?;
    if price.is_zero() {
        return None;
    }

    Some(FundInfo {
        code: code.to_string(),
        title,
        price,
    })
}

#[async_trait]
impl FundProvider for TefasProvider {
    fn id(&self) -> &'static str {
        "TEFAS"
    }

    async fn lookup_fund(&self, code: &str) -> Result<Option<FundInfo>, MarketDataError> {
        let clean_code = code.trim().to_uppercase();
        // TEFAS codes are exactly three letters
        if clean_code.len() != 3 {
            return Ok(None);
        }

        let url = format!("{}{}", FUND_PAGE_URL, encode(&clean_code));
        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(MarketDataError::Network)?;

        if !response.status().is_success() {
            warn!("TEFAS returned {} for fund {}", response.status(), clean_code);
            return Ok(None);
        }

        let html = response.text().await.map_err(MarketDataError::Network)?;
        Ok(parse_fund_page(&clean_code, &html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const FIXTURE: &str = r#"
        <div><span id="MainContent_LabelFonAdi">TACIRLER PORTFOY DEGISKEN FON</span></div>
        <ul class="top-list"><li><span>Son Fiyat (TL)</span>
        <span id="MainContent_LabelSonFiyat">37,076155</span></li></ul>
    "#;

    #[test]
    fn test_parse_fund_page() {
        let fund = parse_fund_page("TCD", FIXTURE).unwrap();
        assert_eq!(fund.code, "TCD");
        assert_eq!(fund.title, "TACIRLER PORTFOY DEGISKEN FON");
        assert_eq!(fund.price, dec!(37.076155));
    }

    #[test]
    fn test_parse_fund_page_with_thousands_separator() {
        let html = r#"
            <span id="MainContent_LabelFonAdi">BIR FON</span>
            <span id="MainContent_LabelSonFiyat">1.234,56</span>
        "#;
        let fund = parse_fund_page("ABC", html).unwrap();
        assert_eq!(fund.price, dec!(1234.56));
    }

    #[test]
    fn test_parse_fund_page_without_title() {
        let html = r#"<span id="MainContent_LabelSonFiyat">10,0</span>"#;
        assert!(parse_fund_page("XYZ", html).is_none());
    }
}
