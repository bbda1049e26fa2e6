//! Post-resolution enrichment.
//!
//! Classifies each resolved instrument into a market category, applies
//! category defaults for exchange/country/sector, and - for the
//! generalist equity/ETF markets - pulls missing country/sector from
//! the profile provider cascade. Never touches the resolved symbol,
//! confidence, or match source.

use log::debug;

use super::facade::MarketLookupTrait;
use super::import_model::ResolvedAsset;
use crate::assets::AssetCategory;

/// Manual metadata for symbols the providers classify poorly.
/// Checked before any API call.
static MANUAL_PROFILES: [(&str, &str, &str); 12] = [
    // symbol, country, sector
    ("THYAO.IS", "Turkey", "Industrials"),
    ("GARAN.IS", "Turkey", "Financial Services"),
    ("AKBNK.IS", "Turkey", "Financial Services"),
    ("SISE.IS", "Turkey", "Basic Materials"),
    ("BIMAS.IS", "Turkey", "Consumer Cyclical"),
    ("ASELS.IS", "Turkey", "Industrials"),
    ("ASML.AS", "Netherlands", "Technology"),
    ("ADYEN.AS", "Netherlands", "Technology"),
    ("SHELL.AS", "Netherlands", "Energy"),
    ("GC=F", "Global", "Commodity"),
    ("SI=F", "Global", "Commodity"),
    ("CL=F", "Global", "Commodity"),
];

fn manual_profile(symbol: &str) -> Option<(&'static str, &'static str)> {
    let upper = symbol.to_uppercase();
    MANUAL_PROFILES
        .iter()
        .find(|(s, _, _)| *s == upper)
        .map(|(_, country, sector)| (*country, *sector))
}

fn is_missing(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(|v| v.trim().is_empty() || v.eq_ignore_ascii_case("unknown"))
        .unwrap_or(true)
}

/// Enrich a resolved asset in place.
pub async fn enrich_resolved_asset(asset: &mut ResolvedAsset, market: &dyn MarketLookupTrait) {
    let category = AssetCategory::classify(
        asset.resolved_type,
        asset.exchange.as_deref(),
        &asset.resolved_symbol,
        asset.row.isin.as_deref(),
    );
    asset.category = Some(category);

    // CSV-provided values always take precedence over API values
    if let Some(exchange) = asset
        .row
        .exchange
        .clone()
        .filter(|e| !e.trim().is_empty())
    {
        asset.exchange = Some(exchange);
    }

    if let Some((country, sector)) = manual_profile(&asset.resolved_symbol) {
        if is_missing(&asset.country) {
            asset.country = Some(country.to_string());
        }
        if is_missing(&asset.sector) {
            asset.sector = Some(sector.to_string());
        }
    }

    // Profile cascade only for the generalist equity/ETF markets;
    // everything else is fully determined by its category
    let wants_profile = matches!(
        category,
        AssetCategory::UsMarkets | AssetCategory::EuMarkets
    );
    if wants_profile && (is_missing(&asset.country) || is_missing(&asset.sector)) {
        match market.get_profile(&asset.resolved_symbol).await {
            Ok(Some(profile)) => {
                if is_missing(&asset.country) {
                    asset.country = profile.country.filter(|c| !c.trim().is_empty());
                }
                if is_missing(&asset.sector) {
                    asset.sector = profile.sector.filter(|s| !s.trim().is_empty());
                }
                if asset.exchange.is_none() {
                    asset.exchange = profile.exchange;
                }
            }
            Ok(None) => {}
            Err(e) => debug!(
                "profile enrichment failed for {}: {}",
                asset.resolved_symbol, e
            ),
        }
    }

    // Category defaults fill whatever is still empty
    let defaults = category.defaults(&asset.resolved_symbol);
    if is_missing(&asset.country) {
        asset.country = Some(defaults.country.to_string());
    }
    if is_missing(&asset.sector) {
        asset.sector = Some(defaults.sector.to_string());
    }
    if asset.resolved_currency.trim().is_empty() {
        asset.resolved_currency = defaults.currency.to_string();
    }
}
