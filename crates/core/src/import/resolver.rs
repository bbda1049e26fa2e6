//! Tiered symbol resolution.
//!
//! Tiers are tried in fixed priority order, each returning either a
//! definitive match or "no opinion":
//!
//! 1. Canonical registry (crypto symbols with fixed identities)
//! 2. Alias memory (remembered resolutions from previous imports)
//! 3. Turkish fund registry (TEFAS)
//! 4. Crypto discovery (quote/search ladder over pair tickers)
//! 5. Generic discovery (ISIN/symbol/name search with similarity gate)
//!
//! The chain stops at the first tier that produces a match. Tier 5
//! always produces one, possibly at zero confidence.

use std::sync::Arc;

use log::{debug, warn};

use folionest_market_data::Quote;

use super::canonical::canonical_lookup;
use super::crypto::{base_symbol, build_ticker, looks_like_crypto};
use super::facade::MarketLookupTrait;
use super::funds::looks_like_tr_fund;
use super::import_constants::{
    CONFIDENCE_CRYPTO_BLIND, CONFIDENCE_CRYPTO_CONSTRUCTED, CONFIDENCE_CRYPTO_DIRECT,
    CONFIDENCE_CRYPTO_SEARCH, CONFIDENCE_CRYPTO_UNPRICED, CONFIDENCE_EXACT_SYMBOL,
    CONFIDENCE_FUND_DEGRADED, CONFIDENCE_FUND_REGISTRY, CONFIDENCE_ISIN_MATCH,
    CONFIDENCE_MEMORY, CONFIDENCE_NAME_MATCH, CONFIDENCE_NO_MATCH, CONFIDENCE_REJECTED,
    SIMILARITY_THRESHOLD,
};
use super::import_model::{ImportAction, ImportRow, MatchSource, ResolvedAsset};
use super::similarity::name_similarity;
use crate::aliases::AliasSnapshot;
use crate::assets::{clean_asset_name, InstrumentType};
use crate::errors::Result;

/// Output of a single tier: identity plus trust.
struct ResolvedMatch {
    symbol: String,
    name: String,
    instrument_type: InstrumentType,
    currency: String,
    exchange: Option<String>,
    current_price: Option<rust_decimal::Decimal>,
    confidence: u8,
    match_source: MatchSource,
    warnings: Vec<String>,
}

/// Tiered resolver over a market facade and an alias snapshot.
///
/// The snapshot is read-only for the whole import run; resolution has
/// no side effects beyond provider fetches, so rows are independent.
pub struct TieredResolver {
    market: Arc<dyn MarketLookupTrait>,
    aliases: AliasSnapshot,
}

impl TieredResolver {
    pub fn new(market: Arc<dyn MarketLookupTrait>, aliases: AliasSnapshot) -> Self {
        Self { market, aliases }
    }

    /// Resolve one row to a canonical instrument identity.
    ///
    /// Errors are per-row: the caller records them and keeps going.
    pub async fn resolve_row(&self, row: &ImportRow) -> Result<ResolvedAsset> {
        let matched = self.resolve_inner(row).await?;
        debug!(
            "resolved {} -> {} ({:?}, confidence {})",
            row.symbol, matched.symbol, matched.match_source, matched.confidence
        );

        Ok(ResolvedAsset {
            row: row.clone(),
            resolved_symbol: matched.symbol,
            resolved_name: matched.name,
            resolved_type: matched.instrument_type,
            resolved_currency: matched.currency,
            exchange: matched.exchange,
            country: None,
            sector: None,
            category: None,
            current_price: matched.current_price,
            confidence: matched.confidence,
            match_source: matched.match_source,
            existing_asset: None,
            action: ImportAction::Add,
            warnings: matched.warnings,
        })
    }

    async fn resolve_inner(&self, row: &ImportRow) -> Result<ResolvedMatch> {
        if let Some(matched) = self.canonical_tier(row).await {
            return Ok(matched);
        }
        if let Some(matched) = self.memory_tier(row).await {
            return Ok(matched);
        }
        if let Some(matched) = self.fund_tier(row).await {
            return Ok(matched);
        }
        if let Some(matched) = self.crypto_tier(row).await {
            return Ok(matched);
        }
        self.search_tier(row).await
    }

    /// Best-effort quote fetch; failures are logged, never fatal.
    async fn quote_opt(&self, symbol: &str) -> Option<Quote> {
        match self.market.get_quote(symbol).await {
            Ok(quote) => quote,
            Err(e) => {
                warn!("quote lookup failed for {}: {}", symbol, e);
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Tier 1: canonical registry
    // ------------------------------------------------------------------

    async fn canonical_tier(&self, row: &ImportRow) -> Option<ResolvedMatch> {
        let entry = canonical_lookup(&row.symbol)?;
        // The row's currency wins over any pair suffix already present
        let symbol = build_ticker(&base_symbol(&row.symbol), row.currency.as_str());

        let mut matched = ResolvedMatch {
            symbol,
            name: entry.name.to_string(),
            instrument_type: entry.instrument_type,
            currency: row.currency.as_str().to_string(),
            exchange: None,
            current_price: None,
            confidence: CONFIDENCE_MEMORY,
            match_source: MatchSource::Memory,
            warnings: Vec::new(),
        };

        // Pricing only; a failed quote does not reduce confidence
        if let Some(quote) = self.quote_opt(&matched.symbol).await {
            matched.current_price = Some(quote.price);
            matched.exchange = quote.exchange;
            if let Some(currency) = quote.currency {
                matched.currency = currency;
            }
        }

        Some(matched)
    }

    // ------------------------------------------------------------------
    // Tier 2: alias memory
    // ------------------------------------------------------------------

    async fn memory_tier(&self, row: &ImportRow) -> Option<ResolvedMatch> {
        let platform = row.platform.as_deref();
        let record = self
            .aliases
            .resolve(&row.alias_key(), platform)
            .or_else(|| {
                row.isin
                    .as_deref()
                    .and_then(|isin| self.aliases.resolve(isin, platform))
            })
            .or_else(|| {
                // alias_key used the name; the raw symbol may still be known
                row.name
                    .as_ref()
                    .and_then(|_| self.aliases.resolve(&row.symbol, platform))
            })?;

        let mut matched = ResolvedMatch {
            symbol: record.resolved_symbol.clone(),
            name: clean_asset_name(row.input_name()),
            instrument_type: row
                .asset_type
                .as_deref()
                .and_then(InstrumentType::from_label)
                .unwrap_or(InstrumentType::Stock),
            currency: row.currency.as_str().to_string(),
            exchange: row.exchange.clone(),
            current_price: None,
            confidence: CONFIDENCE_MEMORY,
            match_source: MatchSource::Memory,
            warnings: Vec::new(),
        };

        // Supplementary refresh; the match stands without it
        if let Some(quote) = self.quote_opt(&matched.symbol).await {
            matched.current_price = Some(quote.price);
            if let Some(name) = quote.display_name() {
                matched.name = clean_asset_name(name);
            }
            if let Some(currency) = quote.currency.clone() {
                matched.currency = currency;
            }
            if quote.exchange.is_some() {
                matched.exchange = quote.exchange.clone();
            }
            if let Some(kind) = quote
                .quote_type
                .as_deref()
                .and_then(InstrumentType::from_label)
            {
                matched.instrument_type = kind;
            }
        }

        Some(matched)
    }

    // ------------------------------------------------------------------
    // Tier 3: Turkish fund registry
    // ------------------------------------------------------------------

    async fn fund_tier(&self, row: &ImportRow) -> Option<ResolvedMatch> {
        if !looks_like_tr_fund(row) {
            return None;
        }

        let code = row.symbol.trim().to_uppercase();
        let mut warnings = Vec::new();

        let fund = match self.market.lookup_fund(&code).await {
            Ok(Some(fund)) => Some(fund),
            Ok(None) => {
                warnings.push(format!(
                    "fund registry has no record for {}; keeping fund classification",
                    code
                ));
                None
            }
            Err(e) => {
                warnings.push(format!("fund registry lookup failed for {}: {}", code, e));
                None
            }
        };

        // Market classification is reliable even when the registry call
        // is not: commit to fund/TRY/TEFAS either way.
        let matched = match fund {
            Some(fund) => ResolvedMatch {
                symbol: code,
                name: fund.title,
                instrument_type: InstrumentType::Fund,
                currency: "TRY".to_string(),
                exchange: Some("TEFAS".to_string()),
                current_price: Some(fund.price),
                confidence: CONFIDENCE_FUND_REGISTRY,
                match_source: MatchSource::Search,
                warnings,
            },
            None => ResolvedMatch {
                name: clean_asset_name(row.input_name()),
                symbol: code,
                instrument_type: InstrumentType::Fund,
                currency: "TRY".to_string(),
                exchange: Some("TEFAS".to_string()),
                current_price: None,
                confidence: CONFIDENCE_FUND_DEGRADED,
                match_source: MatchSource::Search,
                warnings,
            },
        };

        Some(matched)
    }

    // ------------------------------------------------------------------
    // Tier 4: crypto discovery
    // ------------------------------------------------------------------

    async fn crypto_tier(&self, row: &ImportRow) -> Option<ResolvedMatch> {
        if !looks_like_crypto(row) {
            return None;
        }

        let base = base_symbol(&row.symbol);
        let currency = row.currency.as_str();
        let ticker = build_ticker(&base, currency);
        let display_name = canonical_lookup(&base)
            .map(|e| e.name.to_string())
            .unwrap_or_else(|| clean_asset_name(row.input_name()));

        let crypto_match = |symbol: String,
                            name: String,
                            price: Option<rust_decimal::Decimal>,
                            quote_currency: Option<String>,
                            confidence: u8,
                            warnings: Vec<String>| ResolvedMatch {
            symbol,
            name,
            instrument_type: InstrumentType::Crypto,
            currency: quote_currency.unwrap_or_else(|| currency.to_string()),
            exchange: None,
            current_price: price,
            confidence,
            match_source: MatchSource::Search,
            warnings,
        };

        // (a) direct quote for the constructed pair
        if let Some(quote) = self.quote_opt(&ticker).await {
            let name = quote
                .display_name()
                .map(clean_asset_name)
                .unwrap_or(display_name);
            return Some(crypto_match(
                ticker,
                name,
                Some(quote.price),
                quote.currency.clone(),
                CONFIDENCE_CRYPTO_DIRECT,
                Vec::new(),
            ));
        }

        // (b) search by base symbol, keep crypto-typed hits only
        let results = match self.market.search(&base).await {
            Ok(results) => results,
            Err(e) => {
                warn!("crypto search failed for {}: {}", base, e);
                Vec::new()
            }
        };
        let crypto_hits: Vec<_> = results.iter().filter(|r| r.is_crypto()).collect();

        let target_suffix = format!("-{}", currency);
        if let Some(hit) = crypto_hits
            .iter()
            .find(|r| r.symbol.to_uppercase().ends_with(&target_suffix))
        {
            let price = self.quote_opt(&hit.symbol).await.map(|q| q.price);
            return Some(crypto_match(
                hit.symbol.clone(),
                clean_asset_name(hit.display_name()),
                price,
                None,
                CONFIDENCE_CRYPTO_SEARCH,
                Vec::new(),
            ));
        }

        // (c) no currency-matching hit: rebuild the pair from the best
        // crypto hit and try to price it
        if let Some(hit) = crypto_hits.first() {
            let rebuilt = build_ticker(&base_symbol(&hit.symbol), currency);
            let name = clean_asset_name(hit.display_name());
            return Some(match self.quote_opt(&rebuilt).await {
                Some(quote) => crypto_match(
                    rebuilt,
                    name,
                    Some(quote.price),
                    quote.currency.clone(),
                    CONFIDENCE_CRYPTO_CONSTRUCTED,
                    Vec::new(),
                ),
                // (d) unpriceable, but upstream classification stands
                None => crypto_match(
                    rebuilt.clone(),
                    name,
                    None,
                    None,
                    CONFIDENCE_CRYPTO_UNPRICED,
                    vec![format!("constructed ticker {} could not be priced", rebuilt)],
                ),
            });
        }

        // (e) nothing found at all; commit the constructed ticker blind
        Some(crypto_match(
            ticker.clone(),
            display_name,
            None,
            None,
            CONFIDENCE_CRYPTO_BLIND,
            vec![format!(
                "no crypto search results for {}; constructed ticker {}",
                base, ticker
            )],
        ))
    }

    // ------------------------------------------------------------------
    // Tier 5: generic discovery
    // ------------------------------------------------------------------

    async fn search_tier(&self, row: &ImportRow) -> Result<ResolvedMatch> {
        let input_name = clean_asset_name(row.input_name());
        let mut warnings = Vec::new();

        let mut is_isin_search = false;
        let mut results = Vec::new();

        // ISIN is the gold-standard search key when present
        if let Some(isin) = row.isin.as_deref().map(str::trim).filter(|i| i.len() > 5) {
            results = self.market.search(isin).await?;
            is_isin_search = !results.is_empty();
        }
        if results.is_empty() {
            results = self.market.search(&row.symbol).await?;
        }
        if results.is_empty()
            && !input_name.is_empty()
            && !input_name.eq_ignore_ascii_case(&row.symbol)
        {
            results = self.market.search(&input_name).await?;
        }

        if results.is_empty() {
            warnings.push(format!("no search results for {}", row.symbol));
            return Ok(ResolvedMatch {
                symbol: row.symbol.clone(),
                name: if input_name.is_empty() {
                    row.symbol.clone()
                } else {
                    input_name
                },
                instrument_type: row
                    .asset_type
                    .as_deref()
                    .and_then(InstrumentType::from_label)
                    .unwrap_or(InstrumentType::Stock),
                currency: row.currency.as_str().to_string(),
                exchange: row.exchange.clone(),
                current_price: None,
                confidence: CONFIDENCE_NO_MATCH,
                match_source: MatchSource::None,
                warnings,
            });
        }

        // ISIN identity match among the results is a precision match,
        // trusted independently of name similarity
        if let Some(hit) = results.iter().find(|r| {
            row.isin
                .as_deref()
                .map(|isin| r.symbol.eq_ignore_ascii_case(isin.trim()))
                .unwrap_or(false)
        }) {
            return Ok(self
                .accept_search_hit(row, hit, is_isin_search, CONFIDENCE_EXACT_SYMBOL, warnings)
                .await);
        }

        // An exact ticker hit is the preferred candidate, but tickers
        // get reused: with a name on the row it still faces the gate
        let (candidate, is_exact_symbol) = match results
            .iter()
            .find(|r| r.symbol.eq_ignore_ascii_case(&row.symbol))
        {
            Some(hit) => (hit, true),
            None => (&results[0], false),
        };

        let has_input_name = row
            .name
            .as_deref()
            .map(|n| !n.trim().is_empty())
            .unwrap_or(false);
        let score = name_similarity(&input_name, candidate.display_name());

        if (is_exact_symbol && !has_input_name) || score >= SIMILARITY_THRESHOLD {
            let base_confidence = if is_exact_symbol {
                CONFIDENCE_EXACT_SYMBOL
            } else {
                CONFIDENCE_NAME_MATCH
            };
            return Ok(self
                .accept_search_hit(row, candidate, is_isin_search, base_confidence, warnings)
                .await);
        }

        // Rejected: report the candidate and guard against a stale or
        // reused ticker by falling back to the ISIN identity
        warnings.push(format!(
            "rejected candidate {} (\"{}\"): name similarity {:.2} below {}",
            candidate.symbol,
            candidate.display_name(),
            score,
            SIMILARITY_THRESHOLD
        ));

        let mut symbol = row.symbol.clone();
        if candidate.symbol.eq_ignore_ascii_case(&row.symbol) {
            if let Some(isin) = row
                .isin
                .as_deref()
                .map(str::trim)
                .filter(|i| !i.is_empty())
            {
                symbol = isin.to_uppercase();
                warnings.push(format!(
                    "ticker {} may belong to an unrelated instrument; using ISIN identity",
                    row.symbol
                ));
            }
        }

        Ok(ResolvedMatch {
            symbol,
            name: if input_name.is_empty() {
                row.symbol.clone()
            } else {
                input_name
            },
            instrument_type: row
                .asset_type
                .as_deref()
                .and_then(InstrumentType::from_label)
                .unwrap_or(InstrumentType::Stock),
            currency: row.currency.as_str().to_string(),
            exchange: row.exchange.clone(),
            current_price: None,
            confidence: CONFIDENCE_REJECTED,
            match_source: MatchSource::None,
            warnings,
        })
    }

    async fn accept_search_hit(
        &self,
        row: &ImportRow,
        hit: &folionest_market_data::SearchResult,
        is_isin_search: bool,
        base_confidence: u8,
        warnings: Vec<String>,
    ) -> ResolvedMatch {
        // Identifier-based matches are trusted above name-based ones
        let (confidence, match_source) = if is_isin_search {
            (CONFIDENCE_ISIN_MATCH, MatchSource::Isin)
        } else {
            (base_confidence, MatchSource::Search)
        };

        let name = {
            let cleaned = clean_asset_name(hit.display_name());
            if cleaned.is_empty() {
                row.input_name().to_string()
            } else {
                cleaned
            }
        };

        let mut matched = ResolvedMatch {
            symbol: hit.symbol.clone(),
            name,
            instrument_type: hit
                .quote_type
                .as_deref()
                .and_then(InstrumentType::from_label)
                .or_else(|| {
                    row.asset_type
                        .as_deref()
                        .and_then(InstrumentType::from_label)
                })
                .unwrap_or(InstrumentType::Stock),
            currency: row.currency.as_str().to_string(),
            exchange: hit.exchange.clone().or_else(|| row.exchange.clone()),
            current_price: None,
            confidence,
            match_source,
            warnings,
        };

        if let Some(quote) = self.quote_opt(&matched.symbol).await {
            matched.current_price = Some(quote.price);
            if let Some(currency) = quote.currency {
                matched.currency = currency;
            }
            if matched.exchange.is_none() {
                matched.exchange = quote.exchange;
            }
        }

        matched
    }
}
