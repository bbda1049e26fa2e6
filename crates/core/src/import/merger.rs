//! Idempotent merge of resolved rows into the portfolio store.
//!
//! The merge never trusts the resolver's advisory `existing_asset`
//! hint: it re-reads the store, builds group-aware composite keys, and
//! decides add/update/close per row against that fresh snapshot. The
//! local key index is updated as rows commit so duplicates within one
//! batch are caught without re-querying the store.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::warn;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::canonical::canonical_lookup;
use super::crypto::{base_symbol, build_ticker, looks_like_crypto_parts};
use super::import_constants::ALIAS_LEARNING_MIN_CONFIDENCE;
use super::import_model::{ImportAction, ImportResult, MatchSource, ResolvedAsset};
use crate::aliases::{AliasRecord, AliasRepositoryTrait};
use crate::assets::{
    logo_url, AssetCategory, Instrument, InstrumentRepositoryTrait, InstrumentUpdate,
    NewInstrument,
};
use crate::constants::{DEFAULT_GROUP, DEFAULT_PLATFORM, UNKNOWN_FIELD};
use crate::errors::Result;
use crate::transactions::{
    NewTransaction, TransactionProbe, TransactionRepositoryTrait, TransactionRow,
};

/// Everything one merge run needs.
#[derive(Clone, Debug)]
pub struct MergeRequest {
    pub user_id: String,
    pub portfolio_id: String,
    /// Sub-portfolio label; instruments in different groups never collide
    pub custom_group: Option<String>,
    pub assets: Vec<ResolvedAsset>,
    pub transactions: Vec<TransactionRow>,
}

enum MergeOutcome {
    Added,
    Updated,
    Skipped,
}

/// Group-aware index over the fresh store snapshot, kept current as
/// the batch commits so intra-batch duplicates resolve to updates.
struct CompositeIndex {
    by_key: HashMap<(String, String, String), Instrument>,
    by_isin: HashMap<(String, String, String), Instrument>,
}

fn composite_key(
    symbol: &str,
    group: Option<&str>,
    platform: Option<&str>,
) -> (String, String, String) {
    (
        symbol.trim().to_uppercase(),
        group.unwrap_or(DEFAULT_GROUP).trim().to_uppercase(),
        platform.unwrap_or(DEFAULT_PLATFORM).trim().to_uppercase(),
    )
}

impl CompositeIndex {
    fn build(snapshot: &[Instrument]) -> Self {
        let mut index = Self {
            by_key: HashMap::new(),
            by_isin: HashMap::new(),
        };
        for instrument in snapshot {
            index.register(instrument.clone());
        }
        index
    }

    fn lookup(
        &self,
        symbol: &str,
        group: Option<&str>,
        platform: Option<&str>,
        isin: Option<&str>,
    ) -> Option<&Instrument> {
        self.by_key
            .get(&composite_key(symbol, group, platform))
            .or_else(|| {
                isin.map(str::trim)
                    .filter(|i| !i.is_empty())
                    .and_then(|i| self.by_isin.get(&composite_key(i, group, platform)))
            })
    }

    fn register(&mut self, instrument: Instrument) {
        if let Some(isin) = instrument.isin.as_deref().filter(|i| !i.trim().is_empty()) {
            let key = composite_key(
                isin,
                instrument.custom_group.as_deref(),
                instrument.platform.as_deref(),
            );
            self.by_isin.insert(key, instrument.clone());
        }
        let key = composite_key(
            &instrument.symbol,
            instrument.custom_group.as_deref(),
            instrument.platform.as_deref(),
        );
        self.by_key.insert(key, instrument);
    }
}

/// Idempotent merger over the instrument, transaction, and alias stores.
pub struct ImportMerger {
    instruments: Arc<dyn InstrumentRepositoryTrait>,
    transactions: Arc<dyn TransactionRepositoryTrait>,
    aliases: Arc<dyn AliasRepositoryTrait>,
}

impl ImportMerger {
    pub fn new(
        instruments: Arc<dyn InstrumentRepositoryTrait>,
        transactions: Arc<dyn TransactionRepositoryTrait>,
        aliases: Arc<dyn AliasRepositoryTrait>,
    ) -> Self {
        Self {
            instruments,
            transactions,
            aliases,
        }
    }

    /// Run the merge. Per-row failures are collected, never raised;
    /// only the initial snapshot reads can fail the whole call.
    pub async fn execute(&self, request: &MergeRequest) -> Result<ImportResult> {
        let snapshot = self
            .instruments
            .find_portfolio_instruments(&request.portfolio_id)
            .await?;
        let mut index = CompositeIndex::build(&snapshot);

        // New rows sort above everything already in the portfolio
        let min_sort = self
            .instruments
            .find_min_sort_order(&request.portfolio_id)
            .await?;
        let mut next_sort_order = min_sort.map(|m| m - 1).unwrap_or(0);

        let mut result = ImportResult::default();

        for asset in &request.assets {
            match self
                .merge_asset(request, asset, &mut index, &mut next_sort_order)
                .await
            {
                Ok(MergeOutcome::Added) => result.added += 1,
                Ok(MergeOutcome::Updated) => result.updated += 1,
                Ok(MergeOutcome::Skipped) => {
                    result.skipped += 1;
                    continue;
                }
                Err(e) => {
                    result.errors.push(format!(
                        "failed to {} {}: {}",
                        asset.action.as_str(),
                        asset.resolved_symbol,
                        e
                    ));
                    continue;
                }
            }

            // Aliases are hints, not ground truth: a write failure is
            // logged and the row still counts as merged
            if let Err(e) = self.learn_aliases(request, asset).await {
                warn!("alias learning failed for {}: {}", asset.resolved_symbol, e);
            }
        }

        for tx in &request.transactions {
            match self.merge_transaction(request, tx).await {
                Ok(true) => result.tx_added += 1,
                Ok(false) => {}
                Err(e) => result
                    .errors
                    .push(format!("transaction {}: {}", tx.symbol, e)),
            }
        }

        result.success = result.errors.is_empty();
        Ok(result)
    }

    async fn merge_asset(
        &self,
        request: &MergeRequest,
        asset: &ResolvedAsset,
        index: &mut CompositeIndex,
        next_sort_order: &mut i32,
    ) -> Result<MergeOutcome> {
        if asset.action == ImportAction::Skip {
            return Ok(MergeOutcome::Skipped);
        }

        // Fresh group-aware lookup; the resolver's hint may be stale or
        // cross-group
        let existing = index
            .lookup(
                &asset.resolved_symbol,
                request.custom_group.as_deref(),
                asset.row.platform.as_deref(),
                asset.row.isin.as_deref(),
            )
            .cloned();

        let mut action = asset.action;
        if action == ImportAction::Add && existing.is_some() {
            // Duplicate prevention: the store already has this identity
            action = ImportAction::Update;
        }

        match (action, existing) {
            (ImportAction::Add, _) => {
                self.insert_instrument(request, asset, asset.row.quantity, index, next_sort_order)
                    .await?;
                Ok(MergeOutcome::Added)
            }
            (ImportAction::Update, Some(existing)) => {
                self.update_instrument(asset, &existing, asset.row.quantity, index)
                    .await?;
                Ok(MergeOutcome::Updated)
            }
            (ImportAction::Update, None) => {
                self.insert_instrument(request, asset, asset.row.quantity, index, next_sort_order)
                    .await?;
                Ok(MergeOutcome::Added)
            }
            (ImportAction::Close, Some(existing)) => {
                // History and cost basis stay; only the quantity zeroes
                self.update_instrument(asset, &existing, Decimal::ZERO, index)
                    .await?;
                Ok(MergeOutcome::Updated)
            }
            (ImportAction::Close, None) => {
                // Fully exited position imported for historical record
                self.insert_instrument(request, asset, Decimal::ZERO, index, next_sort_order)
                    .await?;
                Ok(MergeOutcome::Added)
            }
            (ImportAction::Skip, _) => Ok(MergeOutcome::Skipped),
        }
    }

    async fn insert_instrument(
        &self,
        request: &MergeRequest,
        asset: &ResolvedAsset,
        quantity: Decimal,
        index: &mut CompositeIndex,
        next_sort_order: &mut i32,
    ) -> Result<()> {
        let category = asset.category.unwrap_or_else(|| {
            AssetCategory::classify(
                asset.resolved_type,
                asset.exchange.as_deref(),
                &asset.resolved_symbol,
                asset.row.isin.as_deref(),
            )
        });

        let new_instrument = NewInstrument {
            id: Uuid::new_v4().to_string(),
            portfolio_id: request.portfolio_id.clone(),
            symbol: asset.resolved_symbol.clone(),
            isin: asset.row.isin.clone(),
            name: asset.resolved_name.clone(),
            original_name: asset
                .row
                .name
                .clone()
                .or_else(|| Some(asset.resolved_name.clone())),
            instrument_type: asset.resolved_type,
            category,
            quantity,
            buy_price: asset.row.buy_price,
            currency: asset.resolved_currency.clone(),
            exchange: or_unknown(asset.exchange.as_deref()),
            country: or_unknown(asset.country.as_deref()),
            sector: or_unknown(asset.sector.as_deref()),
            platform: asset.row.platform.clone(),
            custom_group: request.custom_group.clone(),
            sort_order: *next_sort_order,
            logo_url: logo_url(&asset.resolved_symbol, category),
        };
        *next_sort_order -= 1;

        let created = self.instruments.create(new_instrument).await?;
        // Later rows in this batch must see the new identity
        index.register(created);
        Ok(())
    }

    async fn update_instrument(
        &self,
        asset: &ResolvedAsset,
        existing: &Instrument,
        quantity: Decimal,
        index: &mut CompositeIndex,
    ) -> Result<()> {
        let category = asset.category.unwrap_or(existing.category);

        // Classification metadata is always refreshed so upstream fixes
        // reach existing holdings; the display name is sticky
        let update = InstrumentUpdate {
            quantity,
            buy_price: asset.row.buy_price,
            name: display_name_update(existing, asset),
            isin: asset.row.isin.clone().or_else(|| existing.isin.clone()),
            instrument_type: asset.resolved_type,
            category,
            currency: asset.resolved_currency.clone(),
            exchange: or_unknown(asset.exchange.as_deref()),
            country: or_unknown(asset.country.as_deref()),
            sector: or_unknown(asset.sector.as_deref()),
            logo_url: logo_url(&asset.resolved_symbol, category),
        };

        let updated = self.instruments.update(&existing.id, update).await?;
        index.register(updated);
        Ok(())
    }

    /// Alias learning: remember how each source field resolved, so the
    /// next import of the same file skips the lookup tiers entirely.
    async fn learn_aliases(&self, request: &MergeRequest, asset: &ResolvedAsset) -> Result<()> {
        // Memory-sourced resolutions already have their aliases
        if asset.match_source == MatchSource::Memory {
            return Ok(());
        }
        if asset.confidence < ALIAS_LEARNING_MIN_CONFIDENCE {
            return Ok(());
        }

        let is_verified = asset.match_source == MatchSource::Isin;
        let mut seen = HashSet::new();
        seen.insert(asset.resolved_symbol.trim().to_uppercase());

        let sources = [
            asset.row.name.as_deref(),
            asset.row.isin.as_deref(),
            Some(asset.row.symbol.as_str()),
        ];
        for source in sources.into_iter().flatten() {
            let key = source.trim().to_uppercase();
            if key.is_empty() || !seen.insert(key.clone()) {
                continue;
            }
            let record = AliasRecord::new(
                &request.user_id,
                key,
                asset.row.platform.clone(),
                asset.resolved_symbol.clone(),
                is_verified,
            );
            // Sequential writes; cross-import races are last-write-wins
            self.aliases.upsert(record).await?;
        }
        Ok(())
    }

    /// Returns true when a history row was written (insert or upsert).
    async fn merge_transaction(
        &self,
        request: &MergeRequest,
        tx: &TransactionRow,
    ) -> Result<bool> {
        let symbol = resolve_transaction_symbol(&request.assets, tx);

        let new_tx = NewTransaction {
            portfolio_id: request.portfolio_id.clone(),
            symbol: symbol.clone(),
            name: tx.name.clone(),
            tx_type: tx.tx_type,
            quantity: tx.quantity,
            price: tx.price,
            currency: tx.currency.clone(),
            date: tx.date,
            exchange: tx.exchange.clone(),
            platform: tx.platform.clone(),
            external_id: tx.external_id.clone(),
        };

        if let Some(external_id) = tx.external_id.as_deref().filter(|id| !id.trim().is_empty()) {
            self.transactions
                .upsert_by_external_id(&request.portfolio_id, external_id, new_tx)
                .await?;
            return Ok(true);
        }

        // No stable id: fuzzy-check before inserting so re-imports of
        // the same file don't duplicate history
        let probe = TransactionProbe {
            symbol,
            date: tx.date,
            quantity: tx.quantity,
            price: tx.price,
            tx_type: tx.tx_type,
        };
        if self
            .transactions
            .find_fuzzy_duplicate(&request.portfolio_id, &probe)
            .await?
        {
            return Ok(false);
        }

        self.transactions.create(new_tx).await?;
        Ok(true)
    }
}

fn or_unknown(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_FIELD)
        .to_string()
}

/// The stored display name only changes when it was a placeholder
/// (equal to its own symbol) or when the canonical registry corrects a
/// previously generic name. Anything else may be a user's own edit.
fn display_name_update(existing: &Instrument, asset: &ResolvedAsset) -> Option<String> {
    let new_name = asset.resolved_name.as_str();
    if new_name.is_empty() || existing.name == new_name {
        return None;
    }
    if existing.name == existing.symbol {
        return Some(new_name.to_string());
    }
    if let Some(entry) = canonical_lookup(&asset.resolved_symbol) {
        if entry.name == new_name {
            return Some(new_name.to_string());
        }
    }
    None
}

/// Find the owning instrument for a transaction row: batch symbol
/// first, then ISIN, then name, then the standalone crypto heuristic
/// so history outside the current batch isn't lost.
fn resolve_transaction_symbol(assets: &[ResolvedAsset], tx: &TransactionRow) -> String {
    let by_symbol = assets.iter().find(|a| {
        a.row.symbol.eq_ignore_ascii_case(&tx.symbol)
            || a.resolved_symbol.eq_ignore_ascii_case(&tx.symbol)
    });
    if let Some(asset) = by_symbol {
        return asset.resolved_symbol.clone();
    }

    if let Some(isin) = tx.isin.as_deref().filter(|i| !i.trim().is_empty()) {
        if let Some(asset) = assets.iter().find(|a| {
            a.row
                .isin
                .as_deref()
                .map(|ri| ri.eq_ignore_ascii_case(isin))
                .unwrap_or(false)
        }) {
            return asset.resolved_symbol.clone();
        }
    }

    if let Some(name) = tx.name.as_deref().filter(|n| !n.trim().is_empty()) {
        if let Some(asset) = assets.iter().find(|a| {
            a.row
                .name
                .as_deref()
                .map(|rn| rn.eq_ignore_ascii_case(name))
                .unwrap_or(false)
        }) {
            return asset.resolved_symbol.clone();
        }
    }

    if looks_like_crypto_parts(&tx.symbol, tx.name.as_deref(), tx.isin.as_deref(), None) {
        let currency = tx.currency.trim();
        let currency = if currency.is_empty() { "USD" } else { currency };
        return build_ticker(&base_symbol(&tx.symbol), currency);
    }

    tx.symbol.clone()
}
