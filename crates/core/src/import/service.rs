//! Import service - resolution and merge orchestration.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, error};

use super::enrichment::enrich_resolved_asset;
use super::facade::MarketLookupTrait;
use super::import_constants::{RESOLVE_CHUNK_DELAY_MS, RESOLVE_CHUNK_SIZE};
use super::import_model::{
    ExistingAssetRef, ImportAction, ImportResult, ImportRow, ResolveReport, ResolvedAsset,
};
use super::merger::{ImportMerger, MergeRequest};
use super::poison::is_poison_link;
use super::resolver::TieredResolver;
use crate::aliases::{AliasRepositoryTrait, AliasSnapshot};
use crate::assets::{Instrument, InstrumentRepositoryTrait};
use crate::errors::{Error, ImportError, Result};
use crate::fx::{fallback_rates, RateProviderTrait};
use crate::transactions::TransactionRepositoryTrait;

/// Trait defining the contract for import operations.
#[async_trait::async_trait]
pub trait ImportServiceTrait: Send + Sync {
    /// Resolve raw rows to canonical identities for caller review.
    async fn resolve_import(
        &self,
        user_id: &str,
        portfolio_id: &str,
        rows: Vec<ImportRow>,
    ) -> Result<ResolveReport>;

    /// Merge reviewed rows (and transaction history) into the store.
    async fn execute_import(&self, request: MergeRequest) -> Result<ImportResult>;
}

/// Import service wiring the resolver and merger to the stores.
pub struct ImportService {
    market: Arc<dyn MarketLookupTrait>,
    instruments: Arc<dyn InstrumentRepositoryTrait>,
    transactions: Arc<dyn TransactionRepositoryTrait>,
    aliases: Arc<dyn AliasRepositoryTrait>,
    rates: Arc<dyn RateProviderTrait>,
}

impl ImportService {
    pub fn new(
        market: Arc<dyn MarketLookupTrait>,
        instruments: Arc<dyn InstrumentRepositoryTrait>,
        transactions: Arc<dyn TransactionRepositoryTrait>,
        aliases: Arc<dyn AliasRepositoryTrait>,
        rates: Arc<dyn RateProviderTrait>,
    ) -> Self {
        Self {
            market,
            instruments,
            transactions,
            aliases,
            rates,
        }
    }

    fn check_preconditions(user_id: &str, portfolio_id: &str) -> Result<()> {
        if user_id.trim().is_empty() {
            return Err(Error::Import(ImportError::NotAuthenticated));
        }
        if portfolio_id.trim().is_empty() {
            return Err(Error::Import(ImportError::PortfolioNotFound(
                portfolio_id.to_string(),
            )));
        }
        Ok(())
    }
}

/// Attach the advisory existing-instrument link and default action.
///
/// The link is advisory only - the merge re-validates against a fresh
/// snapshot - and a poison link (stored name no longer matching the
/// input) is dropped here with a warning.
fn assign_advisory_action(
    asset: &mut ResolvedAsset,
    existing_by_symbol: &HashMap<String, Instrument>,
) {
    if let Some(existing) = existing_by_symbol.get(&asset.resolved_symbol.trim().to_uppercase()) {
        if is_poison_link(&existing.name, asset.row.input_name()) {
            asset.warnings.push(format!(
                "stored instrument {} (\"{}\") no longer matches \"{}\"; ignoring the link",
                existing.symbol,
                existing.name,
                asset.row.input_name()
            ));
        } else {
            asset.existing_asset = Some(ExistingAssetRef {
                id: existing.id.clone(),
                quantity: existing.quantity,
                buy_price: existing.buy_price,
            });
        }
    }

    asset.action = if asset.row.is_closed() {
        ImportAction::Close
    } else if asset.existing_asset.is_some() {
        ImportAction::Update
    } else {
        ImportAction::Add
    };
}

#[async_trait::async_trait]
impl ImportServiceTrait for ImportService {
    async fn resolve_import(
        &self,
        user_id: &str,
        portfolio_id: &str,
        rows: Vec<ImportRow>,
    ) -> Result<ResolveReport> {
        Self::check_preconditions(user_id, portfolio_id)?;

        // One snapshot of both memories for the whole run
        let alias_records = self.aliases.find_for_user(user_id).await?;
        let instruments = self
            .instruments
            .find_portfolio_instruments(portfolio_id)
            .await?;
        let existing_by_symbol: HashMap<String, Instrument> = instruments
            .into_iter()
            .map(|i| (i.symbol.trim().to_uppercase(), i))
            .collect();

        let resolver = Arc::new(TieredResolver::new(
            self.market.clone(),
            AliasSnapshot::from_records(alias_records),
        ));

        let mut resolved = Vec::with_capacity(rows.len());
        let mut errors = Vec::new();

        // Chunked resolution: full parallelism inside a chunk, a short
        // pause between chunks to respect provider rate limits
        let mut chunks = rows.chunks(RESOLVE_CHUNK_SIZE).peekable();
        while let Some(chunk) = chunks.next() {
            let futures = chunk.iter().map(|row| {
                let resolver = resolver.clone();
                let market = self.market.clone();
                async move {
                    match resolver.resolve_row(row).await {
                        Ok(mut asset) => {
                            enrich_resolved_asset(&mut asset, market.as_ref()).await;
                            Ok(asset)
                        }
                        Err(e) => Err((row.clone(), e)),
                    }
                }
            });

            for outcome in join_all(futures).await {
                let mut asset = match outcome {
                    Ok(asset) => asset,
                    Err((row, e)) => {
                        // One bad row never aborts the batch
                        error!("resolution failed for {}: {}", row.symbol, e);
                        errors.push(format!("failed to resolve {}", row.symbol));
                        ResolvedAsset::unresolved(&row, format!("resolution failed: {}", e))
                    }
                };
                assign_advisory_action(&mut asset, &existing_by_symbol);
                resolved.push(asset);
            }

            if chunks.peek().is_some() {
                tokio::time::sleep(Duration::from_millis(RESOLVE_CHUNK_DELAY_MS)).await;
            }
        }

        Ok(ResolveReport {
            success: true,
            resolved,
            errors,
        })
    }

    async fn execute_import(&self, request: MergeRequest) -> Result<ImportResult> {
        Self::check_preconditions(&request.user_id, &request.portfolio_id)?;

        // Rate table is fetched once per import call for the caller's
        // valuation layer; import math itself never converts
        let rates = match self.rates.rates_to_eur().await {
            Ok(rates) => rates,
            Err(e) => {
                debug!("rate fetch failed, using fallback table: {}", e);
                fallback_rates()
            }
        };
        debug!("import rate table: {} currencies", rates.len());

        let merger = ImportMerger::new(
            self.instruments.clone(),
            self.transactions.clone(),
            self.aliases.clone(),
        );
        merger.execute(&request).await
    }
}
