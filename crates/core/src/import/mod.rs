//! Import pipeline - tiered resolution, enrichment, and idempotent merge.

mod canonical;
mod crypto;
mod enrichment;
mod facade;
mod funds;
mod import_constants;
mod import_model;
mod merger;
mod poison;
mod resolver;
mod service;
mod similarity;

#[cfg(test)]
mod merger_tests;
#[cfg(test)]
mod test_support;

pub use canonical::{canonical_lookup, CanonicalEntry};
pub use crypto::{base_symbol, build_ticker, looks_like_crypto, looks_like_crypto_parts};
pub use enrichment::enrich_resolved_asset;
pub use facade::{MarketDataClient, MarketLookupTrait};
pub use funds::looks_like_tr_fund;
pub use import_constants::*;
pub use import_model::{
    ExistingAssetRef, ImportAction, ImportResult, ImportRow, MatchSource, ResolveReport,
    ResolvedAsset,
};
pub use merger::{ImportMerger, MergeRequest};
pub use poison::is_poison_link;
pub use resolver::TieredResolver;
pub use service::{ImportService, ImportServiceTrait};
pub use similarity::name_similarity;
