use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::import_model::{ImportAction, MatchSource};
use super::merger::{ImportMerger, MergeRequest};
use super::test_support::{resolved, MemAliasRepo, MemInstrumentRepo, MemTransactionRepo};
use crate::import::ResolvedAsset;
use crate::transactions::{TransactionRow, TransactionType};

struct Fixture {
    instruments: Arc<MemInstrumentRepo>,
    transactions: Arc<MemTransactionRepo>,
    aliases: Arc<MemAliasRepo>,
    merger: ImportMerger,
}

fn fixture() -> Fixture {
    fixture_with(MemInstrumentRepo::new())
}

fn fixture_with(repo: MemInstrumentRepo) -> Fixture {
    let instruments = Arc::new(repo);
    let transactions = Arc::new(MemTransactionRepo::new());
    let aliases = Arc::new(MemAliasRepo::new());
    let merger = ImportMerger::new(
        instruments.clone(),
        transactions.clone(),
        aliases.clone(),
    );
    Fixture {
        instruments,
        transactions,
        aliases,
        merger,
    }
}

fn request(assets: Vec<ResolvedAsset>, transactions: Vec<TransactionRow>) -> MergeRequest {
    MergeRequest {
        user_id: "user-1".to_string(),
        portfolio_id: "p-1".to_string(),
        custom_group: None,
        assets,
        transactions,
    }
}

fn tx_row(symbol: &str, external_id: Option<&str>) -> TransactionRow {
    TransactionRow {
        symbol: symbol.to_string(),
        isin: None,
        name: None,
        tx_type: TransactionType::Buy,
        quantity: dec!(10),
        price: dec!(100),
        currency: "EUR".to_string(),
        date: Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap(),
        exchange: None,
        platform: None,
        external_id: external_id.map(str::to_string),
    }
}

#[tokio::test]
async fn test_import_is_idempotent() {
    let f = fixture();
    let req = request(
        vec![
            resolved("AAPL", ImportAction::Add),
            resolved("MSFT", ImportAction::Add),
        ],
        vec![tx_row("AAPL", None)],
    );

    let first = f.merger.execute(&req).await.unwrap();
    assert!(first.success);
    assert_eq!(first.added, 2);
    assert_eq!(first.updated, 0);
    assert_eq!(first.tx_added, 1);

    // Re-running the same file must not duplicate anything
    let second = f.merger.execute(&req).await.unwrap();
    assert!(second.success);
    assert_eq!(second.added, 0);
    assert_eq!(second.updated, 2);
    assert_eq!(second.tx_added, 0);

    assert_eq!(f.instruments.all().len(), 2);
    assert_eq!(f.transactions.all().len(), 1);
}

#[tokio::test]
async fn test_custom_groups_never_collide() {
    let f = fixture();
    let base = request(vec![resolved("AAPL", ImportAction::Add)], vec![]);

    let first = f.merger.execute(&base).await.unwrap();
    assert_eq!(first.added, 1);

    let mut grouped = base.clone();
    grouped.custom_group = Some("RETIREMENT".to_string());
    let second = f.merger.execute(&grouped).await.unwrap();

    // Same symbol, different group: an independent add, not an update
    assert_eq!(second.added, 1);
    assert_eq!(second.updated, 0);
    assert_eq!(f.instruments.all().len(), 2);
}

#[tokio::test]
async fn test_close_forces_zero_quantity() {
    let f = fixture();
    let mut asset = resolved("AAPL", ImportAction::Close);
    asset.row.quantity = dec!(-5);

    let result = f
        .merger
        .execute(&request(vec![asset.clone()], vec![]))
        .await
        .unwrap();
    // No existing instrument: created directly at zero for the record
    assert_eq!(result.added, 1);
    assert_eq!(f.instruments.all()[0].quantity, Decimal::ZERO);

    let result = f
        .merger
        .execute(&request(vec![asset], vec![]))
        .await
        .unwrap();
    assert_eq!(result.updated, 1);
    assert_eq!(f.instruments.all()[0].quantity, Decimal::ZERO);
}

#[tokio::test]
async fn test_intra_batch_duplicates_resolve_to_update() {
    let f = fixture();
    let req = request(
        vec![
            resolved("AAPL", ImportAction::Add),
            resolved("AAPL", ImportAction::Add),
        ],
        vec![],
    );

    let result = f.merger.execute(&req).await.unwrap();

    // The second row must see the first row's insert
    assert_eq!(result.added, 1);
    assert_eq!(result.updated, 1);
    assert_eq!(f.instruments.all().len(), 1);
}

#[tokio::test]
async fn test_skip_leaves_store_untouched() {
    let f = fixture();
    let result = f
        .merger
        .execute(&request(vec![resolved("AAPL", ImportAction::Skip)], vec![]))
        .await
        .unwrap();

    assert_eq!(result.skipped, 1);
    assert!(f.instruments.all().is_empty());
}

#[tokio::test]
async fn test_new_instruments_sort_above_existing() {
    let f = fixture();
    f.merger
        .execute(&request(vec![resolved("AAPL", ImportAction::Add)], vec![]))
        .await
        .unwrap();
    f.merger
        .execute(&request(vec![resolved("MSFT", ImportAction::Add)], vec![]))
        .await
        .unwrap();

    let all = f.instruments.all();
    let aapl = all.iter().find(|i| i.symbol == "AAPL").unwrap();
    let msft = all.iter().find(|i| i.symbol == "MSFT").unwrap();
    assert!(msft.sort_order < aapl.sort_order);
}

#[tokio::test]
async fn test_display_name_overwrite_rules() {
    let f = fixture();

    // First import leaves a placeholder name (symbol as name)
    f.merger
        .execute(&request(vec![resolved("AAPL", ImportAction::Add)], vec![]))
        .await
        .unwrap();
    assert_eq!(f.instruments.all()[0].name, "AAPL");

    // Placeholder names get replaced
    let mut better = resolved("AAPL", ImportAction::Update);
    better.resolved_name = "Apple".to_string();
    better.sector = Some("Technology".to_string());
    f.merger
        .execute(&request(vec![better], vec![]))
        .await
        .unwrap();
    let stored = &f.instruments.all()[0];
    assert_eq!(stored.name, "Apple");
    assert_eq!(stored.sector, "Technology");

    // A non-canonical rename does not clobber the stored name, but
    // classification metadata still refreshes
    let mut rename = resolved("AAPL", ImportAction::Update);
    rename.resolved_name = "Apple Computer".to_string();
    rename.sector = Some("Consumer Electronics".to_string());
    f.merger
        .execute(&request(vec![rename], vec![]))
        .await
        .unwrap();
    let stored = &f.instruments.all()[0];
    assert_eq!(stored.name, "Apple");
    assert_eq!(stored.sector, "Consumer Electronics");
}

#[tokio::test]
async fn test_canonical_correction_overwrites_generic_name() {
    let f = fixture();

    let mut generic = resolved("BTC-EUR", ImportAction::Add);
    generic.resolved_name = "BTC EUR Spot".to_string();
    f.merger
        .execute(&request(vec![generic], vec![]))
        .await
        .unwrap();

    let mut canonical = resolved("BTC-EUR", ImportAction::Update);
    canonical.resolved_name = "Bitcoin".to_string();
    f.merger
        .execute(&request(vec![canonical], vec![]))
        .await
        .unwrap();

    assert_eq!(f.instruments.all()[0].name, "Bitcoin");
}

#[tokio::test]
async fn test_alias_learning_writes_distinct_sources() {
    let f = fixture();
    let mut asset = resolved("ASML.AS", ImportAction::Add);
    asset.row.symbol = "ASML".to_string();
    asset.row.name = Some("ASML Holding".to_string());
    asset.row.isin = Some("NL0010273215".to_string());
    asset.match_source = MatchSource::Isin;
    asset.confidence = 95;

    f.merger
        .execute(&request(vec![asset], vec![]))
        .await
        .unwrap();

    let aliases = f.aliases.all();
    assert_eq!(aliases.len(), 3);
    assert!(aliases.iter().all(|a| a.resolved_symbol == "ASML.AS"));
    assert!(aliases.iter().all(|a| a.is_verified));
    let sources: Vec<_> = aliases.iter().map(|a| a.source_string.as_str()).collect();
    assert!(sources.contains(&"ASML HOLDING"));
    assert!(sources.contains(&"NL0010273215"));
    assert!(sources.contains(&"ASML"));
}

#[tokio::test]
async fn test_alias_learning_skips_memory_and_low_confidence() {
    let f = fixture();

    let mut from_memory = resolved("AAPL", ImportAction::Add);
    from_memory.row.name = Some("Apple".to_string());
    from_memory.match_source = MatchSource::Memory;
    from_memory.confidence = 100;

    let mut low_confidence = resolved("MSFT", ImportAction::Add);
    low_confidence.row.name = Some("Microsoft".to_string());
    low_confidence.confidence = 70;

    f.merger
        .execute(&request(vec![from_memory, low_confidence], vec![]))
        .await
        .unwrap();

    assert!(f.aliases.all().is_empty());
}

#[tokio::test]
async fn test_transactions_upsert_by_external_id() {
    let f = fixture();
    let req = request(
        vec![resolved("AAPL", ImportAction::Add)],
        vec![tx_row("AAPL", Some("deg-123"))],
    );

    f.merger.execute(&req).await.unwrap();
    f.merger.execute(&req).await.unwrap();

    assert_eq!(f.transactions.all().len(), 1);
}

#[tokio::test]
async fn test_transaction_for_unknown_crypto_symbol_keeps_history() {
    let f = fixture();
    // No matching asset in the batch; the crypto heuristic still routes
    // the history row to a pair ticker
    let req = request(vec![], vec![tx_row("BTC", None)]);

    let result = f.merger.execute(&req).await.unwrap();

    assert_eq!(result.tx_added, 1);
    assert_eq!(f.transactions.all()[0].symbol, "BTC-EUR");
}

#[tokio::test]
async fn test_row_failure_does_not_abort_batch() {
    let f = fixture_with(MemInstrumentRepo::failing_for("BAD"));
    let req = request(
        vec![
            resolved("BAD", ImportAction::Add),
            resolved("GOOD", ImportAction::Add),
        ],
        vec![],
    );

    let result = f.merger.execute(&req).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.added, 1);
    assert_eq!(f.instruments.all().len(), 1);
}
