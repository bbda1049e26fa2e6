//! Shared mocks for import pipeline tests.

use std::collections::HashMap;
use std::sync::Mutex;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use folionest_market_data::{AssetProfile, FundInfo, Quote, SearchResult};

use super::facade::MarketLookupTrait;
use super::import_model::{ImportAction, ImportRow, MatchSource, ResolvedAsset};
use crate::aliases::{AliasRecord, AliasRepositoryTrait};
use crate::assets::{
    Currency, Instrument, InstrumentRepositoryTrait, InstrumentUpdate, NewInstrument,
};
use crate::errors::{DatabaseError, Error, Result};
use crate::transactions::{
    NewTransaction, TransactionProbe, TransactionRepositoryTrait,
};

// --- Mock market facade ---

#[derive(Default)]
pub struct MockMarket {
    quotes: HashMap<String, Quote>,
    searches: HashMap<String, Vec<SearchResult>>,
    funds: HashMap<String, FundInfo>,
    profiles: HashMap<String, AssetProfile>,
    fail_search: bool,
    fail_funds: bool,
}

impl MockMarket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.quotes.insert(quote.symbol.to_uppercase(), quote);
        self
    }

    pub fn with_search(mut self, query: &str, results: Vec<SearchResult>) -> Self {
        self.searches.insert(query.to_uppercase(), results);
        self
    }

    pub fn with_fund(mut self, code: &str, title: &str, price: Decimal) -> Self {
        self.funds.insert(
            code.to_uppercase(),
            FundInfo {
                code: code.to_uppercase(),
                title: title.to_string(),
                price,
            },
        );
        self
    }

    pub fn with_profile(mut self, symbol: &str, country: &str, sector: &str) -> Self {
        self.profiles.insert(
            symbol.to_uppercase(),
            AssetProfile {
                country: Some(country.to_string()),
                sector: Some(sector.to_string()),
                industry: None,
                exchange: None,
            },
        );
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub fn failing_funds(mut self) -> Self {
        self.fail_funds = true;
        self
    }
}

#[async_trait::async_trait]
impl MarketLookupTrait for MockMarket {
    async fn get_quote(&self, symbol: &str) -> Result<Option<Quote>> {
        Ok(self.quotes.get(&symbol.to_uppercase()).cloned())
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        if self.fail_search {
            return Err(Error::Unexpected("search provider down".to_string()));
        }
        Ok(self
            .searches
            .get(&query.to_uppercase())
            .cloned()
            .unwrap_or_default())
    }

    async fn lookup_fund(&self, code: &str) -> Result<Option<FundInfo>> {
        if self.fail_funds {
            return Err(Error::Unexpected("fund registry down".to_string()));
        }
        Ok(self.funds.get(&code.to_uppercase()).cloned())
    }

    async fn get_profile(&self, symbol: &str) -> Result<Option<AssetProfile>> {
        Ok(self.profiles.get(&symbol.to_uppercase()).cloned())
    }
}

pub fn quote(symbol: &str, price: Decimal, currency: &str) -> Quote {
    Quote {
        symbol: symbol.to_string(),
        price,
        currency: Some(currency.to_string()),
        exchange: None,
        short_name: None,
        long_name: None,
        quote_type: None,
    }
}

pub fn search_result(symbol: &str, name: &str, quote_type: &str) -> SearchResult {
    SearchResult::new(symbol)
        .with_short_name(name)
        .with_quote_type(quote_type)
}

// --- Row / asset fixtures ---

pub fn row(symbol: &str) -> ImportRow {
    ImportRow {
        symbol: symbol.to_string(),
        isin: None,
        name: None,
        quantity: dec!(10),
        buy_price: dec!(100),
        currency: Currency::Eur,
        asset_type: None,
        platform: None,
        exchange: None,
    }
}

pub fn resolved(symbol: &str, action: ImportAction) -> ResolvedAsset {
    let mut asset = ResolvedAsset::unresolved(&row(symbol), String::new());
    asset.warnings.clear();
    asset.resolved_symbol = symbol.to_string();
    asset.resolved_name = symbol.to_string();
    asset.confidence = 90;
    asset.match_source = MatchSource::Search;
    asset.action = action;
    asset
}

// --- Mock instrument repository ---

#[derive(Default)]
pub struct MemInstrumentRepo {
    items: Mutex<Vec<Instrument>>,
    fail_symbol: Option<String>,
}

impl MemInstrumentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repo that rejects creates for one symbol, for error-isolation tests.
    pub fn failing_for(symbol: &str) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            fail_symbol: Some(symbol.to_string()),
        }
    }

    pub fn seed(&self, instrument: Instrument) {
        self.items.lock().unwrap().push(instrument);
    }

    pub fn all(&self) -> Vec<Instrument> {
        self.items.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl InstrumentRepositoryTrait for MemInstrumentRepo {
    async fn find_portfolio_instruments(&self, portfolio_id: &str) -> Result<Vec<Instrument>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.portfolio_id == portfolio_id)
            .cloned()
            .collect())
    }

    async fn create(&self, new_instrument: NewInstrument) -> Result<Instrument> {
        if self.fail_symbol.as_deref() == Some(new_instrument.symbol.as_str()) {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "write rejected".to_string(),
            )));
        }
        let instrument = Instrument {
            id: new_instrument.id,
            portfolio_id: new_instrument.portfolio_id,
            symbol: new_instrument.symbol,
            isin: new_instrument.isin,
            name: new_instrument.name,
            original_name: new_instrument.original_name,
            instrument_type: new_instrument.instrument_type,
            category: new_instrument.category,
            quantity: new_instrument.quantity,
            buy_price: new_instrument.buy_price,
            currency: new_instrument.currency,
            exchange: new_instrument.exchange,
            country: new_instrument.country,
            sector: new_instrument.sector,
            platform: new_instrument.platform,
            custom_group: new_instrument.custom_group,
            sort_order: new_instrument.sort_order,
            logo_url: new_instrument.logo_url,
        };
        self.items.lock().unwrap().push(instrument.clone());
        Ok(instrument)
    }

    async fn update(&self, instrument_id: &str, update: InstrumentUpdate) -> Result<Instrument> {
        let mut items = self.items.lock().unwrap();
        let instrument = items
            .iter_mut()
            .find(|i| i.id == instrument_id)
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(instrument_id.to_string()))
            })?;
        instrument.quantity = update.quantity;
        instrument.buy_price = update.buy_price;
        if let Some(name) = update.name {
            instrument.name = name;
        }
        if update.isin.is_some() {
            instrument.isin = update.isin;
        }
        instrument.instrument_type = update.instrument_type;
        instrument.category = update.category;
        instrument.currency = update.currency;
        instrument.exchange = update.exchange;
        instrument.country = update.country;
        instrument.sector = update.sector;
        instrument.logo_url = update.logo_url;
        Ok(instrument.clone())
    }

    async fn find_min_sort_order(&self, portfolio_id: &str) -> Result<Option<i32>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.portfolio_id == portfolio_id)
            .map(|i| i.sort_order)
            .min())
    }
}

// --- Mock transaction repository ---

#[derive(Default)]
pub struct MemTransactionRepo {
    items: Mutex<Vec<NewTransaction>>,
}

impl MemTransactionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<NewTransaction> {
        self.items.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TransactionRepositoryTrait for MemTransactionRepo {
    async fn upsert_by_external_id(
        &self,
        portfolio_id: &str,
        external_id: &str,
        tx: NewTransaction,
    ) -> Result<()> {
        let mut items = self.items.lock().unwrap();
        if let Some(existing) = items.iter_mut().find(|t| {
            t.portfolio_id == portfolio_id && t.external_id.as_deref() == Some(external_id)
        }) {
            *existing = tx;
        } else {
            items.push(tx);
        }
        Ok(())
    }

    async fn find_fuzzy_duplicate(
        &self,
        portfolio_id: &str,
        probe: &TransactionProbe,
    ) -> Result<bool> {
        Ok(self.items.lock().unwrap().iter().any(|t| {
            t.portfolio_id == portfolio_id
                && t.symbol.eq_ignore_ascii_case(&probe.symbol)
                && t.date.date_naive() == probe.date.date_naive()
                && t.quantity == probe.quantity
                && t.price == probe.price
                && t.tx_type == probe.tx_type
        }))
    }

    async fn create(&self, tx: NewTransaction) -> Result<()> {
        self.items.lock().unwrap().push(tx);
        Ok(())
    }
}

// --- Mock alias repository ---

#[derive(Default)]
pub struct MemAliasRepo {
    items: Mutex<Vec<AliasRecord>>,
}

impl MemAliasRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<AliasRecord> {
        self.items.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AliasRepositoryTrait for MemAliasRepo {
    async fn find_for_user(&self, user_id: &str) -> Result<Vec<AliasRecord>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn upsert(&self, record: AliasRecord) -> Result<()> {
        let mut items = self.items.lock().unwrap();
        if let Some(existing) = items.iter_mut().find(|a| {
            a.user_id == record.user_id
                && a.source_string == record.source_string
                && a.platform == record.platform
        }) {
            *existing = record;
        } else {
            items.push(record);
        }
        Ok(())
    }
}
