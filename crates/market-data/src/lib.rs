//! Folionest Market Data Crate
//!
//! Provider-agnostic market data lookups for the folionest import
//! engine:
//! - Latest quotes and symbol/ISIN/text search (Yahoo Finance)
//! - Company profile metadata with a provider cascade (Yahoo, Finnhub)
//! - National fund registry lookups (TEFAS)
//!
//! # Core Types
//!
//! - [`Quote`] - Latest market quote with display metadata
//! - [`SearchResult`] - A search hit with provider classification
//! - [`AssetProfile`] - Country/sector/industry metadata
//! - [`FundInfo`] - A fund registry record
//! - [`MarketDataProvider`] / [`FundProvider`] - Provider traits
//! - [`ProviderRegistry`] - Priority-ordered fallback over providers

pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;

pub use errors::MarketDataError;
pub use models::{AssetProfile, FundInfo, Quote, SearchResult};
pub use provider::finnhub::FinnhubProvider;
pub use provider::tefas::TefasProvider;
pub use provider::yahoo::YahooProvider;
pub use provider::{FundProvider, MarketDataProvider};
pub use registry::ProviderRegistry;
