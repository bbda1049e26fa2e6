//! Fund registry lookup model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fund record from a national fund registry (e.g. TEFAS).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FundInfo {
    /// Registry fund code (e.g. "TCD")
    pub code: String,

    /// Official fund title as published by the registry
    pub title: String,

    /// Latest unit price in the registry's local currency
    pub price: Decimal,
}
