use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::assets::{AssetCategory, Currency, InstrumentType};

/// One parsed row from a broker/exchange CSV export. Immutable input.
///
/// `symbol` may be an exchange ticker, an ISIN, or whatever raw
/// identifier the export used; resolution decides what it really is.
/// A quantity at or below [`ImportRow::is_closed`]'s epsilon marks a
/// fully exited position.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRow {
    pub symbol: String,
    pub isin: Option<String>,
    pub name: Option<String>,
    pub quantity: Decimal,
    pub buy_price: Decimal,
    pub currency: Currency,
    /// Type label as it appeared in the file ("ETF", "FON", ...)
    pub asset_type: Option<String>,
    pub platform: Option<String>,
    pub exchange: Option<String>,
}

impl ImportRow {
    /// Alias-memory lookup key: trimmed upper-cased name, falling back
    /// to the symbol.
    pub fn alias_key(&self) -> String {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.symbol)
            .trim()
            .to_uppercase()
    }

    /// Name used for similarity scoring and warnings.
    pub fn input_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.symbol)
    }

    /// Whether the row describes a closed position.
    pub fn is_closed(&self) -> bool {
        self.quantity <= dec!(0.000001)
    }
}

/// Where a resolution came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchSource {
    /// Canonical registry or alias memory
    Memory,
    /// ISIN-based search
    Isin,
    /// Name/symbol search
    Search,
    /// Nothing matched
    None,
}

/// What the merge should do with a row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportAction {
    Add,
    Update,
    Skip,
    Close,
}

impl ImportAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportAction::Add => "add",
            ImportAction::Update => "update",
            ImportAction::Skip => "skip",
            ImportAction::Close => "close",
        }
    }
}

/// Advisory reference to a stored instrument matched at resolution time.
///
/// Computed against a resolution-time snapshot; the merge re-validates
/// against a fresh one before writing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistingAssetRef {
    pub id: String,
    pub quantity: Decimal,
    pub buy_price: Decimal,
}

/// An import row plus everything the resolution pipeline decided.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAsset {
    pub row: ImportRow,
    pub resolved_symbol: String,
    pub resolved_name: String,
    pub resolved_type: InstrumentType,
    pub resolved_currency: String,
    pub exchange: Option<String>,
    pub country: Option<String>,
    pub sector: Option<String>,
    pub category: Option<AssetCategory>,
    pub current_price: Option<Decimal>,
    /// 0-100 trust in the match
    pub confidence: u8,
    pub match_source: MatchSource,
    pub existing_asset: Option<ExistingAssetRef>,
    pub action: ImportAction,
    pub warnings: Vec<String>,
}

impl ResolvedAsset {
    /// A row the pipeline could not resolve at all: identity kept as-is,
    /// zero confidence, one explanatory warning.
    pub fn unresolved(row: &ImportRow, warning: String) -> Self {
        let resolved_type = row
            .asset_type
            .as_deref()
            .and_then(InstrumentType::from_label)
            .unwrap_or(InstrumentType::Stock);
        Self {
            resolved_symbol: row.symbol.clone(),
            resolved_name: row.input_name().to_string(),
            resolved_type,
            resolved_currency: row.currency.as_str().to_string(),
            exchange: row.exchange.clone(),
            country: None,
            sector: None,
            category: None,
            current_price: None,
            confidence: 0,
            match_source: MatchSource::None,
            existing_asset: None,
            action: ImportAction::Add,
            warnings: vec![warning],
            row: row.clone(),
        }
    }
}

/// Outcome of the resolution phase, returned to the caller for review.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReport {
    pub success: bool,
    pub resolved: Vec<ResolvedAsset>,
    pub errors: Vec<String>,
}

/// Outcome of the merge phase.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub success: bool,
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
    pub tx_added: usize,
    pub errors: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(symbol: &str, quantity: Decimal) -> ImportRow {
        ImportRow {
            symbol: symbol.to_string(),
            isin: None,
            name: None,
            quantity,
            buy_price: dec!(1),
            currency: Currency::Usd,
            asset_type: None,
            platform: None,
            exchange: None,
        }
    }

    #[test]
    fn test_closed_detection_uses_epsilon() {
        assert!(row("AAPL", dec!(0)).is_closed());
        assert!(row("AAPL", dec!(-3)).is_closed());
        assert!(row("AAPL", dec!(0.0000005)).is_closed());
        assert!(!row("AAPL", dec!(0.001)).is_closed());
    }

    #[test]
    fn test_alias_key_prefers_name() {
        let mut r = row("btc", dec!(1));
        assert_eq!(r.alias_key(), "BTC");
        r.name = Some("  Bitcoin ".to_string());
        assert_eq!(r.alias_key(), "BITCOIN");
    }
}
