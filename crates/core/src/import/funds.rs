//! Turkish fund registry (TEFAS) classification.

use super::import_model::ImportRow;
use crate::assets::InstrumentType;

/// Whether a row belongs to the Turkish mutual fund registry.
///
/// Triggered by explicit markers ("FON"/"TEFAS" type, TEFAS exchange)
/// or by a TR-prefixed ISIN combined with a fund/ETF type hint. The
/// classification itself is considered reliable even when the live
/// registry call later fails.
pub fn looks_like_tr_fund(row: &ImportRow) -> bool {
    if let Some(label) = row.asset_type.as_deref() {
        let upper = label.trim().to_uppercase();
        if upper == "FON" || upper == "TEFAS" {
            return true;
        }
    }

    if row
        .exchange
        .as_deref()
        .map(|e| e.to_uppercase().contains("TEFAS"))
        .unwrap_or(false)
    {
        return true;
    }

    let fund_hint = row
        .asset_type
        .as_deref()
        .and_then(InstrumentType::from_label)
        == Some(InstrumentType::Fund);
    let tr_isin = row
        .isin
        .as_deref()
        .map(|i| i.trim().to_uppercase().starts_with("TR"))
        .unwrap_or(false);

    fund_hint && tr_isin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Currency;
    use rust_decimal_macros::dec;

    fn row(asset_type: Option<&str>, exchange: Option<&str>, isin: Option<&str>) -> ImportRow {
        ImportRow {
            symbol: "TCD".to_string(),
            isin: isin.map(str::to_string),
            name: None,
            quantity: dec!(10),
            buy_price: dec!(30),
            currency: Currency::Try,
            asset_type: asset_type.map(str::to_string),
            platform: None,
            exchange: exchange.map(str::to_string),
        }
    }

    #[test]
    fn test_explicit_markers() {
        assert!(looks_like_tr_fund(&row(Some("FON"), None, None)));
        assert!(looks_like_tr_fund(&row(None, Some("TEFAS"), None)));
    }

    #[test]
    fn test_tr_isin_needs_fund_hint() {
        assert!(looks_like_tr_fund(&row(Some("ETF"), None, Some("TRYTCD00000"))));
        assert!(!looks_like_tr_fund(&row(None, None, Some("TRYTCD00000"))));
        assert!(!looks_like_tr_fund(&row(Some("ETF"), None, Some("US0378331005"))));
    }
}
