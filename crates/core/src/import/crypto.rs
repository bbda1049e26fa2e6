//! Crypto classification heuristics and pair-ticker construction.

use super::canonical::canonical_lookup;
use super::import_model::ImportRow;
use crate::assets::InstrumentType;

/// Base symbols treated as crypto without further evidence.
const KNOWN_CRYPTO_SYMBOLS: [&str; 20] = [
    "BTC", "ETH", "XRP", "SOL", "ADA", "DOGE", "DOT", "AVAX", "LINK", "LTC", "MATIC", "UNI",
    "ATOM", "XLM", "TRX", "BCH", "ALGO", "XTZ", "SHIB", "XBT",
];

/// Name fragments that mark a row as crypto.
const CRYPTO_NAME_KEYWORDS: [&str; 10] = [
    "BITCOIN",
    "ETHEREUM",
    "RIPPLE",
    "SOLANA",
    "CARDANO",
    "DOGECOIN",
    "LITECOIN",
    "POLKADOT",
    "COINSHARES",
    "CRYPTO",
];

/// Pseudo-ISIN prefix some aggregators emit for digital assets.
const CRYPTO_ISIN_PREFIX: &str = "XF";

/// Extract the base coin symbol from a raw identifier.
///
/// Strips pair suffixes ("ETH-USD", "ETH/USD" -> "ETH") and folds
/// Kraken-style legacy codes onto their modern spelling.
pub fn base_symbol(symbol: &str) -> String {
    let upper = symbol.trim().to_uppercase();
    let base = upper.split(['-', '/']).next().unwrap_or(upper.as_str());
    match base {
        "XBT" | "XXBT" => "BTC".to_string(),
        "XETH" => "ETH".to_string(),
        "XXRP" => "XRP".to_string(),
        "XLTC" => "LTC".to_string(),
        other => other.to_string(),
    }
}

/// Construct a pair ticker for a base coin and quote currency.
///
/// The row's currency always wins over any suffix already present in
/// the raw symbol: callers pass the output of [`base_symbol`].
pub fn build_ticker(base: &str, currency: &str) -> String {
    format!("{}-{}", base.to_uppercase(), currency.to_uppercase())
}

/// Crypto classification from the individual row fields.
pub fn looks_like_crypto_parts(
    symbol: &str,
    name: Option<&str>,
    isin: Option<&str>,
    type_label: Option<&str>,
) -> bool {
    if let Some(label) = type_label {
        if InstrumentType::from_label(label) == Some(InstrumentType::Crypto) {
            return true;
        }
    }

    let base = base_symbol(symbol);
    if KNOWN_CRYPTO_SYMBOLS.contains(&base.as_str()) {
        return true;
    }

    if canonical_lookup(symbol)
        .map(|e| e.instrument_type == InstrumentType::Crypto)
        .unwrap_or(false)
    {
        return true;
    }

    if let Some(name) = name {
        let upper = name.to_uppercase();
        if CRYPTO_NAME_KEYWORDS.iter().any(|k| upper.contains(k)) {
            return true;
        }
    }

    if let Some(isin) = isin {
        if isin.trim().to_uppercase().starts_with(CRYPTO_ISIN_PREFIX) {
            return true;
        }
    }

    false
}

/// Crypto classification for an import row.
pub fn looks_like_crypto(row: &ImportRow) -> bool {
    looks_like_crypto_parts(
        &row.symbol,
        row.name.as_deref(),
        row.isin.as_deref(),
        row.asset_type.as_deref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_symbol_strips_pair_suffix() {
        assert_eq!(base_symbol("ETH-USD"), "ETH");
        assert_eq!(base_symbol("eth/eur"), "ETH");
        assert_eq!(base_symbol("BTC"), "BTC");
    }

    #[test]
    fn test_base_symbol_folds_kraken_codes() {
        assert_eq!(base_symbol("XBT"), "BTC");
        assert_eq!(base_symbol("XXBT-EUR"), "BTC");
    }

    #[test]
    fn test_build_ticker() {
        assert_eq!(build_ticker("BTC", "EUR"), "BTC-EUR");
        // row currency overrides a suffix already on the raw symbol
        assert_eq!(build_ticker(&base_symbol("ETH-USD"), "EUR"), "ETH-EUR");
    }

    #[test]
    fn test_name_keyword_triggers() {
        assert!(looks_like_crypto_parts("ABC123", Some("CoinShares Bitcoin Tracker"), None, None));
        assert!(!looks_like_crypto_parts("AAPL", Some("Apple"), None, None));
    }

    #[test]
    fn test_equity_isin_does_not_trigger() {
        assert!(!looks_like_crypto_parts("XAU", Some("Gold Physical"), Some("XC0009655157"), None));
    }
}
