//! Canonical asset registry.
//!
//! Display names and classes for assets whose identity must never
//! depend on third-party data. A noisy CSV name next to one of these
//! symbols is ignored: "ETH" is Ethereum no matter what the file says.

use crate::assets::InstrumentType;

/// A canonical registry entry.
pub struct CanonicalEntry {
    pub symbol: &'static str,
    pub name: &'static str,
    pub instrument_type: InstrumentType,
}

const fn crypto(symbol: &'static str, name: &'static str) -> CanonicalEntry {
    CanonicalEntry {
        symbol,
        name,
        instrument_type: InstrumentType::Crypto,
    }
}

static CANONICAL_ASSETS: [CanonicalEntry; 16] = [
    crypto("BTC", "Bitcoin"),
    crypto("ETH", "Ethereum"),
    crypto("XRP", "XRP"),
    crypto("SOL", "Solana"),
    crypto("ADA", "Cardano"),
    crypto("DOGE", "Dogecoin"),
    crypto("DOT", "Polkadot"),
    crypto("AVAX", "Avalanche"),
    crypto("LINK", "Chainlink"),
    crypto("LTC", "Litecoin"),
    crypto("MATIC", "Polygon"),
    crypto("UNI", "Uniswap"),
    crypto("ATOM", "Cosmos"),
    crypto("XLM", "Stellar"),
    crypto("TRX", "Tron"),
    crypto("BCH", "Bitcoin Cash"),
];

/// Look up a symbol in the canonical registry.
///
/// Pair symbols match on their base ("ETH-USD" matches "ETH");
/// matching is case-insensitive.
pub fn canonical_lookup(symbol: &str) -> Option<&'static CanonicalEntry> {
    let upper = symbol.trim().to_uppercase();
    let base = upper.split(['-', '/']).next().unwrap_or(upper.as_str());
    CANONICAL_ASSETS.iter().find(|e| e.symbol == base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(canonical_lookup("eth").unwrap().name, "Ethereum");
    }

    #[test]
    fn test_pair_symbols_match_on_base() {
        assert_eq!(canonical_lookup("BTC-EUR").unwrap().name, "Bitcoin");
        assert_eq!(canonical_lookup("ETH/USD").unwrap().name, "Ethereum");
    }

    #[test]
    fn test_entries_are_crypto_class() {
        assert_eq!(
            canonical_lookup("SOL").unwrap().instrument_type,
            InstrumentType::Crypto
        );
    }

    #[test]
    fn test_spot_metals_are_not_canonical() {
        // Metals go through search so ticker reuse can be caught
        assert!(canonical_lookup("XAU").is_none());
    }

    #[test]
    fn test_unknown_symbol_misses() {
        assert!(canonical_lookup("AAPL").is_none());
    }
}
