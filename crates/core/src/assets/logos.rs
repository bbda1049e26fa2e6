//! Logo URL construction.

use super::categories::AssetCategory;

/// Deterministic logo URL for an instrument, if its category has a
/// logo source. Cash, FX and fund-registry instruments have none.
pub fn logo_url(symbol: &str, category: AssetCategory) -> Option<String> {
    let base = symbol
        .split(['-', '.'])
        .next()
        .unwrap_or(symbol)
        .to_lowercase();

    match category {
        AssetCategory::Crypto => Some(format!(
            "https://assets.coincap.io/assets/icons/{}@2x.png",
            base
        )),
        AssetCategory::Bist | AssetCategory::UsMarkets | AssetCategory::EuMarkets => {
            Some(format!("https://img.logo.dev/ticker/{}", base))
        }
        AssetCategory::Tefas
        | AssetCategory::Commodities
        | AssetCategory::Fx
        | AssetCategory::Cash => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_uses_base_symbol() {
        let url = logo_url("BTC-EUR", AssetCategory::Crypto).unwrap();
        assert!(url.contains("/btc@"));
    }

    #[test]
    fn test_cash_has_no_logo() {
        assert!(logo_url("EUR", AssetCategory::Cash).is_none());
    }
}
