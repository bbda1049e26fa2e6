//! Currency rate table.
//!
//! The import engine itself does no conversion; it fetches the table
//! once per import call and hands it to the caller alongside the
//! result. Rates are quoted as units of currency per EUR.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::Result;

/// Trait defining the contract for the currency rate source.
#[async_trait::async_trait]
pub trait RateProviderTrait: Send + Sync {
    /// Currency -> rate-to-EUR table.
    async fn rates_to_eur(&self) -> Result<HashMap<String, Decimal>>;
}

/// Emergency rates used when the live source is unavailable.
pub fn fallback_rates() -> HashMap<String, Decimal> {
    HashMap::from([
        ("EUR".to_string(), dec!(1)),
        ("USD".to_string(), dec!(1.05)),
        ("TRY".to_string(), dec!(35)),
    ])
}

/// Rate provider that always answers with the hard-coded fallback
/// table. Used as the terminal element of a provider chain and in
/// tests.
pub struct FallbackRateProvider;

#[async_trait::async_trait]
impl RateProviderTrait for FallbackRateProvider {
    async fn rates_to_eur(&self) -> Result<HashMap<String, Decimal>> {
        Ok(fallback_rates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_covers_supported_currencies() {
        let rates = fallback_rates();
        for currency in crate::constants::SUPPORTED_CURRENCIES {
            assert!(rates.contains_key(currency), "missing {}", currency);
        }
        assert_eq!(rates["EUR"], dec!(1));
    }
}
