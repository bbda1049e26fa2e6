//! Tuning constants for the import resolution pipeline.
//!
//! The confidence values are policy, not physics: callers may re-tune
//! them as long as more fallback steps always means a strictly lower
//! confidence.

/// Rows resolved with full parallelism per chunk
pub const RESOLVE_CHUNK_SIZE: usize = 5;

/// Pause between chunks, to stay polite with third-party providers
pub const RESOLVE_CHUNK_DELAY_MS: u64 = 200;

/// Name-similarity acceptance threshold (boundary-inclusive)
pub const SIMILARITY_THRESHOLD: f64 = 0.4;

/// Canonical-registry and alias-memory hits
pub const CONFIDENCE_MEMORY: u8 = 100;

/// Fund registry answered for a fund-classified row
pub const CONFIDENCE_FUND_REGISTRY: u8 = 100;

/// Fund registry failed but the market classification stands
pub const CONFIDENCE_FUND_DEGRADED: u8 = 70;

/// Crypto: direct quote on the constructed pair ticker
pub const CONFIDENCE_CRYPTO_DIRECT: u8 = 99;

/// Crypto: search hit with the requested quote currency
pub const CONFIDENCE_CRYPTO_SEARCH: u8 = 98;

/// Crypto: ticker rebuilt from a search hit, then priced
pub const CONFIDENCE_CRYPTO_CONSTRUCTED: u8 = 95;

/// Crypto: rebuilt ticker could not be priced
pub const CONFIDENCE_CRYPTO_UNPRICED: u8 = 80;

/// Crypto: no search results at all, ticker committed blind
pub const CONFIDENCE_CRYPTO_BLIND: u8 = 75;

/// Generic search: accepted via ISIN-based search
pub const CONFIDENCE_ISIN_MATCH: u8 = 95;

/// Generic search: exact symbol/ISIN hit among results
pub const CONFIDENCE_EXACT_SYMBOL: u8 = 90;

/// Generic search: accepted on name similarity
pub const CONFIDENCE_NAME_MATCH: u8 = 85;

/// Generic search: best candidate rejected below threshold
pub const CONFIDENCE_REJECTED: u8 = 10;

/// No search results at all
pub const CONFIDENCE_NO_MATCH: u8 = 0;

/// Minimum confidence for writing alias memory entries
pub const ALIAS_LEARNING_MIN_CONFIDENCE: u8 = 80;
