//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur during market data operations.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    /// This is a terminal error - retrying won't help.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider does not support the requested operation
    /// (e.g. profile lookup on a quote-only provider).
    #[error("Operation '{operation}' not supported by provider: {provider}")]
    NotSupported {
        /// The unsupported operation name
        operation: String,
        /// The provider that does not support it
        provider: String,
    },

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// A provider-specific error occurred.
    /// Try the next provider in the chain.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned a response we could not parse.
    #[error("Parse failed: {provider} - {message}")]
    ParseFailed {
        /// The provider whose response failed to parse
        provider: String,
        /// Description of the parse failure
        message: String,
    },

    /// All providers were tried and all failed.
    #[error("All providers failed")]
    AllProvidersFailed,

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether the registry should fall through to the next provider
    /// after this error, rather than aborting the lookup.
    pub fn tries_next_provider(&self) -> bool {
        match self {
            Self::NotSupported { .. }
            | Self::RateLimited { .. }
            | Self::ProviderError { .. }
            | Self::ParseFailed { .. }
            | Self::Network(_) => true,
            Self::SymbolNotFound(_) | Self::AllProvidersFailed => false,
        }
    }
}
