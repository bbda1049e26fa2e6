//! Core error types for the folionest import engine.
//!
//! This module defines database-agnostic error types. Storage-specific
//! errors are converted to these types by the repository implementations.

use thiserror::Error;

use folionest_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the import engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// Repository implementations convert their storage-specific errors
/// into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// A store query failed to execute.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g. duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Internal/unexpected store error.
    #[error("Internal store error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),
}

/// Top-level import precondition failures.
///
/// Everything below the preconditions is reported per row inside the
/// structured result instead of being raised.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Portfolio not found: {0}")]
    PortfolioNotFound(String),
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
