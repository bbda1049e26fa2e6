//! Folionest Core - Domain entities, services, and traits.
//!
//! This crate contains the import-resolution engine: mapping noisy
//! broker CSV rows to canonical instrument identities and merging them
//! into a portfolio store idempotently. It is storage-agnostic and
//! defines the repository traits its stores must implement.

pub mod aliases;
pub mod assets;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod import;
pub mod transactions;

// Re-export common types
pub use assets::*;
pub use import::{ImportResult, ImportRow, ResolveReport, ResolvedAsset};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
