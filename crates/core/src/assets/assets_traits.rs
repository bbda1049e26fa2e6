use super::assets_model::{Instrument, InstrumentUpdate, NewInstrument};
use crate::errors::Result;

/// Trait defining the contract for instrument store operations.
///
/// The persistent store itself is an external collaborator; the import
/// engine only relies on these operations.
#[async_trait::async_trait]
pub trait InstrumentRepositoryTrait: Send + Sync {
    /// All instruments currently held in a portfolio.
    async fn find_portfolio_instruments(&self, portfolio_id: &str) -> Result<Vec<Instrument>>;

    /// Insert a new instrument.
    async fn create(&self, new_instrument: NewInstrument) -> Result<Instrument>;

    /// Overwrite the mutable fields of an existing instrument.
    async fn update(&self, instrument_id: &str, update: InstrumentUpdate) -> Result<Instrument>;

    /// Lowest sort order currently assigned in the portfolio, if any.
    async fn find_min_sort_order(&self, portfolio_id: &str) -> Result<Option<i32>>;
}
