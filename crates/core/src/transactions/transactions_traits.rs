use super::transactions_model::{NewTransaction, TransactionProbe};
use crate::errors::Result;

/// Trait defining the contract for the transaction history store.
#[async_trait::async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Insert or overwrite the row keyed on `(portfolio_id, external_id)`.
    async fn upsert_by_external_id(
        &self,
        portfolio_id: &str,
        external_id: &str,
        tx: NewTransaction,
    ) -> Result<()>;

    /// Whether a row matching the probe already exists. Used to avoid
    /// duplicate history on re-import of files without stable ids.
    async fn find_fuzzy_duplicate(
        &self,
        portfolio_id: &str,
        probe: &TransactionProbe,
    ) -> Result<bool>;

    /// Insert a new history row.
    async fn create(&self, tx: NewTransaction) -> Result<()>;
}
