use super::aliases_model::AliasRecord;
use crate::errors::Result;

/// Trait defining the contract for the alias store.
#[async_trait::async_trait]
pub trait AliasRepositoryTrait: Send + Sync {
    /// All remembered aliases for a user.
    async fn find_for_user(&self, user_id: &str) -> Result<Vec<AliasRecord>>;

    /// Insert or overwrite the alias keyed on
    /// `(user_id, source_string, platform)`.
    async fn upsert(&self, record: AliasRecord) -> Result<()>;
}
