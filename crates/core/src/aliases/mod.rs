//! Alias memory - remembered resolutions from previous imports.

mod aliases_model;
mod aliases_traits;
mod snapshot;

pub use aliases_model::AliasRecord;
pub use aliases_traits::AliasRepositoryTrait;
pub use snapshot::AliasSnapshot;
