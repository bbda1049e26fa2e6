//! Transaction history - models and store traits.

mod transactions_model;
mod transactions_traits;

pub use transactions_model::{NewTransaction, TransactionProbe, TransactionRow, TransactionType};
pub use transactions_traits::TransactionRepositoryTrait;
