use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Type of a transaction history row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Buy,
    Sell,
    Deposit,
    Withdrawal,
    Dividend,
    Fee,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "BUY",
            TransactionType::Sell => "SELL",
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
            TransactionType::Dividend => "DIVIDEND",
            TransactionType::Fee => "FEE",
        }
    }

    /// Parse a broker-supplied type label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_uppercase().as_str() {
            "BUY" | "PURCHASE" => Some(TransactionType::Buy),
            "SELL" | "SALE" => Some(TransactionType::Sell),
            "DEPOSIT" => Some(TransactionType::Deposit),
            "WITHDRAWAL" => Some(TransactionType::Withdrawal),
            "DIVIDEND" => Some(TransactionType::Dividend),
            "FEE" | "COMMISSION" => Some(TransactionType::Fee),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transaction history row as parsed from the import file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    /// Raw identifier from the file (ticker or ISIN, not yet resolved)
    pub symbol: String,
    pub isin: Option<String>,
    pub name: Option<String>,
    pub tx_type: TransactionType,
    pub quantity: Decimal,
    pub price: Decimal,
    pub currency: String,
    pub date: DateTime<Utc>,
    pub exchange: Option<String>,
    pub platform: Option<String>,
    /// Broker-assigned stable identifier, when the export has one
    pub external_id: Option<String>,
}

/// Payload for inserting a transaction history row.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub portfolio_id: String,
    pub symbol: String,
    pub name: Option<String>,
    pub tx_type: TransactionType,
    pub quantity: Decimal,
    pub price: Decimal,
    pub currency: String,
    pub date: DateTime<Utc>,
    pub exchange: Option<String>,
    pub platform: Option<String>,
    pub external_id: Option<String>,
}

/// Fields used for fuzzy duplicate detection when a row carries no
/// external identifier. Date matching is day-granular.
#[derive(Clone, Debug)]
pub struct TransactionProbe {
    pub symbol: String,
    pub date: DateTime<Utc>,
    pub quantity: Decimal,
    pub price: Decimal,
    pub tx_type: TransactionType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_labels() {
        assert_eq!(TransactionType::from_label("buy"), Some(TransactionType::Buy));
        assert_eq!(TransactionType::from_label("SALE"), Some(TransactionType::Sell));
        assert_eq!(TransactionType::from_label("???"), None);
    }
}
