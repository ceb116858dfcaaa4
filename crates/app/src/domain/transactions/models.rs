//! Transaction Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use viyaabhaaram::cart::LineSnapshot;

use crate::{domain::transactions::errors::TransactionsServiceError, uuids::TypedUuid};

/// Transaction UUID
pub type TransactionUuid = TypedUuid<Transaction>;

/// Direction of a stock-moving transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Sale,
    Purchase,
}

impl TransactionKind {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "SALE",
            Self::Purchase => "PURCHASE",
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionsServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SALE" => Ok(Self::Sale),
            "PURCHASE" => Ok(Self::Purchase),
            other => Err(TransactionsServiceError::Validation(format!(
                "unknown transaction kind {other:?}"
            ))),
        }
    }
}

/// Transaction Model
///
/// Immutable once stored. `items_data` is the cart as it was at checkout, so
/// later catalog edits never change a past bill.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub uuid: TransactionUuid,
    pub kind: TransactionKind,

    /// Sum of line extensions in minor currency units.
    pub amount: u64,
    pub items_data: Vec<LineSnapshot>,
    pub date: Timestamp,
}

/// New Transaction Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub uuid: TransactionUuid,
    pub kind: TransactionKind,
    pub amount: u64,
    pub items_data: Vec<LineSnapshot>,
}

/// Sum of the amounts of all sale transactions, or `None` on overflow.
pub fn total_sales(transactions: &[Transaction]) -> Option<u64> {
    transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Sale)
        .try_fold(0_u64, |acc, transaction| acc.checked_add(transaction.amount))
}
