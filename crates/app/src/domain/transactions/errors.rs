//! Transactions service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionsServiceError {
    #[error("transaction already exists")]
    AlreadyExists,

    #[error("transaction not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    /// Input was rejected before reaching the store.
    #[error("invalid transaction: {0}")]
    Validation(String),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("amount out of range")]
    OutOfRange(#[from] TryFromIntError),

    /// Line snapshots could not be encoded for storage.
    #[error("invalid line snapshot")]
    Snapshot(#[from] serde_json::Error),
}

impl From<Error> for TransactionsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
