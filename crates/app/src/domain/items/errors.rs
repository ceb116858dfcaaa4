//! Items service errors.

use std::num::TryFromIntError;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemsServiceError {
    #[error("item already exists")]
    AlreadyExists,

    #[error("item not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    /// Input was rejected before reaching the store.
    #[error("invalid item: {0}")]
    Validation(String),

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("price or stock out of range")]
    OutOfRange(#[from] TryFromIntError),
}

impl From<Error> for ItemsServiceError {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_rejects_negative() {
        let result = u32::try_from(-1_i32);

        assert!(result.is_err());
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = ItemsServiceError::from(Error::RowNotFound);

        assert!(
            matches!(error, ItemsServiceError::NotFound),
            "expected NotFound, got {error:?}"
        );
    }
}
