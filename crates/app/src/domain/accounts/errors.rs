//! Accounts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Account service error variants.
#[derive(Debug, Error)]
pub enum AccountsServiceError {
    /// An account with the same email or mobile already exists.
    #[error("an account with this email or mobile already exists")]
    DuplicateAccount,

    /// Login or password did not match.
    #[error("invalid login or password")]
    InvalidCredentials,

    /// Account was not found.
    #[error("account not found")]
    NotFound,

    /// Input was rejected before reaching the store.
    #[error("invalid account data: {0}")]
    Validation(String),

    /// Referenced related row does not exist.
    #[error("related resource not found")]
    InvalidReference,

    /// Required data was missing.
    #[error("missing required data")]
    MissingRequiredData,

    /// Provided data failed a store check.
    #[error("invalid data")]
    InvalidData,

    /// Password could not be hashed or a stored hash could not be parsed.
    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AccountsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateAccount,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
