//! Account Models

use std::fmt::{Debug, Formatter, Result as FmtResult};

use jiff::Timestamp;

use crate::{domain::accounts::errors::AccountsServiceError, uuids::TypedUuid};

/// Account UUID
pub type AccountUuid = TypedUuid<Account>;

/// Account Model
#[derive(Debug, Clone)]
pub struct Account {
    /// Store key.
    pub uuid: AccountUuid,

    /// Login email, unique case-insensitively.
    pub email: String,

    /// Login mobile number, unique.
    pub mobile: String,

    /// Trading name shown on bills.
    pub business_name: String,

    /// Account creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}

/// New Account Model
#[derive(Clone, PartialEq)]
pub struct NewAccount {
    /// Login email.
    pub email: String,

    /// Login mobile number.
    pub mobile: String,

    /// Trading name.
    pub business_name: String,

    /// Raw password; hashed before it reaches the store.
    pub password: String,
}

impl NewAccount {
    /// Check that every field is present, the email has an `@` and the mobile
    /// number is digits with an optional leading `+`.
    ///
    /// An email can never look like a mobile number, so a login value matches
    /// at most one column.
    ///
    /// # Errors
    ///
    /// Returns [`AccountsServiceError::Validation`] naming the first bad field.
    pub fn validate(&self) -> Result<(), AccountsServiceError> {
        for (field, value) in [
            ("email", &self.email),
            ("mobile", &self.mobile),
            ("business name", &self.business_name),
            ("password", &self.password),
        ] {
            if value.trim().is_empty() {
                return Err(AccountsServiceError::Validation(format!(
                    "{field} is required"
                )));
            }
        }

        if !self.email.contains('@') {
            return Err(AccountsServiceError::Validation(
                "email must contain @".to_string(),
            ));
        }

        let mobile = self.mobile.trim();
        let digits = mobile.strip_prefix('+').unwrap_or(mobile);

        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(AccountsServiceError::Validation(
                "mobile must be digits with an optional leading +".to_string(),
            ));
        }

        Ok(())
    }
}

impl Debug for NewAccount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("NewAccount")
            .field("email", &self.email)
            .field("mobile", &self.mobile)
            .field("business_name", &self.business_name)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login credentials: an email or mobile number and a password.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    /// Email or mobile number.
    pub login: String,

    /// Raw password.
    pub password: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}
