//! Password hashing

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{Error as PasswordHashError, SaltString},
};

use crate::domain::accounts::errors::AccountsServiceError;

/// Hash a raw password into a PHC string.
pub(crate) fn hash_password(password: &str) -> Result<String, AccountsServiceError> {
    let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>()).map_err(into_service_error)?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(into_service_error)?;

    Ok(hash.to_string())
}

/// Check a raw password against a stored PHC string.
pub(crate) fn verify_password(password: &str, hash: &str) -> Result<bool, AccountsServiceError> {
    let parsed = PasswordHash::new(hash).map_err(into_service_error)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PasswordHashError::Password) => Ok(false),
        Err(error) => Err(into_service_error(error)),
    }
}

fn into_service_error(error: PasswordHashError) -> AccountsServiceError {
    AccountsServiceError::PasswordHash(error.to_string())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn hash_verifies_original_password() -> TestResult {
        let hash = hash_password("open sesame")?;

        assert!(hash.starts_with("$argon2"), "unexpected hash format {hash}");
        assert!(verify_password("open sesame", &hash)?);

        Ok(())
    }

    #[test]
    fn hash_rejects_other_password() -> TestResult {
        let hash = hash_password("open sesame")?;

        assert!(!verify_password("open barley", &hash)?);

        Ok(())
    }

    #[test]
    fn same_password_hashes_differently() -> TestResult {
        assert_ne!(hash_password("pw")?, hash_password("pw")?);

        Ok(())
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let result = verify_password("pw", "plaintext");

        assert!(
            matches!(result, Err(AccountsServiceError::PasswordHash(_))),
            "expected PasswordHash error, got {result:?}"
        );
    }
}
