//! Accounts service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::domain::accounts::{
    errors::AccountsServiceError,
    models::{Account, AccountUuid, Credentials, NewAccount},
    password::{hash_password, verify_password},
    repository::{AccountRow, PgAccountsRepository},
};

#[derive(Debug, Clone)]
pub struct PgAccountsService {
    repository: PgAccountsRepository,
}

impl PgAccountsService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAccountsRepository::new(pool),
        }
    }
}

#[async_trait]
impl AccountsService for PgAccountsService {
    async fn register(&self, account: NewAccount) -> Result<Account, AccountsServiceError> {
        account.validate()?;

        let email = account.email.trim();
        let mobile = account.mobile.trim();

        if self.repository.exists(email, mobile).await? {
            return Err(AccountsServiceError::DuplicateAccount);
        }

        let password_hash = hash_password(&account.password)?;

        let created = self
            .repository
            .create_account(AccountRow {
                uuid: AccountUuid::new(),
                email,
                mobile,
                business_name: account.business_name.trim(),
                password_hash: &password_hash,
            })
            .await?;

        info!(account = %created.uuid, "registered account");

        Ok(created)
    }

    async fn login(&self, credentials: Credentials) -> Result<Account, AccountsServiceError> {
        let Some(stored) = self
            .repository
            .find_by_login(credentials.login.trim())
            .await?
        else {
            warn!("login attempt for unknown account");

            return Err(AccountsServiceError::InvalidCredentials);
        };

        if !verify_password(&credentials.password, &stored.password_hash)? {
            warn!(account = %stored.account.uuid, "login attempt with wrong password");

            return Err(AccountsServiceError::InvalidCredentials);
        }

        Ok(stored.account)
    }

    async fn update_credential(
        &self,
        account: AccountUuid,
        current_password: String,
        new_password: String,
    ) -> Result<(), AccountsServiceError> {
        if new_password.trim().is_empty() {
            return Err(AccountsServiceError::Validation(
                "password is required".to_string(),
            ));
        }

        let stored_hash = self.repository.get_password_hash(account).await?;

        if !verify_password(&current_password, &stored_hash)? {
            return Err(AccountsServiceError::InvalidCredentials);
        }

        let password_hash = hash_password(&new_password)?;

        let rows_affected = self
            .repository
            .update_password_hash(account, &password_hash)
            .await?;

        if rows_affected == 0 {
            return Err(AccountsServiceError::NotFound);
        }

        info!(account = %account, "updated account password");

        Ok(())
    }
}

#[automock]
#[async_trait]
/// Account persistence and authentication.
pub trait AccountsService: Send + Sync {
    /// Creates a merchant account after checking email and mobile are unused.
    async fn register(&self, account: NewAccount) -> Result<Account, AccountsServiceError>;

    /// Authenticates by email or mobile number and password.
    async fn login(&self, credentials: Credentials) -> Result<Account, AccountsServiceError>;

    /// Replaces the password after verifying the current one.
    async fn update_credential(
        &self,
        account: AccountUuid,
        current_password: String,
        new_password: String,
    ) -> Result<(), AccountsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn new_account(email: &str, mobile: &str) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            mobile: mobile.to_string(),
            business_name: "Corner Store".to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn register_then_login_by_email_and_mobile() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .accounts
            .register(new_account("a@example.com", "1111111111"))
            .await?;

        for login in ["a@example.com", "A@Example.com", "1111111111"] {
            let account = ctx
                .accounts
                .login(Credentials {
                    login: login.to_string(),
                    password: "secret".to_string(),
                })
                .await?;

            assert_eq!(account.uuid, created.uuid);
        }

        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email_or_mobile() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.accounts
            .register(new_account("dup@example.com", "2222222222"))
            .await?;

        for duplicate in [
            new_account("dup@example.com", "3333333333"),
            new_account("other@example.com", "2222222222"),
        ] {
            let result = ctx.accounts.register(duplicate).await;

            assert!(
                matches!(result, Err(AccountsServiceError::DuplicateAccount)),
                "expected DuplicateAccount, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn login_with_wrong_password_or_unknown_login_fails() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.accounts
            .register(new_account("b@example.com", "4444444444"))
            .await?;

        for (login, password) in [("b@example.com", "wrong"), ("nobody@example.com", "secret")] {
            let result = ctx
                .accounts
                .login(Credentials {
                    login: login.to_string(),
                    password: password.to_string(),
                })
                .await;

            assert!(
                matches!(result, Err(AccountsServiceError::InvalidCredentials)),
                "expected InvalidCredentials, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_login_value_held_in_other_column() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.accounts
            .register(new_account("owner@shop.example", "6666666666"))
            .await?;

        let result = ctx
            .accounts
            .register(new_account("other@shop.example", "owner@shop.example"))
            .await;

        assert!(
            matches!(result, Err(AccountsServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn email_login_prefers_the_email_owner() -> TestResult {
        let ctx = TestContext::new().await;

        let owner = ctx
            .accounts
            .register(new_account("owner@shop.example", "7777777777"))
            .await?;

        // A row written before mobile numbers were validated.
        sqlx::query(
            "INSERT INTO accounts (uuid, email, mobile, business_name, password_hash) \
             VALUES ($1, 'legacy@shop.example', 'owner@shop.example', 'Legacy', 'x')",
        )
        .bind(AccountUuid::new().into_uuid())
        .execute(ctx.db.pool())
        .await?;

        let account = ctx
            .accounts
            .login(Credentials {
                login: "owner@shop.example".to_string(),
                password: "secret".to_string(),
            })
            .await?;

        assert_eq!(account.uuid, owner.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn update_credential_replaces_password() -> TestResult {
        let ctx = TestContext::new().await;

        let account = ctx
            .accounts
            .register(new_account("c@example.com", "5555555555"))
            .await?;

        ctx.accounts
            .update_credential(account.uuid, "secret".to_string(), "changed".to_string())
            .await?;

        let old = ctx
            .accounts
            .login(Credentials {
                login: "c@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await;

        assert!(
            matches!(old, Err(AccountsServiceError::InvalidCredentials)),
            "expected old password to fail, got {old:?}"
        );

        ctx.accounts
            .login(Credentials {
                login: "c@example.com".to_string(),
                password: "changed".to_string(),
            })
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn update_credential_requires_current_password() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .accounts
            .update_credential(
                ctx.account.uuid,
                "not the password".to_string(),
                "changed".to_string(),
            )
            .await;

        assert!(
            matches!(result, Err(AccountsServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }
}
