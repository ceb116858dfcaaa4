//! Database connection management

use sqlx::{PgPool, Postgres, Transaction, migrate::MigrateError, query};

use crate::domain::accounts::models::AccountUuid;

/// SQL used to set account context for row-level security.
pub const SET_ACCOUNT_CONTEXT_SQL: &str =
    "SELECT set_config('app.current_account_uuid', $1, true)";

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction and set account context for RLS policies.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting account context fails.
    pub async fn begin_account_transaction(
        &self,
        account: AccountUuid,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_ACCOUNT_CONTEXT_SQL)
            .bind(account.into_uuid().to_string())
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}
