//! Accounts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::domain::accounts::models::{Account, AccountUuid};

const FIND_ACCOUNT_BY_LOGIN_SQL: &str = include_str!("sql/find_account_by_login.sql");
const ACCOUNT_EXISTS_SQL: &str = include_str!("sql/account_exists.sql");
const CREATE_ACCOUNT_SQL: &str = include_str!("sql/create_account.sql");
const GET_PASSWORD_HASH_SQL: &str = include_str!("sql/get_password_hash.sql");
const UPDATE_PASSWORD_HASH_SQL: &str = include_str!("sql/update_password_hash.sql");

/// An account row together with its stored password hash.
#[derive(Debug, Clone)]
pub(crate) struct StoredAccount {
    pub(crate) account: Account,
    pub(crate) password_hash: String,
}

/// Account fields ready for insertion, password already hashed.
#[derive(Debug, Clone)]
pub(crate) struct AccountRow<'a> {
    pub(crate) uuid: AccountUuid,
    pub(crate) email: &'a str,
    pub(crate) mobile: &'a str,
    pub(crate) business_name: &'a str,
    pub(crate) password_hash: &'a str,
}

/// Accounts are looked up before any account context exists, so this
/// repository works on the pool directly rather than inside an RLS transaction.
#[derive(Debug, Clone)]
pub(crate) struct PgAccountsRepository {
    pool: PgPool,
}

impl PgAccountsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn find_by_login(
        &self,
        login: &str,
    ) -> Result<Option<StoredAccount>, sqlx::Error> {
        query_as::<Postgres, StoredAccount>(FIND_ACCOUNT_BY_LOGIN_SQL)
            .bind(login)
            .fetch_optional(&self.pool)
            .await
    }

    pub(crate) async fn exists(&self, email: &str, mobile: &str) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(ACCOUNT_EXISTS_SQL)
            .bind(email)
            .bind(mobile)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn create_account(
        &self,
        account: AccountRow<'_>,
    ) -> Result<Account, sqlx::Error> {
        query_as::<Postgres, Account>(CREATE_ACCOUNT_SQL)
            .bind(account.uuid.into_uuid())
            .bind(account.email)
            .bind(account.mobile)
            .bind(account.business_name)
            .bind(account.password_hash)
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn get_password_hash(
        &self,
        account: AccountUuid,
    ) -> Result<String, sqlx::Error> {
        query_scalar::<Postgres, String>(GET_PASSWORD_HASH_SQL)
            .bind(account.into_uuid())
            .fetch_one(&self.pool)
            .await
    }

    pub(crate) async fn update_password_hash(
        &self,
        account: AccountUuid,
        password_hash: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_PASSWORD_HASH_SQL)
            .bind(account.into_uuid())
            .bind(password_hash)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Account {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: AccountUuid::from_uuid(row.try_get::<Uuid, _>("uuid")?),
            email: row.try_get("email")?,
            mobile: row.try_get("mobile")?,
            business_name: row.try_get("business_name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for StoredAccount {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            account: Account::from_row(row)?,
            password_hash: row.try_get("password_hash")?,
        })
    }
}
