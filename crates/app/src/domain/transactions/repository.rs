//! Transactions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, Row, Transaction as DbTransaction, postgres::PgRow, query_as, types::Json,
};
use viyaabhaaram::cart::LineSnapshot;

use crate::domain::{
    accounts::models::AccountUuid,
    transactions::models::{NewTransaction, Transaction, TransactionKind, TransactionUuid},
};

const CREATE_TRANSACTION_SQL: &str = include_str!("sql/create_transaction.sql");
const LIST_TRANSACTIONS_SQL: &str = include_str!("sql/list_transactions.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgTransactionsRepository;

impl PgTransactionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_transactions(
        &self,
        tx: &mut DbTransaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        query_as::<Postgres, Transaction>(LIST_TRANSACTIONS_SQL)
            .bind(account.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_transaction(
        &self,
        tx: &mut DbTransaction<'_, Postgres>,
        account: AccountUuid,
        transaction: &NewTransaction,
        items_data: serde_json::Value,
    ) -> Result<Transaction, sqlx::Error> {
        let amount = i64::try_from(transaction.amount).map_err(|e| sqlx::Error::ColumnDecode {
            index: "amount".to_string(),
            source: Box::new(e),
        })?;

        query_as::<Postgres, Transaction>(CREATE_TRANSACTION_SQL)
            .bind(transaction.uuid.into_uuid())
            .bind(account.into_uuid())
            .bind(transaction.kind.as_str())
            .bind(amount)
            .bind(items_data)
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Transaction {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let amount_i64: i64 = row.try_get("amount")?;

        let amount = u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
            index: "amount".to_string(),
            source: Box::new(e),
        })?;

        let kind = row
            .try_get::<&str, _>("kind")?
            .parse::<TransactionKind>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "kind".to_string(),
                source: Box::new(e),
            })?;

        let Json(items_data) = row.try_get::<Json<Vec<LineSnapshot>>, _>("items_data")?;

        Ok(Self {
            uuid: TransactionUuid::from_uuid(row.try_get("uuid")?),
            kind,
            amount,
            items_data,
            date: row.try_get::<SqlxTimestamp, _>("date")?.to_jiff(),
        })
    }
}
