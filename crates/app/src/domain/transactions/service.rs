//! Transactions service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        accounts::models::AccountUuid,
        transactions::{
            errors::TransactionsServiceError,
            models::{NewTransaction, Transaction},
            repository::PgTransactionsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgTransactionsService {
    db: Db,
    repository: PgTransactionsRepository,
}

impl PgTransactionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgTransactionsRepository::new(),
        }
    }
}

#[async_trait]
impl TransactionsService for PgTransactionsService {
    async fn list_transactions(
        &self,
        account: AccountUuid,
    ) -> Result<Vec<Transaction>, TransactionsServiceError> {
        let mut tx = self.db.begin_account_transaction(account).await?;

        let transactions = self.repository.list_transactions(&mut tx, account).await?;

        tx.commit().await?;

        Ok(transactions)
    }

    async fn create_transaction(
        &self,
        account: AccountUuid,
        transaction: NewTransaction,
    ) -> Result<Transaction, TransactionsServiceError> {
        let items_data = serde_json::to_value(&transaction.items_data)?;

        let mut tx = self.db.begin_account_transaction(account).await?;

        let created = self
            .repository
            .create_transaction(&mut tx, account, &transaction, items_data)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait TransactionsService: Send + Sync {
    /// Retrieves the account's transactions, most recent first.
    async fn list_transactions(
        &self,
        account: AccountUuid,
    ) -> Result<Vec<Transaction>, TransactionsServiceError>;

    /// Records a transaction. The stored date is assigned by the store.
    async fn create_transaction(
        &self,
        account: AccountUuid,
        transaction: NewTransaction,
    ) -> Result<Transaction, TransactionsServiceError>;
}
