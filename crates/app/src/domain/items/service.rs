//! Items service.

use async_trait::async_trait;
use mockall::automock;
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        accounts::models::AccountUuid,
        items::{
            errors::ItemsServiceError,
            models::{Item, ItemUuid, NewItem, StockDecrement},
            repository::PgItemsRepository,
        },
        transactions::models::TransactionUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgItemsService {
    db: Db,
    repository: PgItemsRepository,
}

impl PgItemsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgItemsRepository::new(),
        }
    }
}

#[async_trait]
impl ItemsService for PgItemsService {
    async fn list_items(&self, account: AccountUuid) -> Result<Vec<Item>, ItemsServiceError> {
        let mut tx = self.db.begin_account_transaction(account).await?;

        let items = self.repository.list_items(&mut tx, account).await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn get_item(
        &self,
        account: AccountUuid,
        item: ItemUuid,
    ) -> Result<Item, ItemsServiceError> {
        let mut tx = self.db.begin_account_transaction(account).await?;

        let item = self.repository.get_item(&mut tx, account, item).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn create_item(
        &self,
        account: AccountUuid,
        item: NewItem,
    ) -> Result<Item, ItemsServiceError> {
        item.validate()?;

        let mut tx = self.db.begin_account_transaction(account).await?;

        let created = self.repository.create_item(&mut tx, account, &item).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn set_stock(
        &self,
        account: AccountUuid,
        item: ItemUuid,
        stock: u32,
    ) -> Result<Item, ItemsServiceError> {
        let mut tx = self.db.begin_account_transaction(account).await?;

        let updated = self
            .repository
            .set_stock(&mut tx, account, item, stock)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn decrement_stock(
        &self,
        account: AccountUuid,
        sale: TransactionUuid,
        item: ItemUuid,
        qty: u32,
    ) -> Result<StockDecrement, ItemsServiceError> {
        let mut tx = self.db.begin_account_transaction(account).await?;

        if let Some(recorded) = self
            .repository
            .find_stock_movement(&mut tx, account, sale, item)
            .await?
        {
            tx.commit().await?;

            debug!(
                item = %item,
                sale = %sale,
                stock = recorded.stock,
                "stock already decremented for sale"
            );

            return Ok(recorded);
        }

        let decrement = self
            .repository
            .decrement_stock(&mut tx, account, item, qty)
            .await?;

        self.repository
            .create_stock_movement(&mut tx, account, sale, qty, &decrement)
            .await?;

        tx.commit().await?;

        debug!(
            item = %item,
            sale = %sale,
            qty,
            previous_stock = decrement.previous_stock,
            stock = decrement.stock,
            "decremented stock"
        );

        Ok(decrement)
    }

    async fn delete_item(
        &self,
        account: AccountUuid,
        item: ItemUuid,
    ) -> Result<(), ItemsServiceError> {
        let mut tx = self.db.begin_account_transaction(account).await?;

        let rows_affected = self.repository.delete_item(&mut tx, account, item).await?;

        if rows_affected == 0 {
            return Err(ItemsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ItemsService: Send + Sync {
    /// Retrieves the account's items, newest first.
    async fn list_items(&self, account: AccountUuid) -> Result<Vec<Item>, ItemsServiceError>;

    /// Retrieve a single item.
    async fn get_item(&self, account: AccountUuid, item: ItemUuid)
    -> Result<Item, ItemsServiceError>;

    /// Creates an item owned by the account.
    async fn create_item(
        &self,
        account: AccountUuid,
        item: NewItem,
    ) -> Result<Item, ItemsServiceError>;

    /// Overwrites an item's stock.
    async fn set_stock(
        &self,
        account: AccountUuid,
        item: ItemUuid,
        stock: u32,
    ) -> Result<Item, ItemsServiceError>;

    /// Atomically subtracts `qty` from an item's stock, flooring at zero.
    ///
    /// At most one decrement is applied per `sale` and item. Repeating the
    /// call returns the recorded result without touching stock again.
    async fn decrement_stock(
        &self,
        account: AccountUuid,
        sale: TransactionUuid,
        item: ItemUuid,
        qty: u32,
    ) -> Result<StockDecrement, ItemsServiceError>;

    /// Deletes an item.
    async fn delete_item(&self, account: AccountUuid, item: ItemUuid)
    -> Result<(), ItemsServiceError>;
}
