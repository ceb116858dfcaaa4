//! Session
//!
//! Everything one logged-in operator works with: the account, its catalog,
//! the cart being billed and any stock updates that still have to reach the
//! store.

use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{info, warn};
use viyaabhaaram::{
    cart::{Cart, CartError},
    reconciliation::{PendingAdjustment, ReconciliationReport},
};

use crate::{
    catalog::Catalog,
    domain::{
        accounts::models::Account,
        items::{
            ItemsService, ItemsServiceError,
            models::{Item, ItemUuid, NewItem},
        },
    },
};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("item {0} is not in the catalog")]
    UnknownItem(ItemUuid),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Items(#[from] ItemsServiceError),
}

#[derive(Debug)]
pub struct Session {
    account: Account,
    currency: &'static Currency,
    catalog: Catalog,
    cart: Cart<'static>,
    pending: Vec<PendingAdjustment>,
}

impl Session {
    /// Start a session for an authenticated account, loading its catalog.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemsServiceError`] if the catalog cannot be loaded.
    pub async fn start(
        account: Account,
        currency: &'static Currency,
        items: &dyn ItemsService,
    ) -> Result<Self, ItemsServiceError> {
        let catalog = Catalog::load(items, account.uuid).await?;

        info!(
            account = %account.uuid,
            items = catalog.len(),
            "session started"
        );

        Ok(Self {
            account,
            currency,
            catalog,
            cart: Cart::new(currency),
            pending: Vec::new(),
        })
    }

    /// End the session, handing back stock updates that never reached the store.
    pub fn end(self) -> Vec<PendingAdjustment> {
        for pending in &self.pending {
            warn!(
                account = %self.account.uuid,
                item = %pending.adjustment.item,
                qty = pending.adjustment.qty,
                attempts = pending.attempts,
                reason = %pending.reason,
                "session ended with unapplied stock update"
            );
        }

        info!(account = %self.account.uuid, "session ended");

        self.pending
    }

    /// Add one unit of a catalog item to the cart.
    ///
    /// # Errors
    ///
    /// - [`SessionError::UnknownItem`]: the item is not in the catalog.
    /// - [`SessionError::Cart`]: the cart rejected the unit, e.g. stock exhausted.
    pub fn add_to_cart(&mut self, item: ItemUuid) -> Result<u32, SessionError> {
        let record = self
            .catalog
            .get(item)
            .ok_or(SessionError::UnknownItem(item))?;

        let sale_item = record.to_sale_item(self.currency)?;

        Ok(self.cart.add_line(&sale_item)?)
    }

    /// Create an item in the store and prepend it to the catalog.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemsServiceError`] if validation or the store write fails.
    pub async fn add_item(
        &mut self,
        items: &dyn ItemsService,
        item: NewItem,
    ) -> Result<Item, ItemsServiceError> {
        let created = items.create_item(self.account.uuid, item).await?;

        self.catalog.prepend(created.clone());

        Ok(created)
    }

    /// Delete an item from the store, then from the catalog and cart.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemsServiceError`] if the store delete fails; local state
    /// is unchanged in that case.
    pub async fn delete_item(
        &mut self,
        items: &dyn ItemsService,
        item: ItemUuid,
    ) -> Result<(), ItemsServiceError> {
        items.delete_item(self.account.uuid, item).await?;

        self.catalog.remove(item);

        // A missing cart line is fine here.
        let _removed = self.cart.remove_line(item.into_uuid());

        Ok(())
    }

    /// Overwrite an item's stock in the store and catalog.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemsServiceError`] if the store update fails.
    pub async fn set_stock(
        &mut self,
        items: &dyn ItemsService,
        item: ItemUuid,
        stock: u32,
    ) -> Result<Item, ItemsServiceError> {
        let updated = items.set_stock(self.account.uuid, item, stock).await?;

        if !self.catalog.replace(updated.clone()) {
            self.catalog.prepend(updated.clone());
        }

        Ok(updated)
    }

    /// Patch the catalog with applied stock values and keep failures pending.
    pub(crate) fn apply_report(&mut self, report: &ReconciliationReport) {
        for applied in report.applied() {
            self.catalog
                .apply_stock(ItemUuid::from_uuid(applied.adjustment.item), applied.stock);
        }

        self.pending.extend(report.pending().iter().cloned());
    }

    pub(crate) fn take_pending(&mut self) -> Vec<PendingAdjustment> {
        std::mem::take(&mut self.pending)
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn cart(&self) -> &Cart<'static> {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart<'static> {
        &mut self.cart
    }

    /// Stock updates from earlier checkouts still waiting to be applied.
    pub fn pending(&self) -> &[PendingAdjustment] {
        &self.pending
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;
    use testresult::TestResult;

    use crate::{
        domain::items::MockItemsService,
        test::helpers::{account, item},
    };

    use super::*;

    async fn session_with(items: Vec<Item>) -> Result<Session, ItemsServiceError> {
        let mut service = MockItemsService::new();

        service
            .expect_list_items()
            .once()
            .return_once(move |_| Ok(items));

        Session::start(account(), INR, &service).await
    }

    #[tokio::test]
    async fn start_loads_catalog_and_empty_cart() -> TestResult {
        let session = session_with(vec![item("Rice", 100, 5)]).await?;

        assert_eq!(session.catalog().len(), 1);
        assert!(session.cart().is_empty());
        assert!(session.pending().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn add_to_cart_respects_catalog_stock() -> TestResult {
        let dal = item("Dal", 50, 1);
        let mut session = session_with(vec![dal.clone()]).await?;

        assert_eq!(session.add_to_cart(dal.uuid)?, 1);

        let result = session.add_to_cart(dal.uuid);

        assert!(
            matches!(result, Err(SessionError::Cart(CartError::StockExceeded { .. }))),
            "expected StockExceeded, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_to_cart_rejects_unknown_item() -> TestResult {
        let mut session = session_with(Vec::new()).await?;

        let result = session.add_to_cart(ItemUuid::new());

        assert!(
            matches!(result, Err(SessionError::UnknownItem(_))),
            "expected UnknownItem, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_item_prepends_created_item() -> TestResult {
        let mut session = session_with(vec![item("Rice", 100, 5)]).await?;
        let created = item("Oil", 250, 3);
        let returned = created.clone();

        let mut service = MockItemsService::new();

        service
            .expect_create_item()
            .once()
            .return_once(move |_, _| Ok(returned));

        session
            .add_item(&service, NewItem::new("Oil", 250, 3))
            .await?;

        assert_eq!(
            session.catalog().items().first().map(|item| item.uuid),
            Some(created.uuid)
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_item_removes_catalog_entry_and_cart_line() -> TestResult {
        let rice = item("Rice", 100, 5);
        let mut session = session_with(vec![rice.clone()]).await?;

        session.add_to_cart(rice.uuid)?;

        let mut service = MockItemsService::new();

        service
            .expect_delete_item()
            .once()
            .withf(move |_, uuid| *uuid == rice.uuid)
            .return_once(|_, _| Ok(()));

        session.delete_item(&service, rice.uuid).await?;

        assert!(session.catalog().is_empty());
        assert!(session.cart().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn failed_delete_leaves_state_untouched() -> TestResult {
        let rice = item("Rice", 100, 5);
        let mut session = session_with(vec![rice.clone()]).await?;

        let mut service = MockItemsService::new();

        service
            .expect_delete_item()
            .once()
            .return_once(|_, _| Err(ItemsServiceError::NotFound));

        let result = session.delete_item(&service, rice.uuid).await;

        assert!(result.is_err(), "expected delete to fail");
        assert_eq!(session.catalog().len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn set_stock_updates_catalog() -> TestResult {
        let rice = item("Rice", 100, 5);
        let mut session = session_with(vec![rice.clone()]).await?;
        let updated = Item {
            stock: 12,
            ..rice.clone()
        };

        let mut service = MockItemsService::new();

        service
            .expect_set_stock()
            .once()
            .withf(|_, _, stock| *stock == 12)
            .return_once(move |_, _, _| Ok(updated));

        session.set_stock(&service, rice.uuid, 12).await?;

        assert_eq!(session.catalog().get(rice.uuid).map(|item| item.stock), Some(12));

        Ok(())
    }
}
