//! Catalog
//!
//! The session's local view of an account's items. It is loaded once, patched
//! with the results of the session's own writes, and re-fetched on demand. When
//! the local view and the store disagree the store wins.

use tracing::warn;

use crate::domain::{
    accounts::models::AccountUuid,
    items::{
        ItemsService, ItemsServiceError,
        models::{Item, ItemUuid},
    },
};

/// A difference between the local catalog and the store found on refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockDiscrepancy {
    pub item: ItemUuid,
    pub name: String,

    /// Stock held locally, `None` if the item was unknown locally.
    pub local: Option<u32>,

    /// Stock held by the store, `None` if the store no longer has the item.
    pub store: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Build a catalog ordered newest first, ties broken by descending uuid.
    #[must_use]
    pub fn from_items(mut items: Vec<Item>) -> Self {
        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.uuid.cmp(&a.uuid))
        });

        Self { items }
    }

    /// Load every item owned by `account`.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemsServiceError`] if the store read fails.
    pub async fn load(
        items: &dyn ItemsService,
        account: AccountUuid,
    ) -> Result<Self, ItemsServiceError> {
        Ok(Self::from_items(items.list_items(account).await?))
    }

    /// Re-fetch from the store and replace the local view.
    ///
    /// Returns every item whose local stock differed from the store, including
    /// items present on only one side. The local view is left untouched if the
    /// read fails.
    ///
    /// # Errors
    ///
    /// Returns an [`ItemsServiceError`] if the store read fails.
    pub async fn refresh(
        &mut self,
        items: &dyn ItemsService,
        account: AccountUuid,
    ) -> Result<Vec<StockDiscrepancy>, ItemsServiceError> {
        let fresh = Self::load(items, account).await?;

        let mut discrepancies: Vec<StockDiscrepancy> = fresh
            .items
            .iter()
            .filter_map(|item| {
                let local = self.get(item.uuid).map(|local| local.stock);

                (local != Some(item.stock)).then(|| StockDiscrepancy {
                    item: item.uuid,
                    name: item.name.clone(),
                    local,
                    store: Some(item.stock),
                })
            })
            .collect();

        discrepancies.extend(
            self.items
                .iter()
                .filter(|item| fresh.get(item.uuid).is_none())
                .map(|item| StockDiscrepancy {
                    item: item.uuid,
                    name: item.name.clone(),
                    local: Some(item.stock),
                    store: None,
                }),
        );

        for discrepancy in &discrepancies {
            warn!(
                item = %discrepancy.item,
                name = %discrepancy.name,
                local = ?discrepancy.local,
                store = ?discrepancy.store,
                "catalog differed from store; using store value"
            );
        }

        *self = fresh;

        Ok(discrepancies)
    }

    /// Insert a newly created item at the front.
    pub fn prepend(&mut self, item: Item) {
        self.items.insert(0, item);
    }

    /// Replace an item with a newer copy of the same record.
    pub fn replace(&mut self, item: Item) -> bool {
        match self.items.iter_mut().find(|local| local.uuid == item.uuid) {
            Some(local) => {
                *local = item;

                true
            }
            None => false,
        }
    }

    /// Remove an item, returning it if it was present.
    pub fn remove(&mut self, uuid: ItemUuid) -> Option<Item> {
        let index = self.items.iter().position(|item| item.uuid == uuid)?;

        Some(self.items.remove(index))
    }

    /// Apply a stock value reported by the store. Returns false for unknown items.
    pub fn apply_stock(&mut self, uuid: ItemUuid, stock: u32) -> bool {
        match self.items.iter_mut().find(|item| item.uuid == uuid) {
            Some(item) => {
                item.stock = stock;

                true
            }
            None => false,
        }
    }

    pub fn get(&self, uuid: ItemUuid) -> Option<&Item> {
        self.items.iter().find(|item| item.uuid == uuid)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items whose name contains `term`, ignoring case. A blank term matches everything.
    pub fn search<'c>(&'c self, term: &str) -> impl Iterator<Item = &'c Item> + 'c {
        let needle = term.trim().to_lowercase();

        self.items
            .iter()
            .filter(move |item| item.name.to_lowercase().contains(&needle))
    }

    /// `Σ price * stock` in minor units, or `None` on overflow.
    pub fn inventory_value(&self) -> Option<u64> {
        self.items.iter().try_fold(0_u64, |acc, item| {
            item.price
                .checked_mul(u64::from(item.stock))?
                .checked_add(acc)
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::items::MockItemsService, test::helpers::item};

    use super::*;

    #[test]
    fn from_items_orders_newest_first() {
        let older = item("Older", 100, 1);
        let newer = item("Newer", 100, 1);

        let catalog = Catalog::from_items(vec![older.clone(), newer.clone()]);

        let names: Vec<_> = catalog.items().iter().map(|item| item.name.as_str()).collect();

        assert_eq!(names, vec!["Newer", "Older"]);
    }

    #[test]
    fn prepend_puts_new_item_first() {
        let mut catalog = Catalog::from_items(vec![item("Rice", 100, 5)]);

        catalog.prepend(item("Dal", 50, 1));

        assert_eq!(catalog.items().first().map(|item| item.name.as_str()), Some("Dal"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn apply_stock_and_remove() {
        let rice = item("Rice", 100, 5);
        let mut catalog = Catalog::from_items(vec![rice.clone()]);

        assert!(catalog.apply_stock(rice.uuid, 1));
        assert_eq!(catalog.get(rice.uuid).map(|item| item.stock), Some(1));
        assert!(!catalog.apply_stock(ItemUuid::new(), 1));

        assert!(catalog.remove(rice.uuid).is_some());
        assert!(catalog.is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog =
            Catalog::from_items(vec![item("Basmati Rice", 100, 5), item("Toor Dal", 50, 1)]);

        let found: Vec<_> = catalog.search("rice").map(|item| item.name.as_str()).collect();

        assert_eq!(found, vec!["Basmati Rice"]);
        assert_eq!(catalog.search("  ").count(), 2);
    }

    #[test]
    fn inventory_value_sums_price_times_stock() {
        let catalog = Catalog::from_items(vec![item("Rice", 100, 5), item("Dal", 50, 2)]);

        assert_eq!(catalog.inventory_value(), Some(600));
        assert_eq!(Catalog::default().inventory_value(), Some(0));
    }

    #[test]
    fn inventory_value_overflow_is_none() {
        let catalog = Catalog::from_items(vec![item("Gold", u64::MAX, 2)]);

        assert_eq!(catalog.inventory_value(), None);
    }

    #[tokio::test]
    async fn refresh_prefers_store_and_reports_discrepancies() -> TestResult {
        let account = AccountUuid::new();
        let rice = item("Rice", 100, 5);
        let dal = item("Dal", 50, 2);
        let gone = item("Gone", 10, 1);

        let mut catalog = Catalog::from_items(vec![rice.clone(), dal.clone(), gone.clone()]);
        catalog.apply_stock(rice.uuid, 1);

        let store_rice = Item {
            stock: 0,
            ..rice.clone()
        };
        let store_items = vec![store_rice, dal.clone()];

        let mut items = MockItemsService::new();

        items
            .expect_list_items()
            .once()
            .withf(move |a| *a == account)
            .return_once(move |_| Ok(store_items));

        let discrepancies = catalog.refresh(&items, account).await?;

        assert_eq!(discrepancies.len(), 2);
        assert!(discrepancies.contains(&StockDiscrepancy {
            item: rice.uuid,
            name: "Rice".to_string(),
            local: Some(1),
            store: Some(0),
        }));
        assert!(discrepancies.contains(&StockDiscrepancy {
            item: gone.uuid,
            name: "Gone".to_string(),
            local: Some(1),
            store: None,
        }));
        assert_eq!(catalog.get(rice.uuid).map(|item| item.stock), Some(0));
        assert!(catalog.get(gone.uuid).is_none());

        Ok(())
    }

    #[tokio::test]
    async fn failed_refresh_keeps_local_view() {
        let account = AccountUuid::new();
        let rice = item("Rice", 100, 5);
        let mut catalog = Catalog::from_items(vec![rice.clone()]);

        let mut items = MockItemsService::new();

        items
            .expect_list_items()
            .once()
            .return_once(|_| Err(ItemsServiceError::InvalidData));

        let result = catalog.refresh(&items, account).await;

        assert!(result.is_err(), "expected refresh to fail");
        assert_eq!(catalog.get(rice.uuid).map(|item| item.stock), Some(5));
    }
}
