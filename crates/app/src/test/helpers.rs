//! Test Helpers

use jiff::Timestamp;

use crate::domain::{
    accounts::models::{Account, AccountUuid},
    items::models::{DEFAULT_CATEGORY, Item, ItemUuid},
};

/// An account record as returned by a successful login.
pub(crate) fn account() -> Account {
    Account {
        uuid: AccountUuid::new(),
        email: "owner@example.com".to_string(),
        mobile: "9000000000".to_string(),
        business_name: "Test Store".to_string(),
        created_at: Timestamp::now(),
        updated_at: Timestamp::now(),
    }
}

/// A stored item record. Later calls produce newer records.
pub(crate) fn item(name: &str, price: u64, stock: u32) -> Item {
    let now = Timestamp::now();

    Item {
        uuid: ItemUuid::new(),
        name: name.to_string(),
        price,
        stock,
        category: DEFAULT_CATEGORY.to_string(),
        image: None,
        sizes: Vec::new(),
        colors: Vec::new(),
        description: None,
        created_at: now,
        updated_at: now,
    }
}
