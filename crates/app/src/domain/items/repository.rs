//! Items Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    accounts::models::AccountUuid,
    items::models::{Item, ItemUuid, NewItem, StockDecrement},
    transactions::models::TransactionUuid,
};

const LIST_ITEMS_SQL: &str = include_str!("sql/list_items.sql");
const GET_ITEM_SQL: &str = include_str!("sql/get_item.sql");
const CREATE_ITEM_SQL: &str = include_str!("sql/create_item.sql");
const SET_ITEM_STOCK_SQL: &str = include_str!("sql/set_item_stock.sql");
const DECREMENT_ITEM_STOCK_SQL: &str = include_str!("sql/decrement_item_stock.sql");
const DELETE_ITEM_SQL: &str = include_str!("sql/delete_item.sql");
const FIND_STOCK_MOVEMENT_SQL: &str = include_str!("sql/find_stock_movement.sql");
const CREATE_STOCK_MOVEMENT_SQL: &str = include_str!("sql/create_stock_movement.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgItemsRepository;

impl PgItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
    ) -> Result<Vec<Item>, sqlx::Error> {
        query_as::<Postgres, Item>(LIST_ITEMS_SQL)
            .bind(account.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        item: ItemUuid,
    ) -> Result<Item, sqlx::Error> {
        query_as::<Postgres, Item>(GET_ITEM_SQL)
            .bind(account.into_uuid())
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        item: &NewItem,
    ) -> Result<Item, sqlx::Error> {
        let price = convert_int::<i64, _>("price", item.price)?;
        let stock = convert_int::<i32, _>("stock", item.stock)?;

        query_as::<Postgres, Item>(CREATE_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(account.into_uuid())
            .bind(item.name.trim())
            .bind(price)
            .bind(stock)
            .bind(item.category())
            .bind(item.image.as_deref())
            .bind(&item.sizes)
            .bind(&item.colors)
            .bind(item.description.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        item: ItemUuid,
        stock: u32,
    ) -> Result<Item, sqlx::Error> {
        let stock = convert_int::<i32, _>("stock", stock)?;

        query_as::<Postgres, Item>(SET_ITEM_STOCK_SQL)
            .bind(account.into_uuid())
            .bind(item.into_uuid())
            .bind(stock)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        item: ItemUuid,
        qty: u32,
    ) -> Result<StockDecrement, sqlx::Error> {
        let qty = convert_int::<i32, _>("qty", qty)?;

        let row = query(DECREMENT_ITEM_STOCK_SQL)
            .bind(account.into_uuid())
            .bind(item.into_uuid())
            .bind(qty)
            .fetch_one(&mut **tx)
            .await?;

        Ok(StockDecrement {
            item,
            previous_stock: decode_int(&row, "previous_stock")?,
            stock: decode_int(&row, "stock")?,
        })
    }

    /// The decrement already recorded for this sale and item, if any.
    pub(crate) async fn find_stock_movement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        sale: TransactionUuid,
        item: ItemUuid,
    ) -> Result<Option<StockDecrement>, sqlx::Error> {
        let row = query(FIND_STOCK_MOVEMENT_SQL)
            .bind(account.into_uuid())
            .bind(sale.into_uuid())
            .bind(item.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| -> Result<StockDecrement, sqlx::Error> {
            Ok(StockDecrement {
                item,
                previous_stock: decode_int(&row, "previous_stock")?,
                stock: decode_int(&row, "stock")?,
            })
        })
        .transpose()
    }

    pub(crate) async fn create_stock_movement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        sale: TransactionUuid,
        qty: u32,
        decrement: &StockDecrement,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_STOCK_MOVEMENT_SQL)
            .bind(sale.into_uuid())
            .bind(decrement.item.into_uuid())
            .bind(account.into_uuid())
            .bind(convert_int::<i32, _>("qty", qty)?)
            .bind(convert_int::<i32, _>("previous_stock", decrement.previous_stock)?)
            .bind(convert_int::<i32, _>("stock", decrement.stock)?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_item(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        account: AccountUuid,
        item: ItemUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ITEM_SQL)
            .bind(account.into_uuid())
            .bind(item.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn convert_int<T: TryFrom<U, Error = std::num::TryFromIntError>, U>(
    index: &str,
    value: U,
) -> Result<T, sqlx::Error> {
    T::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(e),
    })
}

fn decode_int<T: TryFrom<i32, Error = std::num::TryFromIntError>>(
    row: &PgRow,
    index: &str,
) -> Result<T, sqlx::Error> {
    let value: i32 = row.try_get(index)?;

    convert_int(index, value)
}

impl<'r> FromRow<'r, PgRow> for Item {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price_i64: i64 = row.try_get("price")?;

        Ok(Self {
            uuid: ItemUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: convert_int("price", price_i64)?,
            stock: decode_int(row, "stock")?,
            category: row.try_get("category")?,
            image: row.try_get("image")?,
            sizes: row.try_get("sizes")?,
            colors: row.try_get("colors")?,
            description: row.try_get("description")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
