//! Cart document store.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use mockall::automock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        amounts::{to_db_amount, try_get_amount},
        carts::{
            data::CartFilter,
            errors::CartsServiceError,
            models::{Address, Cart, CartStatus, LineItem},
        },
    },
};

const GET_CART_SQL: &str = include_str!("sql/get_cart.sql");
const SAVE_CART_SQL: &str = include_str!("sql/save_cart.sql");
const LIST_CARTS_SQL: &str = include_str!("sql/list_carts.sql");
const COUNT_CARTS_SQL: &str = include_str!("sql/count_carts.sql");

/// Durable cart storage: lookup, filtered listing, and whole-document upsert.
#[automock]
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Load one cart by its public identifier.
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Cart, CartsServiceError>;

    /// One page of carts matching `filter`, newest first, plus the total
    /// match count.
    async fn find_by_filter(
        &self,
        filter: CartFilter,
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<Cart>, u64), CartsServiceError>;

    /// Insert or fully replace the cart document.
    ///
    /// The write only applies while the stored revision still matches
    /// `cart.revision`; a stale save fails with `ConcurrentModification`
    /// instead of silently winning.
    async fn save(&self, cart: Cart) -> Result<Cart, CartsServiceError>;
}

#[derive(Debug, Clone)]
pub struct PgCartStore {
    db: Db,
}

impl PgCartStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Cart, CartsServiceError> {
        let cart = query_as::<Postgres, Cart>(GET_CART_SQL)
            .bind(uuid)
            .fetch_one(self.db.pool())
            .await?;

        Ok(cart)
    }

    async fn find_by_filter(
        &self,
        filter: CartFilter,
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<Cart>, u64), CartsServiceError> {
        let status = filter.status.map(CartStatus::as_str);
        let created_from = filter.created_from()?.map(SqlxTimestamp::from);
        let created_until = filter.created_until()?.map(SqlxTimestamp::from);
        let offset = i64::from(page.saturating_sub(1)) * i64::from(page_size);

        let mut tx = self.db.begin_transaction().await?;

        let (total,): (i64,) = query_as(COUNT_CARTS_SQL)
            .bind(status)
            .bind(created_from)
            .bind(created_until)
            .bind(filter.name.as_deref())
            .bind(filter.phone_number.as_deref())
            .fetch_one(&mut *tx)
            .await?;

        let carts = query_as::<Postgres, Cart>(LIST_CARTS_SQL)
            .bind(status)
            .bind(created_from)
            .bind(created_until)
            .bind(filter.name.as_deref())
            .bind(filter.phone_number.as_deref())
            .bind(i64::from(page_size))
            .bind(offset)
            .fetch_all(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok((carts, u64::try_from(total).unwrap_or_default()))
    }

    async fn save(&self, cart: Cart) -> Result<Cart, CartsServiceError> {
        let line_items = serde_json::to_value(&cart.line_items)?;
        let shipping_address = cart
            .shipping_address
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;
        let billing_address = cart
            .billing_address
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;

        let saved = query_as::<Postgres, Cart>(SAVE_CART_SQL)
            .bind(cart.uuid)
            .bind(cart.status.as_str())
            .bind(line_items)
            .bind(to_db_amount(cart.total_value, "total_value")?)
            .bind(to_db_amount(cart.total_discount, "total_discount")?)
            .bind(cart.customer_name.as_deref())
            .bind(cart.customer_phone.as_deref())
            .bind(cart.order_number.as_deref())
            .bind(shipping_address)
            .bind(billing_address)
            .bind(cart.revision)
            .fetch_optional(self.db.pool())
            .await?;

        saved.ok_or(CartsServiceError::ConcurrentModification)
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status_raw: String = row.try_get("status")?;
        let status = status_raw
            .parse::<CartStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            status,
            line_items: try_get_json::<Vec<LineItem>>(row, "line_items")?,
            total_value: try_get_amount(row, "total_value")?,
            total_discount: try_get_amount(row, "total_discount")?,
            customer_name: row.try_get("customer_name")?,
            customer_phone: row.try_get("customer_phone")?,
            order_number: row.try_get("order_number")?,
            shipping_address: try_get_optional_json::<Address>(row, "shipping_address")?,
            billing_address: try_get_optional_json::<Address>(row, "billing_address")?,
            revision: row.try_get("revision")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn try_get_json<T: DeserializeOwned>(row: &PgRow, col: &str) -> Result<T, sqlx::Error> {
    let value: Value = row.try_get(col)?;

    serde_json::from_value(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn try_get_optional_json<T: DeserializeOwned>(
    row: &PgRow,
    col: &str,
) -> Result<Option<T>, sqlx::Error> {
    let value: Option<Value> = row.try_get(col)?;

    value
        .map(|value| {
            serde_json::from_value(value).map_err(|e| sqlx::Error::ColumnDecode {
                index: col.to_string(),
                source: Box::new(e),
            })
        })
        .transpose()
}
