//! Product catalog repository.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{FromRow, Postgres, Row, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        amounts::{to_db_amount, try_get_amount, try_get_optional_amount},
        catalog::{
            errors::CatalogError,
            models::{NewProduct, ProductSnapshot},
        },
    },
};

const FIND_ACTIVE_PRODUCT_SQL: &str = include_str!("sql/find_active_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");

/// Catalog lookup contract consumed by the cart operations.
#[automock]
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Resolve the current snapshot of an active product by its public key.
    async fn find_active_by_key(&self, key: &str) -> Result<ProductSnapshot, CatalogError>;
}

#[derive(Debug, Clone)]
pub struct PgProductCatalog {
    db: Db,
}

impl PgProductCatalog {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Insert a catalog row. Catalog management is not part of the API
    /// surface; this backs the provisioning CLI.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyExists` for a duplicate key, `InvalidData` when the
    /// discounted price exceeds the price.
    pub async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductSnapshot, CatalogError> {
        let price = to_db_amount(product.price, "price")?;
        let discounted_price = product
            .discounted_price
            .map(|amount| to_db_amount(amount, "discounted_price"))
            .transpose()?;

        let mut tx = self.db.begin_transaction().await?;

        let created = query_as::<Postgres, ProductSnapshot>(CREATE_PRODUCT_SQL)
            .bind(Uuid::now_v7())
            .bind(&product.key)
            .bind(&product.title)
            .bind(price)
            .bind(discounted_price)
            .bind(&product.primary_image_url)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[async_trait]
impl ProductCatalog for PgProductCatalog {
    async fn find_active_by_key(&self, key: &str) -> Result<ProductSnapshot, CatalogError> {
        let snapshot = query_as::<Postgres, ProductSnapshot>(FIND_ACTIVE_PRODUCT_SQL)
            .bind(key)
            .fetch_one(self.db.pool())
            .await?;

        Ok(snapshot)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSnapshot {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            key: row.try_get("key")?,
            title: row.try_get("title")?,
            price: try_get_amount(row, "price")?,
            discounted_price: try_get_optional_amount(row, "discounted_price")?,
            primary_image_url: row.try_get("primary_image_url")?,
        })
    }
}
