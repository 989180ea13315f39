//! Catalog Models

use uuid::Uuid;

/// Product data as resolved from the catalog at a single point in time.
///
/// This is what gets copied into a cart line; later catalog edits do not
/// propagate into snapshots already taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSnapshot {
    pub id: Uuid,
    pub key: String,
    pub title: String,
    pub price: u64,
    pub discounted_price: Option<u64>,
    pub primary_image_url: String,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub key: String,
    pub title: String,
    pub price: u64,
    pub discounted_price: Option<u64>,
    pub primary_image_url: String,
}
