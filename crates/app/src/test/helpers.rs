//! Builders shared across service tests.

use uuid::Uuid;

use crate::domain::{carts::models::Address, catalog::models::ProductSnapshot};

pub(crate) fn make_snapshot(
    key: &str,
    price: u64,
    discounted_price: Option<u64>,
) -> ProductSnapshot {
    ProductSnapshot {
        id: Uuid::now_v7(),
        key: key.to_string(),
        title: format!("Product {key}"),
        price,
        discounted_price,
        primary_image_url: format!("https://cdn.example.com/{key}.jpg"),
    }
}

pub(crate) fn make_address() -> Address {
    Address {
        name: Some("Asha Rao".to_string()),
        phone_number: Some("9876543210".to_string()),
        address_line1: "12 Rose Street".to_string(),
        address_line2: Some("Flat 4B".to_string()),
        landmark: None,
        pincode: "560001".to_string(),
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        office: "MG Road".to_string(),
    }
}
