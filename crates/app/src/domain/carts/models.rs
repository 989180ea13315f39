//! Cart Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{carts::errors::FieldError, catalog::models::ProductSnapshot};

/// Cart lifecycle states.
///
/// `Checkout` and `Failed` are declared for forward compatibility; no
/// operation currently transitions into them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartStatus {
    Open,
    Checkout,
    Placed,
    Failed,
    Shipped,
}

impl CartStatus {
    /// Storage/wire spelling of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Checkout => "CHECKOUT",
            Self::Placed => "PLACED",
            Self::Failed => "FAILED",
            Self::Shipped => "SHIPPED",
        }
    }
}

impl fmt::Display for CartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cart status {0:?}")]
pub struct ParseCartStatusError(String);

impl FromStr for CartStatus {
    type Err = ParseCartStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(Self::Open),
            "CHECKOUT" => Ok(Self::Checkout),
            "PLACED" => Ok(Self::Placed),
            "FAILED" => Ok(Self::Failed),
            "SHIPPED" => Ok(Self::Shipped),
            other => Err(ParseCartStatusError(other.to_string())),
        }
    }
}

/// One product entry in a cart: a frozen catalog snapshot plus a quantity.
///
/// Prices are copied from the catalog when the line is first added and never
/// refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Opaque catalog row identifier.
    pub product_ref: Uuid,
    /// Public catalog identifier; the match key for add/update calls.
    pub product_key: String,
    pub title: String,
    /// Unit price in minor currency units at time of add.
    pub unit_price: u64,
    /// Discounted unit price at time of add, `<= unit_price` when present.
    pub unit_discounted_price: Option<u64>,
    pub quantity: u32,
    pub primary_image_url: String,
}

impl LineItem {
    fn from_snapshot(snapshot: ProductSnapshot, quantity: u32) -> Self {
        Self {
            product_ref: snapshot.id,
            product_key: snapshot.key,
            title: snapshot.title,
            unit_price: snapshot.price,
            unit_discounted_price: snapshot.discounted_price,
            quantity,
            primary_image_url: snapshot.primary_image_url,
        }
    }

    /// Unit price after any discount.
    #[must_use]
    pub fn effective_unit_price(&self) -> u64 {
        self.unit_discounted_price.unwrap_or(self.unit_price)
    }

    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_value(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }

    /// Discount across the whole line.
    #[must_use]
    pub fn line_discount(&self) -> u64 {
        self.unit_price
            .saturating_sub(self.effective_unit_price())
            .saturating_mul(u64::from(self.quantity))
    }
}

/// Postal address captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub landmark: Option<String>,
    /// 6-digit postal code.
    pub pincode: String,
    pub city: String,
    pub state: String,
    /// Delivery post office.
    pub office: String,
}

impl Address {
    /// Collect validation failures, prefixing field paths with `prefix`.
    #[must_use]
    pub fn validate(&self, prefix: &str) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if self.address_line1.trim().is_empty() {
            errors.push(FieldError::new(
                format!("{prefix}.address_line1"),
                "address line 1 is required",
            ));
        }

        if self.pincode.len() != 6 || !self.pincode.bytes().all(|b| b.is_ascii_digit()) {
            errors.push(FieldError::new(
                format!("{prefix}.pincode"),
                "pincode must be a 6-digit number",
            ));
        }

        if self.city.trim().is_empty() {
            errors.push(FieldError::new(format!("{prefix}.city"), "city is required"));
        }

        if self.state.trim().is_empty() {
            errors.push(FieldError::new(
                format!("{prefix}.state"),
                "state is required",
            ));
        }

        if self.office.trim().is_empty() {
            errors.push(FieldError::new(
                format!("{prefix}.office"),
                "post office is required",
            ));
        }

        errors
    }
}

/// Cart Model
///
/// The root aggregate: line items, derived monetary totals, lifecycle status,
/// and the address/order data attached at checkout. `total_value` and
/// `total_discount` are recomputed by every mutation that touches the line
/// items; `final_total` and `total_item_count` are derived on read and never
/// stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub uuid: Uuid,
    pub status: CartStatus,
    pub line_items: Vec<LineItem>,
    pub total_value: u64,
    pub total_discount: u64,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub order_number: Option<String>,
    pub shipping_address: Option<Address>,
    pub billing_address: Option<Address>,
    /// Optimistic concurrency token; bumped by the store on every save.
    pub revision: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Cart {
    /// Fresh mutable cart with no line items.
    #[must_use]
    pub fn new() -> Self {
        let now = Timestamp::now();

        Self {
            uuid: Uuid::now_v7(),
            status: CartStatus::Open,
            line_items: Vec::new(),
            total_value: 0,
            total_discount: 0,
            customer_name: None,
            customer_phone: None,
            order_number: None,
            shipping_address: None,
            billing_address: None,
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sum of quantities across line items.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.line_items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Payable total after discount.
    #[must_use]
    pub fn final_total(&self) -> u64 {
        self.total_value.saturating_sub(self.total_discount)
    }

    /// Set the absolute quantity for a product, appending a freshly
    /// snapshotted line when the product is not in the cart yet.
    ///
    /// Quantity zero removes the line, or does nothing when the product is
    /// absent. An existing line keeps its stored snapshot; only the quantity
    /// changes.
    pub fn apply_line_item(&mut self, snapshot: ProductSnapshot, quantity: u32) {
        let existing = self
            .line_items
            .iter()
            .position(|item| item.product_key == snapshot.key);

        match existing {
            Some(index) if quantity == 0 => {
                self.line_items.remove(index);
            }
            Some(index) => {
                if let Some(item) = self.line_items.get_mut(index) {
                    item.quantity = quantity;
                }
            }
            None if quantity > 0 => {
                self.line_items
                    .push(LineItem::from_snapshot(snapshot, quantity));
            }
            None => {}
        }

        self.recompute_totals();
    }

    /// Attach checkout data and move to `Placed`.
    ///
    /// Billing falls back to a copy of the shipping address when omitted; the
    /// shipper's name and phone number are copied onto the cart. Status
    /// preconditions are the caller's responsibility.
    pub fn place(&mut self, shipping: Address, billing: Option<Address>, order_number: String) {
        self.customer_name = shipping.name.clone();
        self.customer_phone = shipping.phone_number.clone();
        self.billing_address = Some(billing.unwrap_or_else(|| shipping.clone()));
        self.shipping_address = Some(shipping);
        self.status = CartStatus::Placed;
        self.order_number = Some(order_number);
        self.updated_at = Timestamp::now();
    }

    /// Move to `Shipped`.
    pub fn mark_shipped(&mut self) {
        self.status = CartStatus::Shipped;
        self.updated_at = Timestamp::now();
    }

    fn recompute_totals(&mut self) {
        self.total_value = self.line_items.iter().map(LineItem::line_value).sum();
        self.total_discount = self.line_items.iter().map(LineItem::line_discount).sum();
        self.updated_at = Timestamp::now();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}
