//! Cart service data.

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use uuid::Uuid;

use crate::domain::carts::models::{Address, Cart, CartStatus};

/// Upper bound the boundary accepts for a single line's quantity.
pub const MAX_LINE_QUANTITY: u32 = 100;

/// Carts per listing page.
pub const PAGE_SIZE: u32 = 10;

/// Add To Cart Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItem {
    /// Existing cart to mutate; a fresh cart is created when omitted.
    pub cart_uuid: Option<Uuid>,
    /// Public product key to resolve against the catalog.
    pub product_key: String,
    /// Absolute target quantity, not a delta. Zero removes the line.
    pub quantity: u32,
}

/// Checkout Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub shipping_address: Address,
    /// Defaults to the shipping address when omitted.
    pub billing_address: Option<Address>,
}

/// Cart listing filters; all optional and conjunctive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartFilter {
    pub status: Option<CartStatus>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    /// Case-insensitive substring match on the customer name.
    pub name: Option<String>,
    /// Case-insensitive substring match on the customer phone number.
    pub phone_number: Option<String>,
}

impl CartFilter {
    /// Inclusive lower creation-time bound: midnight UTC of `start_date`.
    ///
    /// # Errors
    ///
    /// Returns an error when the date cannot be resolved to an instant.
    pub fn created_from(&self) -> Result<Option<Timestamp>, jiff::Error> {
        self.start_date
            .map(|date| Ok(date.to_zoned(TimeZone::UTC)?.timestamp()))
            .transpose()
    }

    /// Exclusive upper creation-time bound: midnight UTC of the day after
    /// `end_date`, so the whole end day is included.
    ///
    /// # Errors
    ///
    /// Returns an error when the date cannot be resolved to an instant.
    pub fn created_until(&self) -> Result<Option<Timestamp>, jiff::Error> {
        self.end_date
            .map(|date| Ok(date.tomorrow()?.to_zoned(TimeZone::UTC)?.timestamp()))
            .transpose()
    }
}

/// One page of carts plus pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CartPage {
    pub carts: Vec<Cart>,
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
    pub pages: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_date_bound_covers_the_whole_day() {
        let filter = CartFilter {
            end_date: Some(Date::constant(2026, 3, 2)),
            ..CartFilter::default()
        };

        let until = filter
            .created_until()
            .expect("bound should resolve")
            .expect("end_date is set");

        assert_eq!(until.to_string(), "2026-03-03T00:00:00Z");
    }

    #[test]
    fn unset_dates_produce_no_bounds() {
        let filter = CartFilter::default();

        assert_eq!(filter.created_from().expect("no bound"), None);
        assert_eq!(filter.created_until().expect("no bound"), None);
    }
}
