//! Shared cart payloads.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use verdant_app::domain::carts::{
    data::CartPage,
    models::{Address, Cart, LineItem},
};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// Lifecycle status
    pub status: String,

    /// The items in the cart
    pub line_items: Vec<LineItemResponse>,

    /// Sum of `unit_price × quantity` over the items, in minor units
    pub total_value: u64,

    /// Sum of per-line discounts, in minor units
    pub total_discount: u64,

    /// Payable total after discount; derived, never stored
    pub final_total: u64,

    /// Sum of quantities; derived, never stored
    pub total_item_count: u64,

    pub customer_name: Option<String>,

    pub customer_phone: Option<String>,

    /// Order number assigned at checkout, `ORD-<n>`
    pub order_number: Option<String>,

    pub shipping_address: Option<AddressPayload>,

    pub billing_address: Option<AddressPayload>,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let final_total = cart.final_total();
        let total_item_count = cart.total_item_count();

        Self {
            uuid: cart.uuid,
            status: cart.status.to_string(),
            line_items: cart
                .line_items
                .into_iter()
                .map(LineItemResponse::from)
                .collect(),
            total_value: cart.total_value,
            total_discount: cart.total_discount,
            final_total,
            total_item_count,
            customer_name: cart.customer_name,
            customer_phone: cart.customer_phone,
            order_number: cart.order_number,
            shipping_address: cart.shipping_address.map(AddressPayload::from),
            billing_address: cart.billing_address.map(AddressPayload::from),
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Line Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LineItemResponse {
    /// Opaque catalog identifier of the snapshotted product
    pub product_ref: Uuid,

    /// Public product key
    pub product_key: String,

    /// Title at time of add
    pub title: String,

    /// Unit price at time of add, in minor units
    pub unit_price: u64,

    /// Discounted unit price at time of add, in minor units
    pub unit_discounted_price: Option<u64>,

    pub quantity: u32,

    /// Primary image URL at time of add
    pub primary_image_url: String,
}

impl From<LineItem> for LineItemResponse {
    fn from(item: LineItem) -> Self {
        Self {
            product_ref: item.product_ref,
            product_key: item.product_key,
            title: item.title,
            unit_price: item.unit_price,
            unit_discounted_price: item.unit_discounted_price,
            quantity: item.quantity,
            primary_image_url: item.primary_image_url,
        }
    }
}

/// Address payload, used in both requests and responses.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressPayload {
    pub name: Option<String>,

    pub phone_number: Option<String>,

    pub address_line1: String,

    pub address_line2: Option<String>,

    pub landmark: Option<String>,

    /// 6-digit postal code
    pub pincode: String,

    pub city: String,

    pub state: String,

    /// Delivery post office
    pub office: String,
}

impl From<Address> for AddressPayload {
    fn from(address: Address) -> Self {
        Self {
            name: address.name,
            phone_number: address.phone_number,
            address_line1: address.address_line1,
            address_line2: address.address_line2,
            landmark: address.landmark,
            pincode: address.pincode,
            city: address.city,
            state: address.state,
            office: address.office,
        }
    }
}

impl From<AddressPayload> for Address {
    fn from(payload: AddressPayload) -> Self {
        Self {
            name: payload.name,
            phone_number: payload.phone_number,
            address_line1: payload.address_line1,
            address_line2: payload.address_line2,
            landmark: payload.landmark,
            pincode: payload.pincode,
            city: payload.city,
            state: payload.state,
            office: payload.office,
        }
    }
}

/// Cart List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartListResponse {
    pub carts: Vec<CartResponse>,

    pub pagination: PaginationResponse,
}

/// Pagination metadata
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaginationResponse {
    pub page: u32,

    pub page_size: u32,

    /// Total carts matching the filters
    pub total: u64,

    /// Total pages at this page size
    pub pages: u32,
}

impl From<CartPage> for CartListResponse {
    fn from(page: CartPage) -> Self {
        Self {
            carts: page.carts.into_iter().map(CartResponse::from).collect(),
            pagination: PaginationResponse {
                page: page.page,
                page_size: page.page_size,
                total: page.total,
                pages: page.pages,
            },
        }
    }
}
