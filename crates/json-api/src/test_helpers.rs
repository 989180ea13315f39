//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use verdant_app::{
    context::AppContext,
    domain::carts::{
        models::{Address, Cart, CartStatus, LineItem},
        service::MockCartsService,
    },
};

use crate::{carts::responses::AddressPayload, state::State};

pub(crate) const TEST_ADMIN_TOKEN: &str = "test-admin-token";

pub(crate) fn make_state(carts: MockCartsService) -> Arc<State> {
    Arc::new(State::new(
        AppContext {
            carts: Arc::new(carts),
        },
        TEST_ADMIN_TOKEN.to_string(),
    ))
}

/// Build a service with the mock wired into the given router.
pub(crate) fn carts_service(carts: MockCartsService, router: Router) -> Service {
    let state = make_state(carts);

    Service::new(Router::new().hoop(inject(state)).push(router))
}

/// An `OPEN` cart with one discounted line item.
pub(crate) fn make_cart(uuid: Uuid) -> Cart {
    let mut cart = Cart::new();

    cart.uuid = uuid;
    cart.line_items = vec![LineItem {
        product_ref: Uuid::now_v7(),
        product_key: "sku-1".to_string(),
        title: "Product sku-1".to_string(),
        unit_price: 150,
        unit_discounted_price: Some(100),
        quantity: 2,
        primary_image_url: "https://cdn.example.com/sku-1.jpg".to_string(),
    }];
    cart.total_value = 300;
    cart.total_discount = 100;
    cart.revision = 1;

    cart
}

pub(crate) fn make_placed_cart(uuid: Uuid) -> Cart {
    let mut cart = make_cart(uuid);

    cart.place(make_address(), None, "ORD-1".to_string());
    cart.revision = 2;

    cart
}

pub(crate) fn make_shipped_cart(uuid: Uuid) -> Cart {
    let mut cart = make_placed_cart(uuid);

    cart.mark_shipped();
    cart.revision = 3;

    cart
}

pub(crate) fn make_address() -> Address {
    Address {
        name: Some("Asha Rao".to_string()),
        phone_number: Some("9876543210".to_string()),
        address_line1: "12 Rose Street".to_string(),
        address_line2: None,
        landmark: None,
        pincode: "560001".to_string(),
        city: "Bengaluru".to_string(),
        state: "Karnataka".to_string(),
        office: "MG Road".to_string(),
    }
}

pub(crate) fn make_address_payload() -> AddressPayload {
    AddressPayload::from(make_address())
}
