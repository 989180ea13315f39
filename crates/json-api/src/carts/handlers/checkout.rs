//! Checkout Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use verdant_app::domain::carts::data::Checkout;

use crate::{
    carts::{
        errors::into_status_error,
        responses::{AddressPayload, CartResponse},
    },
    extensions::*,
    state::State,
};

/// Checkout Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutRequest {
    pub shipping_address: AddressPayload,

    /// Defaults to the shipping address when omitted
    pub billing_address: Option<AddressPayload>,
}

impl From<CheckoutRequest> for Checkout {
    fn from(request: CheckoutRequest) -> Self {
        Checkout {
            shipping_address: request.shipping_address.into(),
            billing_address: request.billing_address.map(Into::into),
        }
    }
}

/// Checkout Handler
///
/// Moves an `OPEN` cart to `PLACED`, attaching the addresses and a freshly
/// minted order number. Not idempotent.
#[endpoint(
    tags("carts"),
    summary = "Checkout Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart placed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart is not open"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid address"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    json: JsonBody<CheckoutRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let cart = state
        .app
        .carts
        .checkout(cart.into_inner(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use verdant_app::domain::carts::{
        CartsServiceError, errors::FieldError, models::CartStatus, service::MockCartsService,
    };

    use crate::test_helpers::{carts_service, make_address_payload, make_placed_cart};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(
            carts,
            Router::with_path("carts/{cart}/checkout").post(handler),
        )
    }

    #[tokio::test]
    async fn test_checkout_returns_placed_cart() -> TestResult {
        let uuid = Uuid::now_v7();
        let cart = make_placed_cart(uuid);

        let mut carts = MockCartsService::new();

        carts
            .expect_checkout()
            .once()
            .withf(move |u, checkout| {
                *u == uuid
                    && checkout.billing_address.is_none()
                    && checkout.shipping_address.city == "Bengaluru"
            })
            .return_once(move |_, _| Ok(cart));

        let mut res = TestClient::post(format!("http://example.com/carts/{uuid}/checkout"))
            .json(&json!({ "shipping_address": make_address_payload() }))
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, CartStatus::Placed.to_string());
        assert_eq!(body.order_number.as_deref(), Some("ORD-1"));
        assert!(body.shipping_address.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_forwards_billing_address() -> TestResult {
        let uuid = Uuid::now_v7();
        let cart = make_placed_cart(uuid);

        let mut carts = MockCartsService::new();

        carts
            .expect_checkout()
            .once()
            .withf(|_, checkout| {
                checkout
                    .billing_address
                    .as_ref()
                    .is_some_and(|billing| billing.city == "Mysuru")
            })
            .return_once(move |_, _| Ok(cart));

        let mut billing = make_address_payload();
        billing.city = "Mysuru".to_string();

        let res = TestClient::post(format!("http://example.com/carts/{uuid}/checkout"))
            .json(&json!({
                "shipping_address": make_address_payload(),
                "billing_address": billing,
            }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_missing_cart_returns_404() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_checkout()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::post(format!("http://example.com/carts/{uuid}/checkout"))
            .json(&json!({ "shipping_address": make_address_payload() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_on_placed_cart_returns_409() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_checkout()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidState("cart must be OPEN")));

        let res = TestClient::post(format!("http://example.com/carts/{uuid}/checkout"))
            .json(&json!({ "shipping_address": make_address_payload() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_invalid_address_returns_400() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts.expect_checkout().once().return_once(|_, _| {
            Err(CartsServiceError::InvalidAddress(vec![FieldError::new(
                "shipping_address.pincode",
                "pincode must be a 6-digit number",
            )]))
        });

        let mut shipping = make_address_payload();
        shipping.pincode = "12".to_string();

        let res = TestClient::post(format!("http://example.com/carts/{uuid}/checkout"))
            .json(&json!({ "shipping_address": shipping }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_checkout_without_shipping_address_returns_400() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts.expect_checkout().never();

        let res = TestClient::post(format!("http://example.com/carts/{uuid}/checkout"))
            .json(&json!({}))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
