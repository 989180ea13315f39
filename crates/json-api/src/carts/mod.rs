//! Carts HTTP surface.

use salvo::Router;

use crate::auth;

pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod responses;

/// Cart routes.
///
/// Shopper-facing operations are public; the listing and dispatch used by the
/// order dashboard sit behind the admin token.
pub(crate) fn router() -> Router {
    Router::with_path("carts")
        .push(Router::with_path("items").post(handlers::add_item::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .get(handlers::index::handler),
        )
        .push(
            Router::with_path("{cart}")
                .get(handlers::get::handler)
                .push(Router::with_path("checkout").post(handlers::checkout::handler))
                .push(
                    Router::with_path("dispatch")
                        .hoop(auth::middleware::handler)
                        .post(handlers::dispatch::handler),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        prelude::*,
        test::TestClient,
    };
    use testresult::TestResult;
    use uuid::Uuid;

    use verdant_app::domain::carts::{data::CartPage, service::MockCartsService};

    use crate::test_helpers::{TEST_ADMIN_TOKEN, make_cart, make_state};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        let router = Router::new().hoop(inject(make_state(carts))).push(router());

        Service::new(router)
    }

    #[tokio::test]
    async fn test_listing_requires_the_admin_token() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_list_carts().never();

        let res = TestClient::get("http://example.com/carts")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_listing_succeeds_with_the_admin_token() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_list_carts().once().return_once(|_, _| {
            Ok(CartPage {
                carts: Vec::new(),
                page: 1,
                page_size: 10,
                total: 0,
                pages: 0,
            })
        });

        let res = TestClient::get("http://example.com/carts")
            .add_header(AUTHORIZATION, format!("Bearer {TEST_ADMIN_TOKEN}"), true)
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_dispatch_requires_the_admin_token() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_dispatch().never();

        let res = TestClient::post(format!(
            "http://example.com/carts/{}/dispatch",
            Uuid::now_v7()
        ))
        .send(&make_service(carts))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_cart_is_public() -> TestResult {
        let uuid = Uuid::now_v7();
        let cart = make_cart(uuid);

        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .return_once(move |_| Ok(cart));

        let res = TestClient::get(format!("http://example.com/carts/{uuid}"))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
