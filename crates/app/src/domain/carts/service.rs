//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    carts::{
        data::{AddItem, CartFilter, CartPage, Checkout, MAX_LINE_QUANTITY, PAGE_SIZE},
        errors::CartsServiceError,
        models::{Cart, CartStatus},
        store::CartStore,
    },
    catalog::ProductCatalog,
    sequences::SequenceCounter,
};

/// Counter minting order numbers.
const ORDER_NUMBER_SEQUENCE: &str = "order_number";

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Set the quantity of a product in a cart, creating the cart when no
    /// identifier is supplied. Returns the full resulting cart so callers can
    /// reconcile optimistic client-side state.
    async fn add_to_cart(&self, add: AddItem) -> Result<Cart, CartsServiceError>;

    /// Retrieve a single cart, including its derived totals.
    async fn get_cart(&self, uuid: Uuid) -> Result<Cart, CartsServiceError>;

    /// Capture addresses, mint an order number, and move an `OPEN` cart to
    /// `PLACED`. Not idempotent: a second checkout fails.
    async fn checkout(&self, uuid: Uuid, checkout: Checkout) -> Result<Cart, CartsServiceError>;

    /// One page of carts matching the filters, newest first.
    async fn list_carts(&self, filter: CartFilter, page: u32)
    -> Result<CartPage, CartsServiceError>;

    /// Mark a `PLACED` cart as `SHIPPED`. Idempotent for carts already
    /// `SHIPPED`.
    async fn dispatch(&self, uuid: Uuid) -> Result<Cart, CartsServiceError>;
}

/// `CartsService` over injected store, catalog, and sequence collaborators.
#[derive(Clone)]
pub struct DefaultCartsService {
    store: Arc<dyn CartStore>,
    catalog: Arc<dyn ProductCatalog>,
    sequences: Arc<dyn SequenceCounter>,
}

impl DefaultCartsService {
    #[must_use]
    pub fn new(
        store: Arc<dyn CartStore>,
        catalog: Arc<dyn ProductCatalog>,
        sequences: Arc<dyn SequenceCounter>,
    ) -> Self {
        Self {
            store,
            catalog,
            sequences,
        }
    }
}

#[async_trait]
impl CartsService for DefaultCartsService {
    async fn add_to_cart(&self, add: AddItem) -> Result<Cart, CartsServiceError> {
        if add.quantity > MAX_LINE_QUANTITY {
            return Err(CartsServiceError::InvalidQuantity);
        }

        // Snapshot the product once, up front; the copy taken here is what
        // the line item keeps.
        let snapshot = self.catalog.find_active_by_key(&add.product_key).await?;

        let mut cart = match add.cart_uuid {
            Some(uuid) => {
                let cart = self.store.find_by_uuid(uuid).await?;

                // Only browsing carts are addressable for writes; anything
                // further along the lifecycle is invisible here.
                if cart.status != CartStatus::Open {
                    return Err(CartsServiceError::NotFound);
                }

                cart
            }
            None => Cart::new(),
        };

        cart.apply_line_item(snapshot, add.quantity);

        self.store.save(cart).await
    }

    async fn get_cart(&self, uuid: Uuid) -> Result<Cart, CartsServiceError> {
        self.store.find_by_uuid(uuid).await
    }

    async fn checkout(&self, uuid: Uuid, checkout: Checkout) -> Result<Cart, CartsServiceError> {
        let mut errors = checkout.shipping_address.validate("shipping_address");

        if let Some(billing) = &checkout.billing_address {
            errors.extend(billing.validate("billing_address"));
        }

        if !errors.is_empty() {
            return Err(CartsServiceError::InvalidAddress(errors));
        }

        let mut cart = self.store.find_by_uuid(uuid).await?;

        if cart.status != CartStatus::Open {
            return Err(CartsServiceError::InvalidState(
                "cart must be OPEN to check out",
            ));
        }

        let next = self.sequences.get_and_increment(ORDER_NUMBER_SEQUENCE).await?;
        let order_number = format!("ORD-{next}");

        info!("placing cart {} as order {order_number}", cart.uuid);

        cart.place(
            checkout.shipping_address,
            checkout.billing_address,
            order_number,
        );

        self.store.save(cart).await
    }

    async fn list_carts(
        &self,
        filter: CartFilter,
        page: u32,
    ) -> Result<CartPage, CartsServiceError> {
        let page = page.max(1);

        let (carts, total) = self.store.find_by_filter(filter, page, PAGE_SIZE).await?;

        let pages = u32::try_from(total.div_ceil(u64::from(PAGE_SIZE))).unwrap_or(u32::MAX);

        Ok(CartPage {
            carts,
            page,
            page_size: PAGE_SIZE,
            total,
            pages,
        })
    }

    async fn dispatch(&self, uuid: Uuid) -> Result<Cart, CartsServiceError> {
        let mut cart = self.store.find_by_uuid(uuid).await?;

        match cart.status {
            // Re-dispatching a shipped cart is a no-op.
            CartStatus::Shipped => Ok(cart),
            CartStatus::Placed => {
                info!("dispatching cart {}", cart.uuid);

                cart.mark_shipped();

                self.store.save(cart).await
            }
            CartStatus::Open | CartStatus::Checkout | CartStatus::Failed => {
                Err(CartsServiceError::InvalidState(
                    "cart must be PLACED before it can be shipped",
                ))
            }
        }
    }
}
