//! Order operations.

use tracing::instrument;

use game_harbor_core::{ClientId, OrderId, OrderStatus};

use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{CartItemInput, Order, PaymentRequest, StatusUpdate};

/// Client for the `/order` resource.
#[derive(Clone)]
pub struct OrdersClient {
    transport: Transport,
}

impl OrdersClient {
    pub(crate) const fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Fetch every order (console view).
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Order>, ApiError> {
        self.transport.get_list("/order").await
    }

    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn get(&self, id: OrderId) -> Result<Order, ApiError> {
        self.transport.get(&format!("/order/{id}")).await
    }

    /// Fetch the orders of one customer.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn for_client(&self, client_id: ClientId) -> Result<Vec<Order>, ApiError> {
        self.transport
            .get_list(&format!("/order/client/{client_id}"))
            .await
    }

    /// Create an order directly from item lines, bypassing the cart.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self, items), fields(lines = items.len()))]
    pub async fn create(
        &self,
        client_id: ClientId,
        items: &[CartItemInput],
    ) -> Result<Order, ApiError> {
        self.transport
            .post(&format!("/order/{client_id}"), &items)
            .await
    }

    /// Turn the customer's current cart into an order.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn checkout(&self, client_id: ClientId) -> Result<Order, ApiError> {
        self.transport
            .post_empty(&format!("/order/{client_id}/checkout"))
            .await
    }

    /// Record a payment against an order, returning the updated order.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self, payment))]
    pub async fn pay(&self, id: OrderId, payment: &PaymentRequest) -> Result<Order, ApiError> {
        self.transport
            .post(&format!("/order/{id}/payment"), payment)
            .await
    }

    /// Request a status transition.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn set_status(&self, id: OrderId, status: OrderStatus) -> Result<(), ApiError> {
        self.transport
            .put(&format!("/order/{id}/status"), &StatusUpdate { status })
            .await
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: OrderId) -> Result<(), ApiError> {
        self.transport.delete(&format!("/order/{id}")).await
    }
}
