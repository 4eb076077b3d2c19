//! Cart operations.

use tracing::{debug, instrument};

use game_harbor_core::{ClientId, ItemId};

use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{CartItemInput, CartSnapshot, QuantityUpdate};

/// Client for the `/cart` resource.
#[derive(Clone)]
pub struct CartClient {
    transport: Transport,
}

impl CartClient {
    pub(crate) const fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Fetch the current cart snapshot for a customer.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn get(&self, client_id: ClientId) -> Result<CartSnapshot, ApiError> {
        self.transport.get(&format!("/cart/{client_id}")).await
    }

    /// Add an item to the cart, returning the updated snapshot.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        client_id: ClientId,
        item_id: ItemId,
        quantity: u32,
    ) -> Result<CartSnapshot, ApiError> {
        let input = CartItemInput { item_id, quantity };
        self.transport
            .post(&format!("/cart/{client_id}/items"), &input)
            .await
    }

    /// Set the quantity of a cart line.
    ///
    /// A quantity of zero routes to [`Self::remove_item`]: the backend never
    /// sees a zero-quantity line item.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        client_id: ClientId,
        item_id: ItemId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        if quantity == 0 {
            debug!("quantity reduced to zero, removing line");
            return self.remove_item(client_id, item_id).await;
        }
        self.transport
            .put(
                &format!("/cart/{client_id}/items/{item_id}"),
                &QuantityUpdate { quantity },
            )
            .await
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn remove_item(&self, client_id: ClientId, item_id: ItemId) -> Result<(), ApiError> {
        self.transport
            .delete(&format!("/cart/{client_id}/items/{item_id}"))
            .await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn clear(&self, client_id: ClientId) -> Result<(), ApiError> {
        self.transport.delete(&format!("/cart/{client_id}")).await
    }
}
