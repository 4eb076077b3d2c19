//! Catalog item operations.

use tracing::instrument;

use game_harbor_core::{CategoryId, ItemId};

use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Item, ItemInput};

/// Client for the `/item` resource.
#[derive(Clone)]
pub struct ItemsClient {
    transport: Transport,
}

impl ItemsClient {
    pub(crate) const fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Fetch the full catalog.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Item>, ApiError> {
        self.transport.get_list("/item").await
    }

    /// Fetch one item.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn get(&self, id: ItemId) -> Result<Item, ApiError> {
        self.transport.get(&format!("/item/{id}")).await
    }

    /// Fetch the items of one category.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn by_category(&self, category_id: CategoryId) -> Result<Vec<Item>, ApiError> {
        self.transport
            .get_list(&format!("/item/category/{category_id}"))
            .await
    }

    /// Create an item.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn create(&self, item: &ItemInput) -> Result<(), ApiError> {
        self.transport.post_command("/item", Some(item)).await
    }

    /// Replace an item.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self, item), fields(name = %item.name))]
    pub async fn update(&self, id: ItemId, item: &ItemInput) -> Result<(), ApiError> {
        self.transport.put(&format!("/item/{id}"), item).await
    }

    /// Delete an item.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ItemId) -> Result<(), ApiError> {
        self.transport.delete(&format!("/item/{id}")).await
    }
}
