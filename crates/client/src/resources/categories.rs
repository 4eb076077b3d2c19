//! Catalog category operations.

use tracing::instrument;

use game_harbor_core::CategoryId;

use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{Category, CategoryInput};

/// Client for the `/category` resource.
#[derive(Clone)]
pub struct CategoriesClient {
    transport: Transport,
}

impl CategoriesClient {
    pub(crate) const fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Fetch all categories.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        self.transport.get_list("/category").await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self, category), fields(name = %category.name))]
    pub async fn create(&self, category: &CategoryInput) -> Result<(), ApiError> {
        self.transport.post_command("/category", Some(category)).await
    }

    /// Rename a category.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self, category), fields(name = %category.name))]
    pub async fn update(&self, id: CategoryId, category: &CategoryInput) -> Result<(), ApiError> {
        self.transport.put(&format!("/category/{id}"), category).await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: CategoryId) -> Result<(), ApiError> {
        self.transport.delete(&format!("/category/{id}")).await
    }
}
