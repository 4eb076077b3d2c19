//! Admin account operations.

use tracing::instrument;

use game_harbor_core::AdminId;

use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{AdminAccount, AdminInput};

/// Client for the `/admin` resource (the admin directory).
#[derive(Clone)]
pub struct AdminsClient {
    transport: Transport,
}

impl AdminsClient {
    pub(crate) const fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Fetch the full admin directory.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<AdminAccount>, ApiError> {
        self.transport.get_list("/admin").await
    }

    /// Fetch one admin record.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn get(&self, id: AdminId) -> Result<AdminAccount, ApiError> {
        self.transport.get(&format!("/admin/{id}")).await
    }

    /// Create an admin account.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self, admin), fields(email = %admin.email))]
    pub async fn create(&self, admin: &AdminInput) -> Result<(), ApiError> {
        self.transport.post_command("/admin", Some(admin)).await
    }

    /// Update an admin account.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self, admin), fields(email = %admin.email))]
    pub async fn update(&self, id: AdminId, admin: &AdminInput) -> Result<(), ApiError> {
        self.transport.put(&format!("/admin/{id}"), admin).await
    }

    /// Delete an admin account.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: AdminId) -> Result<(), ApiError> {
        self.transport.delete(&format!("/admin/{id}")).await
    }
}
