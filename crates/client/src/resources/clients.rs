//! Customer account operations.

use tracing::instrument;

use game_harbor_core::ClientId;

use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{ClientAccount, ClientInput};

/// Client for the `/client` resource (the customer directory).
#[derive(Clone)]
pub struct ClientsClient {
    transport: Transport,
}

impl ClientsClient {
    pub(crate) const fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Fetch the full customer directory.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ClientAccount>, ApiError> {
        self.transport.get_list("/client").await
    }

    /// Fetch one customer record.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn get(&self, id: ClientId) -> Result<ClientAccount, ApiError> {
        self.transport.get(&format!("/client/{id}")).await
    }

    /// Register a new customer account.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self, client), fields(email = %client.email))]
    pub async fn register(&self, client: &ClientInput) -> Result<(), ApiError> {
        self.transport.post_command("/client", Some(client)).await
    }

    /// Update a customer account.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self, client), fields(email = %client.email))]
    pub async fn update(&self, id: ClientId, client: &ClientInput) -> Result<(), ApiError> {
        self.transport.put(&format!("/client/{id}"), client).await
    }

    /// Delete a customer account.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: ClientId) -> Result<(), ApiError> {
        self.transport.delete(&format!("/client/{id}")).await
    }
}
