//! Game Harbor client SDK.
//!
//! Typed access to the Game Harbor storefront REST backend: a shared
//! transport with uniform error classification, one thin client per backend
//! resource, the persisted session model, and the derived view state (cart
//! badge, role-gated navigation) that shells build on.
//!
//! # Architecture
//!
//! - The backend is the source of truth - every mutation is followed by a
//!   re-fetch, nothing is cached client-side
//! - All requests funnel through [`Transport`], which attaches the bearer
//!   token, classifies failures, and logs every exchange
//! - Session state lives behind the [`SessionStore`] port so shells and
//!   tests can swap storage
//! - No retries, no offline mode, no request cancellation beyond the
//!   generation guard in [`Synchronizer`]
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use game_harbor_client::{ClientConfig, GameHarborApi, MemoryStore};
//! use game_harbor_core::Role;
//!
//! let config = ClientConfig::from_env()?;
//! let api = GameHarborApi::new(&config, Arc::new(MemoryStore::new()));
//!
//! let session = api.auth.login(&email, "password", Role::Client).await?;
//! let cart = api.cart.get(client_id).await?;
//! let badge = api.sync.refresh().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod error;
pub mod resources;
pub mod session;
pub mod transport;
pub mod types;
pub mod view_state;

use std::sync::Arc;

pub use auth::{AuthError, AuthService, IdentityError};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ListResultExt};
pub use session::{FileStore, Identity, MemoryStore, Session, SessionStore, StoreError};
pub use transport::{AuthSink, Outcome, Transport};
pub use view_state::{AdminDashboard, NavLink, NavState, Synchronizer};

use resources::{
    AdminsClient, CartClient, CategoriesClient, ClientsClient, ItemsClient, OrdersClient,
};

/// One assembled client for the whole backend surface.
///
/// Owns a single [`Transport`]; the per-resource clients, the auth service,
/// and the synchronizer all share it (and its session store).
#[derive(Clone)]
pub struct GameHarborApi {
    transport: Transport,
    /// Catalog items.
    pub items: ItemsClient,
    /// Catalog categories.
    pub categories: CategoriesClient,
    /// Customer directory.
    pub clients: ClientsClient,
    /// Admin directory.
    pub admins: AdminsClient,
    /// Orders and checkout.
    pub orders: OrdersClient,
    /// Cart snapshots and mutations.
    pub cart: CartClient,
    /// Login, logout, identity resolution.
    pub auth: AuthService,
    /// Cart badge and navigation state.
    pub sync: Synchronizer,
}

impl GameHarborApi {
    /// Assemble a client against the configured backend.
    #[must_use]
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Self {
        let transport = Transport::new(config, store);
        let cart = CartClient::new(transport.clone());
        Self {
            items: ItemsClient::new(transport.clone()),
            categories: CategoriesClient::new(transport.clone()),
            clients: ClientsClient::new(transport.clone()),
            admins: AdminsClient::new(transport.clone()),
            orders: OrdersClient::new(transport.clone()),
            cart: cart.clone(),
            auth: AuthService::new(transport.clone()),
            sync: Synchronizer::new(cart, transport.store()),
            transport,
        }
    }

    /// Register the sink notified when the session ends (401 or logout).
    pub fn set_auth_sink(&self, sink: Arc<dyn AuthSink>) {
        self.transport.set_auth_sink(sink);
    }

    /// Fetch the console dashboard: every collection, all-or-nothing.
    ///
    /// # Errors
    ///
    /// Fails with the first [`ApiError`] of the joint fetch.
    pub async fn admin_dashboard(&self) -> Result<AdminDashboard, ApiError> {
        AdminDashboard::fetch(
            &self.items,
            &self.orders,
            &self.clients,
            &self.categories,
            &self.admins,
        )
        .await
    }
}
