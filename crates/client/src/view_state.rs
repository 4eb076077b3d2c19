//! Derived UI state: cart badge, role-gated navigation, console dashboard.
//!
//! The synchronizer keeps summary values consistent with the session and the
//! server cart. Shells call [`Synchronizer::refresh`] on every navigation and
//! after every cart-mutating operation; there is no debouncing, each
//! qualifying call issues exactly one fetch. Overlapping fetches are not
//! cancelled, but each one captures a generation at start and a completion
//! whose generation has been overtaken is discarded instead of clobbering
//! newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, instrument};

use game_harbor_core::Role;

use crate::error::ApiError;
use crate::resources::{
    AdminsClient, CartClient, CategoriesClient, ClientsClient, ItemsClient, OrdersClient,
};
use crate::session::{Session, SessionStore};
use crate::types::{AdminAccount, Category, ClientAccount, Item, Order};

/// Navigation affordances a shell may render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavLink {
    Home,
    Catalog,
    Cart,
    Profile,
    Console,
    Login,
    Register,
}

/// Role-gated navigation state derived from the session.
#[derive(Debug, Clone)]
pub struct NavState {
    /// Links visible to the current session, in display order.
    pub links: Vec<NavLink>,
    /// Display name of the logged-in user, when an identity is resolved;
    /// falls back to the login email.
    pub display_name: Option<String>,
    /// Cart badge count. Absent (not zero) unless the session is a client
    /// with a resolved identity and a cart fetch has completed.
    pub badge: Option<usize>,
}

impl NavState {
    /// Derive the navigation state for a session and the current badge.
    #[must_use]
    pub fn derive(session: Option<&Session>, badge: Option<usize>) -> Self {
        match session {
            None => Self {
                links: vec![NavLink::Home, NavLink::Catalog, NavLink::Login, NavLink::Register],
                display_name: None,
                badge: None,
            },
            Some(session) => {
                let display_name = Some(
                    session
                        .identity
                        .as_ref()
                        .map_or_else(|| session.email.to_string(), |i| i.name().to_string()),
                );
                match session.role {
                    Role::Client => Self {
                        links: vec![
                            NavLink::Home,
                            NavLink::Catalog,
                            NavLink::Cart,
                            NavLink::Profile,
                        ],
                        display_name,
                        badge,
                    },
                    Role::Admin => Self {
                        links: vec![NavLink::Home, NavLink::Console, NavLink::Profile],
                        display_name,
                        badge: None,
                    },
                }
            }
        }
    }
}

/// Keeps the cart badge consistent with session and server cart state.
///
/// Cheap to clone; clones share the badge and the generation counter.
#[derive(Clone)]
pub struct Synchronizer {
    cart: CartClient,
    store: Arc<dyn SessionStore>,
    generation: Arc<AtomicU64>,
    badge: Arc<Mutex<Option<usize>>>,
}

impl Synchronizer {
    pub(crate) fn new(cart: CartClient, store: Arc<dyn SessionStore>) -> Self {
        Self {
            cart,
            store,
            generation: Arc::new(AtomicU64::new(0)),
            badge: Arc::new(Mutex::new(None)),
        }
    }

    /// The badge from the most recently completed qualifying fetch.
    #[must_use]
    pub fn badge(&self) -> Option<usize> {
        self.badge.lock().map(|b| *b).unwrap_or(None)
    }

    /// Current navigation state (pure read, no fetch).
    #[must_use]
    pub fn nav(&self) -> NavState {
        NavState::derive(Session::load(self.store.as_ref()).as_ref(), self.badge())
    }

    /// Recompute the badge. Call after every navigation and cart mutation.
    ///
    /// Fetches the cart snapshot iff the session is a client with a resolved
    /// identity; otherwise the badge becomes absent without a request. A
    /// fetch overtaken by a newer refresh is discarded on completion.
    ///
    /// # Errors
    ///
    /// Fails with the transport's [`ApiError`] classification; the badge
    /// keeps its previous value, a failed fetch is not a completed one.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Option<usize>, ApiError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let client_id = Session::load(self.store.as_ref())
            .and_then(|s| s.identity)
            .and_then(|identity| identity.client_id());

        let Some(client_id) = client_id else {
            // Not a client with a resolved identity: badge suppressed.
            self.set_badge(generation, None);
            return Ok(None);
        };

        let snapshot = self.cart.get(client_id).await?;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("cart fetch overtaken by a newer refresh, discarding");
            return Ok(self.badge());
        }

        let count = snapshot.items.len();
        self.set_badge(generation, Some(count));
        Ok(Some(count))
    }

    fn set_badge(&self, generation: u64, value: Option<usize>) {
        if self.generation.load(Ordering::SeqCst) != generation {
            return;
        }
        if let Ok(mut badge) = self.badge.lock() {
            *badge = value;
        }
    }
}

/// The console landing data: one aggregate of every collection.
///
/// The five collections are fetched jointly and fail as a whole; on any
/// failure the views reset to [`AdminDashboard::empty`] rather than showing
/// partial data.
#[derive(Debug, Clone, Default)]
pub struct AdminDashboard {
    pub items: Vec<Item>,
    pub orders: Vec<Order>,
    pub clients: Vec<ClientAccount>,
    pub categories: Vec<Category>,
    pub admins: Vec<AdminAccount>,
}

impl AdminDashboard {
    /// The all-collections-empty state shown while loading or after a
    /// failed aggregate fetch.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            orders: Vec::new(),
            clients: Vec::new(),
            categories: Vec::new(),
            admins: Vec::new(),
        }
    }

    /// Fetch every collection in parallel, all-or-nothing.
    ///
    /// # Errors
    ///
    /// Fails with the first [`ApiError`] of the joint fetch; no partial
    /// dashboard is returned.
    #[instrument(skip_all)]
    pub async fn fetch(
        items: &ItemsClient,
        orders: &OrdersClient,
        clients: &ClientsClient,
        categories: &CategoriesClient,
        admins: &AdminsClient,
    ) -> Result<Self, ApiError> {
        let (items, orders, clients, categories, admins) = tokio::try_join!(
            items.list(),
            orders.list(),
            clients.list(),
            categories.list(),
            admins.list(),
        )?;
        Ok(Self {
            items,
            orders,
            clients,
            categories,
            admins,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_harbor_core::{ClientId, Email};

    use crate::session::Identity;

    fn session(role: Role, identity: Option<Identity>) -> Session {
        Session {
            email: Email::parse("a@x.com").expect("valid email"),
            role,
            identity,
            token: None,
        }
    }

    #[test]
    fn test_nav_logged_out() {
        let nav = NavState::derive(None, Some(3));
        assert!(nav.links.contains(&NavLink::Login));
        assert!(!nav.links.contains(&NavLink::Cart));
        assert!(nav.badge.is_none());
        assert!(nav.display_name.is_none());
    }

    #[test]
    fn test_nav_client_with_identity() {
        let s = session(
            Role::Client,
            Some(Identity::Client {
                id: ClientId::new(7),
                name: "Ana".to_string(),
            }),
        );
        let nav = NavState::derive(Some(&s), Some(2));
        assert!(nav.links.contains(&NavLink::Cart));
        assert_eq!(nav.badge, Some(2));
        assert_eq!(nav.display_name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_nav_degraded_client_falls_back_to_email() {
        let s = session(Role::Client, None);
        let nav = NavState::derive(Some(&s), None);
        assert_eq!(nav.display_name.as_deref(), Some("a@x.com"));
        assert!(nav.badge.is_none());
    }

    #[test]
    fn test_nav_admin_has_console_and_no_badge() {
        let s = session(Role::Admin, None);
        let nav = NavState::derive(Some(&s), Some(9));
        assert!(nav.links.contains(&NavLink::Console));
        assert!(nav.badge.is_none(), "admin sessions never show a badge");
    }

    #[test]
    fn test_empty_dashboard_has_no_rows() {
        let dash = AdminDashboard::empty();
        assert!(dash.items.is_empty());
        assert!(dash.orders.is_empty());
        assert!(dash.clients.is_empty());
        assert!(dash.categories.is_empty());
        assert!(dash.admins.is_empty());
    }
}
