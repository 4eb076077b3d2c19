//! Session manager: login, logout, and identity resolution.
//!
//! The backend's login endpoint answers a bare boolean and issues no
//! identity of its own, so a successful login is followed by a secondary
//! directory lookup that resolves the numeric id and display name for the
//! email (see [`AuthService::resolve_identity`]). That lookup is inherently
//! racy against concurrent directory changes; when no record matches, the
//! session is still persisted as authenticated but without an identity.
//! This degraded state is a known weakness of the backend contract, not a
//! designed fallback - the proper fix is a whoami-style endpoint.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};

use game_harbor_core::{Email, Role};

use crate::error::ApiError;
use crate::session::{self, Identity, Session, SessionStore, StoreError};
use crate::transport::Transport;
use crate::types::{AdminAccount, ClientAccount, LoginRequest};

/// Errors surfaced by [`AuthService::login`].
///
/// Bad credentials and transport failures are distinct: earlier revisions of
/// this client collapsed both into a bare `false`, which made a typo
/// indistinguishable from an outage.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the email/password/role combination.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The login or directory call failed at the transport level.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The session could not be persisted. No partial session remains.
    #[error("session store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors surfaced by [`AuthService::resolve_identity`].
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No directory record carries the email.
    #[error("no {role} directory record matches {email}")]
    NotFound {
        /// Directory that was scanned.
        role: Role,
        /// Email that had no match.
        email: Email,
    },

    /// The directory fetch failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Login state and identity operations over the persisted session.
#[derive(Clone)]
pub struct AuthService {
    transport: Transport,
    store: Arc<dyn SessionStore>,
}

impl AuthService {
    /// Create a service bound to the transport's session store.
    #[must_use]
    pub fn new(transport: Transport) -> Self {
        let store = transport.store();
        Self { transport, store }
    }

    /// Authenticate and persist the session.
    ///
    /// On success the session carries the identity resolved from the
    /// directory, or no identity when no record matched the email (degraded
    /// state, persisted anyway). The session is written once, after
    /// resolution, so a failure at any point leaves the store logged out
    /// rather than partially written.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] when the backend rejects the
    /// credentials; [`AuthError::Api`] when the login call or the directory
    /// lookup fails at the transport level; [`AuthError::Store`] when the
    /// session cannot be persisted.
    #[instrument(skip(self, password), fields(email = %email, role = %role))]
    pub async fn login(
        &self,
        email: &Email,
        password: &str,
        role: Role,
    ) -> Result<Session, AuthError> {
        let request = LoginRequest {
            email: email.clone(),
            password: password.to_string(),
            user_type: role,
        };

        let authenticated: bool = self
            .transport
            .post("/api/login", &request)
            .await
            .map_err(classify_login_error)?;

        if !authenticated {
            return Err(AuthError::InvalidCredentials);
        }

        let identity = match self.resolve_identity(email, role).await {
            Ok(identity) => Some(identity),
            Err(IdentityError::NotFound { .. }) => {
                warn!("login succeeded but no directory record matches, session degraded");
                None
            }
            Err(IdentityError::Api(e)) => return Err(e.into()),
        };

        let session = Session {
            email: email.clone(),
            role,
            identity,
            token: None,
        };
        session.persist(self.store.as_ref())?;

        info!("login succeeded");
        Ok(session)
    }

    /// Resolve the numeric identity and display name for an email.
    ///
    /// Scans the full client or admin directory for an exact email match.
    /// Ideally the backend would expose this directly; until it does, this
    /// method is the one place that owns the scan.
    ///
    /// # Errors
    ///
    /// [`IdentityError::NotFound`] when no record matches,
    /// [`IdentityError::Api`] when the directory fetch fails.
    pub async fn resolve_identity(
        &self,
        email: &Email,
        role: Role,
    ) -> Result<Identity, IdentityError> {
        let identity = match role {
            Role::Client => {
                let clients: Vec<ClientAccount> = self.transport.get_list("/client").await?;
                clients
                    .into_iter()
                    .find(|c| c.email == *email)
                    .map(|c| Identity::Client {
                        id: c.id,
                        name: c.name,
                    })
            }
            Role::Admin => {
                let admins: Vec<AdminAccount> = self.transport.get_list("/admin").await?;
                admins
                    .into_iter()
                    .find(|a| a.email == *email)
                    .map(|a| Identity::Admin {
                        id: a.id,
                        name: a.name,
                    })
            }
        };

        identity.ok_or_else(|| IdentityError::NotFound {
            role,
            email: email.clone(),
        })
    }

    /// Destroy the session and send the shell back to its login entry point.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a key cannot be removed; the sink is
    /// notified regardless.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), StoreError> {
        let result = session::clear(self.store.as_ref());
        self.transport.notify_redirect_to_login();
        info!("logged out");
        result
    }

    /// Whether a session is currently persisted.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        Session::load(self.store.as_ref()).is_some()
    }

    /// Role of the persisted session, if any.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        Session::load(self.store.as_ref()).map(|s| s.role)
    }

    /// The persisted session, if any.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        Session::load(self.store.as_ref())
    }
}

/// Map a failed login call onto the auth contract.
///
/// Auth-shaped rejections (401/403 and other 4xx) mean the backend looked at
/// the credentials and said no. Everything else is an operational failure
/// and keeps its transport classification.
fn classify_login_error(error: ApiError) -> AuthError {
    match error {
        ApiError::AuthRequired | ApiError::Forbidden => AuthError::InvalidCredentials,
        ApiError::RequestFailed { status, .. } if (400..500).contains(&status) => {
            AuthError::InvalidCredentials
        }
        other => AuthError::Api(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth_shaped_rejections() {
        assert!(matches!(
            classify_login_error(ApiError::AuthRequired),
            AuthError::InvalidCredentials
        ));
        assert!(matches!(
            classify_login_error(ApiError::RequestFailed {
                status: 422,
                message: String::new(),
            }),
            AuthError::InvalidCredentials
        ));
    }

    #[test]
    fn test_classify_server_failures_stay_api_errors() {
        let err = classify_login_error(ApiError::RequestFailed {
            status: 503,
            message: "down".to_string(),
        });
        assert!(matches!(
            err,
            AuthError::Api(ApiError::RequestFailed { status: 503, .. })
        ));
    }
}
