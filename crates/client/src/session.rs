//! Session persistence: the key-value port and the `Session` value object.
//!
//! All components that care about the logged-in identity depend on the
//! [`SessionStore`] abstraction instead of ambient global storage, which is
//! what makes test doubles possible. Two implementations ship with the crate:
//! [`MemoryStore`] for tests and throwaway shells, and [`FileStore`], the
//! browser-localStorage analog that survives restarts.
//!
//! The persisted layout is a stable key-per-field scheme with no namespacing
//! or versioning (see [`keys`]). Fields are either all absent (logged out) or
//! mutually consistent; [`Session::persist`] enforces that by clearing the
//! store whenever a write fails partway.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use game_harbor_core::{AdminId, ClientId, Email, Role};

/// Persisted session keys. One string value per field.
pub mod keys {
    /// "true" while a login is active.
    pub const AUTHENTICATED: &str = "authenticated";

    /// Role of the logged-in user (`CLIENT` or `ADMIN`).
    pub const USER_TYPE: &str = "userType";

    /// Email the user logged in with.
    pub const USER_EMAIL: &str = "userEmail";

    /// Numeric id resolved from the directory lookup. Absent in the
    /// degraded state where no directory record matched.
    pub const USER_ID: &str = "userId";

    /// Display name resolved from the directory lookup.
    pub const USER_NAME: &str = "userName";

    /// Bearer token attached to outgoing requests when present.
    pub const AUTH_TOKEN: &str = "authToken";
}

/// Every key [`Session::persist`] may write, in write order.
const ALL_KEYS: &[&str] = &[
    keys::AUTHENTICATED,
    keys::USER_TYPE,
    keys::USER_EMAIL,
    keys::USER_ID,
    keys::USER_NAME,
    keys::AUTH_TOKEN,
];

/// Errors raised by session store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("session store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file held something other than a string map.
    #[error("session store corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The injected key-value port behind all session state.
///
/// Reads are infallible by contract: a store that cannot read behaves as
/// empty, which downgrades the app to logged-out rather than wedging it.
pub trait SessionStore: Send + Sync {
    /// Read a value, `None` when absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the value cannot be durably recorded.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a value. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the removal cannot be durably recorded.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Remove every session key from a store.
///
/// This is the single logout/expiry path: after it returns `Ok`, no session
/// field remains regardless of what was stored before.
///
/// # Errors
///
/// Returns the first [`StoreError`] encountered; earlier keys stay removed.
pub fn clear(store: &dyn SessionStore) -> Result<(), StoreError> {
    for key in ALL_KEYS {
        store.remove(key)?;
    }
    Ok(())
}

// =============================================================================
// Store implementations
// =============================================================================

/// In-memory session store for tests and ephemeral shells.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .ok()
            .and_then(|map| map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Ok(mut map) = self.values.lock() {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        if let Ok(mut map) = self.values.lock() {
            map.remove(key);
        }
        Ok(())
    }
}

/// File-backed session store: one JSON object of string fields.
///
/// Single-writer assumption, same as the original single-tab storage model;
/// concurrent shells racing on the same file are unhandled.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open a store at `path`, loading existing contents if the file exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the file exists but cannot be read or is
    /// not a JSON string map.
    pub fn open(path: PathBuf) -> Result<Self, StoreError> {
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<HashMap<String, String>>(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    fn flush(&self, values: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .ok()
            .and_then(|map| map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self.values.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        map.insert(key.to_string(), value.to_string());
        self.flush(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut map = self.values.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        if map.remove(key).is_some() {
            self.flush(&map)?;
        }
        Ok(())
    }
}

// =============================================================================
// Session value object
// =============================================================================

/// Resolved identity of the logged-in user.
///
/// Carried only when the post-login directory lookup found a record whose
/// email matches the login email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// A storefront customer.
    Client {
        /// Directory id of the customer record.
        id: ClientId,
        /// Display name from the directory record.
        name: String,
    },
    /// A console administrator.
    Admin {
        /// Directory id of the admin record.
        id: AdminId,
        /// Display name from the directory record.
        name: String,
    },
}

impl Identity {
    /// Display name of the identity.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Client { name, .. } | Self::Admin { name, .. } => name,
        }
    }

    /// Customer id, when this identity is a client.
    #[must_use]
    pub const fn client_id(&self) -> Option<ClientId> {
        match self {
            Self::Client { id, .. } => Some(*id),
            Self::Admin { .. } => None,
        }
    }
}

/// The client-held record of current login state.
///
/// A `Session` is a consistent snapshot: it is created on successful login,
/// loaded from the store at app start, and destroyed on logout or on any
/// transport-detected authentication failure. A session without an
/// [`Identity`] is the degraded state where login succeeded but no directory
/// record matched the email.
#[derive(Debug, Clone)]
pub struct Session {
    /// Email the user authenticated with.
    pub email: Email,
    /// Role selected at login.
    pub role: Role,
    /// Resolved identity, absent in the degraded state.
    pub identity: Option<Identity>,
    /// Bearer token for the transport, when the backend issued one.
    pub token: Option<SecretString>,
}

impl Session {
    /// Load the current session from a store.
    ///
    /// Returns `None` when logged out, or when the stored fields are not
    /// mutually consistent (in which case they are treated as absent rather
    /// than trusted).
    #[must_use]
    pub fn load(store: &dyn SessionStore) -> Option<Self> {
        if store.get(keys::AUTHENTICATED).as_deref() != Some("true") {
            return None;
        }
        let role: Role = store.get(keys::USER_TYPE)?.parse().ok()?;
        let email = Email::parse(&store.get(keys::USER_EMAIL)?).ok()?;

        let identity = match (store.get(keys::USER_ID), store.get(keys::USER_NAME)) {
            (Some(id), Some(name)) => {
                let id: i64 = id.parse().ok()?;
                Some(match role {
                    Role::Client => Identity::Client {
                        id: ClientId::new(id),
                        name,
                    },
                    Role::Admin => Identity::Admin {
                        id: AdminId::new(id),
                        name,
                    },
                })
            }
            _ => None,
        };

        let token = store.get(keys::AUTH_TOKEN).map(SecretString::from);

        Some(Self {
            email,
            role,
            identity,
            token,
        })
    }

    /// Persist every field of this session.
    ///
    /// All-or-nothing: if any write fails, the store is cleared before the
    /// error is returned so a partial session is never left behind.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] of the failed write.
    pub fn persist(&self, store: &dyn SessionStore) -> Result<(), StoreError> {
        let result = self.write_fields(store);
        if result.is_err() {
            // Partial sessions must not survive; best effort, the original
            // write error is the one worth reporting.
            let _ = clear(store);
        }
        result
    }

    fn write_fields(&self, store: &dyn SessionStore) -> Result<(), StoreError> {
        store.set(keys::AUTHENTICATED, "true")?;
        store.set(keys::USER_TYPE, &self.role.to_string())?;
        store.set(keys::USER_EMAIL, self.email.as_str())?;
        match &self.identity {
            Some(identity) => {
                let id = match identity {
                    Identity::Client { id, .. } => id.as_i64(),
                    Identity::Admin { id, .. } => id.as_i64(),
                };
                store.set(keys::USER_ID, &id.to_string())?;
                store.set(keys::USER_NAME, identity.name())?;
            }
            None => {
                store.remove(keys::USER_ID)?;
                store.remove(keys::USER_NAME)?;
            }
        }
        match &self.token {
            Some(token) => store.set(keys::AUTH_TOKEN, token.expose_secret())?,
            None => store.remove(keys::AUTH_TOKEN)?,
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client_session() -> Session {
        Session {
            email: Email::parse("a@x.com").unwrap(),
            role: Role::Client,
            identity: Some(Identity::Client {
                id: ClientId::new(7),
                name: "Ana".to_string(),
            }),
            token: None,
        }
    }

    #[test]
    fn test_load_logged_out_store() {
        let store = MemoryStore::new();
        assert!(Session::load(&store).is_none());
    }

    #[test]
    fn test_persist_then_load_round_trips() {
        let store = MemoryStore::new();
        client_session().persist(&store).unwrap();

        let loaded = Session::load(&store).unwrap();
        assert_eq!(loaded.email.as_str(), "a@x.com");
        assert_eq!(loaded.role, Role::Client);
        assert_eq!(
            loaded.identity,
            Some(Identity::Client {
                id: ClientId::new(7),
                name: "Ana".to_string(),
            })
        );
    }

    #[test]
    fn test_persist_degraded_session_removes_identity_keys() {
        let store = MemoryStore::new();
        client_session().persist(&store).unwrap();

        let degraded = Session {
            identity: None,
            ..client_session()
        };
        degraded.persist(&store).unwrap();

        assert!(store.get(keys::USER_ID).is_none());
        assert!(store.get(keys::USER_NAME).is_none());
        let loaded = Session::load(&store).unwrap();
        assert!(loaded.identity.is_none());
    }

    #[test]
    fn test_clear_removes_every_key() {
        let store = MemoryStore::new();
        client_session().persist(&store).unwrap();
        store.set(keys::AUTH_TOKEN, "tok").unwrap();

        clear(&store).unwrap();

        for key in ALL_KEYS {
            assert!(store.get(key).is_none(), "{key} survived clear");
        }
    }

    #[test]
    fn test_load_rejects_inconsistent_role() {
        let store = MemoryStore::new();
        client_session().persist(&store).unwrap();
        store.set(keys::USER_TYPE, "WIZARD").unwrap();

        assert!(Session::load(&store).is_none());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let store = FileStore::open(path.clone()).unwrap();
            client_session().persist(&store).unwrap();
        }

        let reopened = FileStore::open(path).unwrap();
        let loaded = Session::load(&reopened).unwrap();
        assert_eq!(loaded.identity.unwrap().name(), "Ana");
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("nope.json")).unwrap();
        assert!(store.get(keys::AUTHENTICATED).is_none());
    }
}
