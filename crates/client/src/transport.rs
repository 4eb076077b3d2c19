//! Shared request/response handling and error classification.
//!
//! Every backend call in this crate funnels through [`Transport::request`]:
//! it builds the URL, attaches the bearer token when the session store holds
//! one, serializes the JSON body, classifies the outcome, and records the
//! exchange to the diagnostic log. Resource clients add nothing but fixed
//! paths and verbs on top of this.
//!
//! Classification contract:
//!
//! - 401 destroys the persisted session, notifies the registered
//!   [`AuthSink`], and fails with [`ApiError::AuthRequired`]
//! - 403 fails with [`ApiError::Forbidden`], session untouched
//! - any other non-2xx fails with [`ApiError::RequestFailed`], carrying the
//!   server `message` field when the body has one, else the status line
//! - 2xx with a JSON content type yields [`Outcome::Json`]; an empty array
//!   body stays an empty array, never null
//! - 204, or 2xx without a content type, yields [`Outcome::NoContent`]
//! - any other 2xx yields [`Outcome::Accepted`], the bare success sentinel
//!   for commands with no payload

use std::sync::{Arc, Mutex};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, instrument, warn};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::{self, SessionStore, keys};

/// Bytes of response body echoed into diagnostics before truncation.
const LOG_BODY_LIMIT: usize = 500;

/// Observer notified when the session ends and the shell should return to
/// its login entry point.
///
/// A library cannot navigate; the shell that owns the screen registers a
/// sink and decides what "go to login" means for it.
pub trait AuthSink: Send + Sync {
    /// Called after a 401 destroyed the session, and on explicit logout.
    fn redirect_to_login(&self);
}

/// Classified payload of a successful request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Decoded JSON body.
    Json(Value),
    /// 204 or a body-less success.
    NoContent,
    /// Success with a non-JSON body; the body itself is discarded.
    Accepted,
}

/// The single generic request path shared by all resource clients.
///
/// Cheap to clone; clones share the HTTP connection pool and session store.
#[derive(Clone)]
pub struct Transport {
    inner: Arc<TransportInner>,
}

struct TransportInner {
    http: reqwest::Client,
    /// Base URL with any trailing slash removed; paths are appended verbatim.
    base: String,
    store: Arc<dyn SessionStore>,
    auth_sink: Mutex<Option<Arc<dyn AuthSink>>>,
}

impl Transport {
    /// Create a transport for the configured backend.
    #[must_use]
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            inner: Arc::new(TransportInner {
                http: reqwest::Client::new(),
                base: config.api_url.as_str().trim_end_matches('/').to_string(),
                store,
                auth_sink: Mutex::new(None),
            }),
        }
    }

    /// Register the sink notified when the session ends.
    pub fn set_auth_sink(&self, sink: Arc<dyn AuthSink>) {
        if let Ok(mut slot) = self.inner.auth_sink.lock() {
            *slot = Some(sink);
        }
    }

    /// The session store this transport reads its token from.
    #[must_use]
    pub fn store(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.inner.store)
    }

    pub(crate) fn notify_redirect_to_login(&self) {
        let sink = self
            .inner
            .auth_sink
            .lock()
            .ok()
            .and_then(|slot| slot.clone());
        if let Some(sink) = sink {
            sink.redirect_to_login();
        }
    }

    /// Perform a request and classify the response.
    ///
    /// # Errors
    ///
    /// Fails with the classified [`ApiError`] for the response, or
    /// [`ApiError::Network`] when the call itself does not complete.
    #[instrument(skip(self, body), fields(method = %method, path = %path))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Outcome, ApiError> {
        let url = format!("{}{path}", self.inner.base);

        let mut request = self
            .inner
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json");

        // Attach the bearer token if one is persisted.
        if let Some(token) = self.inner.store.get(keys::AUTH_TOKEN) {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%url, has_body = body.is_some(), "API request");

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            // Unauthorized - destroy the session and send the shell back to
            // its login entry point.
            warn!(%url, "401 received, clearing session");
            if let Err(e) = session::clear(self.inner.store.as_ref()) {
                error!(error = %e, "failed to clear session after 401");
            }
            self.notify_redirect_to_login();
            return Err(ApiError::AuthRequired);
        }

        if status == StatusCode::FORBIDDEN {
            return Err(ApiError::Forbidden);
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        // Body as text first for better error diagnostics.
        let text = response.text().await?;

        if !status.is_success() {
            let message = extract_message(&text)
                .unwrap_or_else(|| format!("API request failed: {status}"));
            error!(
                status = %status,
                body = %truncate(&text),
                "API request failed"
            );
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        if status == StatusCode::NO_CONTENT {
            debug!(status = %status, "API response without content");
            return Ok(Outcome::NoContent);
        }

        match content_type {
            Some(ct) if ct.contains("application/json") => {
                let value: Value = serde_json::from_str(&text)?;
                debug!(status = %status, body = %truncate(&text), "API response");
                Ok(Outcome::Json(value))
            }
            // No content type at all is treated like an empty response.
            None => {
                debug!(status = %status, "API response without content type");
                Ok(Outcome::NoContent)
            }
            Some(_) => {
                debug!(status = %status, "API response with non-JSON body");
                Ok(Outcome::Accepted)
            }
        }
    }

    // =========================================================================
    // Typed helpers
    // =========================================================================

    /// GET a single JSON document.
    ///
    /// # Errors
    ///
    /// Fails with the classified [`ApiError`], or [`ApiError::Parse`] when
    /// the body does not match `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let outcome = self.request(Method::GET, path, None).await?;
        decode(outcome)
    }

    /// GET a JSON array.
    ///
    /// An empty array response decodes to an empty `Vec`, never an absent
    /// value.
    ///
    /// # Errors
    ///
    /// Fails with the classified [`ApiError`], or [`ApiError::Parse`] when
    /// the body is not an array of `T`.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let outcome = self.request(Method::GET, path, None).await?;
        decode(outcome)
    }

    /// POST a JSON body and decode the reply.
    ///
    /// # Errors
    ///
    /// Fails with the classified [`ApiError`], or [`ApiError::Parse`] when
    /// the reply does not match `T`.
    pub async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        let outcome = self.request(Method::POST, path, Some(&body)).await?;
        decode(outcome)
    }

    /// POST without a body and decode the reply.
    ///
    /// # Errors
    ///
    /// Fails with the classified [`ApiError`], or [`ApiError::Parse`] when
    /// the reply does not match `T`.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let outcome = self.request(Method::POST, path, None).await?;
        decode(outcome)
    }

    /// POST a command, optionally with a body, discarding any reply payload.
    ///
    /// # Errors
    ///
    /// Fails with the classified [`ApiError`].
    pub async fn post_command<B: Serialize + Sync>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError> {
        let body = body.map(serde_json::to_value).transpose()?;
        self.request(Method::POST, path, body.as_ref()).await?;
        Ok(())
    }

    /// PUT a JSON body, discarding any reply payload.
    ///
    /// # Errors
    ///
    /// Fails with the classified [`ApiError`].
    pub async fn put<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let body = serde_json::to_value(body)?;
        self.request(Method::PUT, path, Some(&body)).await?;
        Ok(())
    }

    /// DELETE a resource, discarding any reply payload.
    ///
    /// # Errors
    ///
    /// Fails with the classified [`ApiError`].
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request(Method::DELETE, path, None).await?;
        Ok(())
    }
}

/// Decode a classified outcome into a typed value.
///
/// The body-less outcomes keep the original sentinels: `NoContent` decodes
/// like JSON `null`, `Accepted` like JSON `true`. Typed callers that expect
/// a document treat those as a parse mismatch, which is what they are.
fn decode<T: DeserializeOwned>(outcome: Outcome) -> Result<T, ApiError> {
    let value = match outcome {
        Outcome::Json(value) => value,
        Outcome::NoContent => Value::Null,
        Outcome::Accepted => Value::Bool(true),
    };
    Ok(serde_json::from_value(value)?)
}

/// Best-effort extraction of the server-provided error message.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_owned)
}

fn truncate(text: &str) -> String {
    text.chars().take(LOG_BODY_LIMIT).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_empty_array_is_empty_vec() {
        let outcome = Outcome::Json(Value::Array(vec![]));
        let list: Vec<i64> = decode(outcome).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_decode_no_content_is_null() {
        let value: Option<i64> = decode(Outcome::NoContent).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_decode_accepted_is_true() {
        let flag: bool = decode(Outcome::Accepted).unwrap();
        assert!(flag);
    }

    #[test]
    fn test_decode_type_mismatch_is_parse_error() {
        let outcome = Outcome::Json(Value::String("nope".to_string()));
        let result: Result<i64, ApiError> = decode(outcome);
        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_extract_message_present() {
        let body = r#"{"message": "stock too low", "code": 42}"#;
        assert_eq!(extract_message(body).as_deref(), Some("stock too low"));
    }

    #[test]
    fn test_extract_message_absent_or_invalid() {
        assert!(extract_message(r#"{"error": "no message field"}"#).is_none());
        assert!(extract_message("<html>502</html>").is_none());
        assert!(extract_message("").is_none());
    }

    #[test]
    fn test_truncate_caps_long_bodies() {
        let long = "x".repeat(2000);
        assert_eq!(truncate(&long).len(), LOG_BODY_LIMIT);
    }
}
