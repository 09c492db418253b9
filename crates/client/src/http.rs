//! HTTP plumbing for the store API.
//!
//! [`ApiClient`] wraps `reqwest` with the store's conventions: a bearer token
//! read from a shared [`TokenSlot`] on every authenticated call, a fixed
//! per-request timeout, and decoding of the backend's uniform response
//! envelope `{ success, <resource>, message? }`.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::cache::CacheValue;
use crate::config::ClientConfig;
use crate::endpoints::Endpoints;
use crate::error::ApiError;

/// Catalog cache TTL.
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes
const CACHE_CAPACITY: u64 = 1000;

/// Fallback when the server supplies no message.
pub(crate) const GENERIC_FAILURE: &str = "Request failed";

/// Shared slot holding the current bearer token.
///
/// The credential holder writes it; every outgoing request reads it. Writes
/// happen before any dependent re-fetch is triggered, so a fetch can never be
/// issued with a stale token from the same transition.
#[derive(Clone, Default)]
pub struct TokenSlot(Arc<RwLock<Option<SecretString>>>);

impl TokenSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a token; subsequent requests send `Authorization: Bearer ...`.
    pub fn set(&self, token: SecretString) {
        if let Ok(mut slot) = self.0.write() {
            *slot = Some(token);
        }
    }

    /// Clear the token; subsequent requests go out anonymous.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.0.write() {
            *slot = None;
        }
    }

    /// Whether a token is currently present.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.0.read().is_ok_and(|slot| slot.is_some())
    }

    fn bearer(&self) -> Option<String> {
        self.0
            .read()
            .ok()
            .and_then(|slot| slot.as_ref().map(|t| format!("Bearer {}", t.expose_secret())))
    }
}

impl std::fmt::Debug for TokenSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TokenSlot")
            .field(if self.is_present() { &"[REDACTED]" } else { &"<absent>" })
            .finish()
    }
}

/// Client for the Thread Saints store API.
///
/// Cheaply cloneable; clones share the HTTP connection pool, the token slot,
/// and the catalog cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    endpoints: Endpoints,
    token: TokenSlot,
    cache: Cache<String, CacheValue>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                endpoints: Endpoints::new(config.api_url.clone()),
                token: TokenSlot::new(),
                cache,
            }),
        })
    }

    /// The endpoint table.
    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.inner.endpoints
    }

    /// The shared token slot written by the credential holder.
    #[must_use]
    pub fn token_slot(&self) -> &TokenSlot {
        &self.inner.token
    }

    pub(crate) fn cache(&self) -> &Cache<String, CacheValue> {
        &self.inner.cache
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.inner.token.bearer() {
            Some(value) => req.header(reqwest::header::AUTHORIZATION, value),
            None => req,
        }
    }

    pub(crate) fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorized(self.inner.client.get(url))
    }

    pub(crate) fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorized(self.inner.client.post(url))
    }

    pub(crate) fn put(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorized(self.inner.client.put(url))
    }

    pub(crate) fn delete(&self, url: &str) -> reqwest::RequestBuilder {
        self.authorized(self.inner.client.delete(url))
    }

    /// Send a request and extract `resource` from the uniform envelope.
    pub(crate) async fn send_expecting<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        resource: &str,
    ) -> Result<T, ApiError> {
        let mut envelope = self.send(req).await?;
        envelope.take(resource)
    }

    /// Send a request where only the success flag and message matter.
    pub(crate) async fn send_for_ack(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<Option<String>, ApiError> {
        let envelope = self.send(req).await?;
        Ok(envelope.message)
    }

    pub(crate) async fn send(&self, req: reqwest::RequestBuilder) -> Result<Envelope, ApiError> {
        let response = req.send().await?;
        let status = response.status();

        // Read the body as text first for better error diagnostics.
        let body = response.text().await?;

        if let Some(err) = failure_for_status(status, &body) {
            tracing::debug!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "store API returned non-success status"
            );
            return Err(err);
        }

        let envelope: Envelope = match serde_json::from_str(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "failed to parse store API response"
                );
                return Err(ApiError::Parse(e));
            }
        };

        // A 2xx with success=false still means "snapshot unchanged, show message".
        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope.message.unwrap_or_else(|| GENERIC_FAILURE.to_owned()),
            ));
        }

        Ok(envelope)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", self.inner.endpoints.base())
            .field("token", &self.inner.token)
            .finish_non_exhaustive()
    }
}

/// The backend's uniform response envelope. The resource key varies per
/// endpoint (`cart`, `wishlist`, `product`, ...), so remaining fields are
/// kept raw and extracted by name.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(flatten)]
    rest: serde_json::Map<String, serde_json::Value>,
}

impl Envelope {
    pub(crate) fn take<T: DeserializeOwned>(&mut self, resource: &str) -> Result<T, ApiError> {
        let value = self
            .rest
            .remove(resource)
            .unwrap_or(serde_json::Value::Null);
        serde_json::from_value(value).map_err(ApiError::Parse)
    }
}

/// Map a failure status to its error. A 401 means the credential itself was
/// rejected and the session is over; a 403 means the account is fine but not
/// allowed this action (admin routes), which must not read as an expired
/// session.
fn failure_for_status(status: reqwest::StatusCode, body: &str) -> Option<ApiError> {
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Some(ApiError::Unauthorized(extract_message(body)));
    }
    if status == reqwest::StatusCode::FORBIDDEN {
        return Some(ApiError::Rejected(message_in(body).unwrap_or_else(|| {
            "You do not have permission to perform this action".to_owned()
        })));
    }
    if status.is_success() {
        None
    } else {
        Some(ApiError::Rejected(extract_message(body)))
    }
}

/// The server's message from an error body, when the body is the expected
/// envelope.
fn message_in(body: &str) -> Option<String> {
    serde_json::from_str::<Envelope>(body)
        .ok()
        .and_then(|envelope| envelope.message)
}

fn extract_message(body: &str) -> String {
    message_in(body).unwrap_or_else(|| GENERIC_FAILURE.to_owned())
}
