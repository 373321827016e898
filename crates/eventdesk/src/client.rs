//! `ApiClient` builder and request pipeline.
//!
//! Every API call goes through [`ApiClient::request`]:
//!
//! ```text
//! RequestDescriptor
//!   → headers (JSON content type, bearer token, overrides)
//!   → transport.send() raced against the deadline
//!   → status / content-type handling (401 clears the session)
//!   → envelope normalization
//!   → payload
//! ```
//!
//! The per-resource methods in [`crate::api`] only build descriptors.

use std::sync::Arc;
use std::time::{Duration, Instant};

use eventdesk_protocol::JsonCodec;
use eventdesk_session::{MemoryStorage, SessionStore, Storage};
use eventdesk_transport::{
    HttpRequest, HttpResponse, HttpTransport, ReqwestTransport,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::envelope::{self, message_field};
use crate::{ApiError, ClientConfig, RequestDescriptor};

const JSON: &str = "application/json";

/// Longest slice of a non-JSON error body quoted in an error message.
const ERROR_EXCERPT_CHARS: usize = 200;

/// Builder for an [`ApiClient`].
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use eventdesk::prelude::*;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let session = Arc::new(SessionStore::new(FileStorage::new("session.json")));
/// let client = ApiClient::builder()
///     .config(ClientConfig::from_env()?)
///     .build(ReqwestTransport::new()?, session)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ApiClientBuilder {
    config: ClientConfig,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl ApiClientBuilder {
    /// Starts from [`ClientConfig::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Overrides the base URL. Validated in [`build`](Self::build).
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Overrides the per-request deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client over `transport`, sharing `session`.
    ///
    /// # Errors
    /// [`ApiError::Config`] if the base URL override is invalid.
    pub fn build<T: HttpTransport, S: Storage>(
        self,
        transport: T,
        session: Arc<SessionStore<S>>,
    ) -> Result<ApiClient<T, S>, ApiError> {
        let mut config = match self.base_url {
            Some(url) => {
                ClientConfig::new(&url)?.with_timeout(self.config.timeout())
            }
            None => self.config,
        };
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        Ok(ApiClient::new(config, transport, session))
    }
}

/// Client for the event-management backend.
///
/// Holds no mutable state of its own: the only shared state is the
/// [`SessionStore`], which is injected so tests and other callers can
/// hold the same store.
pub struct ApiClient<T: HttpTransport = ReqwestTransport, S: Storage = MemoryStorage> {
    config: ClientConfig,
    transport: T,
    session: Arc<SessionStore<S>>,
}

impl ApiClient {
    /// Creates a new builder.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }
}

/// A response that passed status handling, before normalization.
pub(crate) struct Reply {
    pub(crate) status: u16,
    /// `None` for 204 No Content.
    pub(crate) body: Option<Value>,
}

impl<T: HttpTransport, S: Storage> ApiClient<T, S> {
    pub fn new(
        config: ClientConfig,
        transport: T,
        session: Arc<SessionStore<S>>,
    ) -> Self {
        Self {
            config,
            transport,
            session,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The shared session store.
    pub fn session(&self) -> &Arc<SessionStore<S>> {
        &self.session
    }

    /// Performs one call and returns the normalized payload.
    ///
    /// 204 No Content yields `Value::Null`.
    ///
    /// # Errors
    /// Every failure is an [`ApiError`]; see [`ApiError::kind`]. A 401
    /// clears the session before [`ApiError::SessionExpired`] is
    /// returned.
    pub async fn request(
        &self,
        request: RequestDescriptor,
    ) -> Result<Value, ApiError> {
        let reply = self.exchange(&request).await?;
        match reply.body {
            Some(body) => {
                envelope::normalize(reply.status, body, request.resource_key)
            }
            None => Ok(Value::Null),
        }
    }

    /// [`request`](Self::request), then decodes the payload into `R`.
    pub async fn fetch<R: DeserializeOwned>(
        &self,
        request: RequestDescriptor,
    ) -> Result<R, ApiError> {
        envelope::decode(self.request(request).await?)
    }

    /// [`request`](Self::request) for calls whose payload is not needed.
    pub async fn execute(
        &self,
        request: RequestDescriptor,
    ) -> Result<(), ApiError> {
        self.request(request).await.map(drop)
    }

    // -- Generic verbs ----------------------------------------------------

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(RequestDescriptor::get(path)).await
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        self.request(RequestDescriptor::post(path).json(body)?).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        self.request(RequestDescriptor::put(path).json(body)?).await
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        self.request(RequestDescriptor::patch(path).json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(RequestDescriptor::delete(path)).await
    }

    // -- Pipeline ---------------------------------------------------------

    /// Sends the request and applies status handling.
    pub(crate) async fn exchange(
        &self,
        request: &RequestDescriptor,
    ) -> Result<Reply, ApiError> {
        let http = self.prepare(request);
        let deadline = request.timeout.unwrap_or(self.config.timeout());
        tracing::debug!(
            method = %http.method,
            url = %http.url,
            auth = http.header("authorization").is_some(),
            "sending request"
        );

        let started = Instant::now();
        let response =
            match tokio::time::timeout(deadline, self.transport.send(http))
                .await
            {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    tracing::warn!(
                        method = %request.method,
                        path = %request.path,
                        error = %e,
                        "request failed"
                    );
                    return Err(e.into());
                }
                Err(_) => {
                    tracing::warn!(
                        method = %request.method,
                        path = %request.path,
                        timeout_ms = deadline.as_millis() as u64,
                        "request timed out"
                    );
                    return Err(ApiError::Timeout { after: deadline });
                }
            };

        tracing::debug!(
            status = response.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response received"
        );
        self.interpret(response)
    }

    fn prepare(&self, request: &RequestDescriptor) -> HttpRequest {
        let mut http =
            HttpRequest::new(request.method, self.config.url(&request.path));
        http.headers.push(("Content-Type".to_string(), JSON.to_string()));
        http.headers.push(("Accept".to_string(), JSON.to_string()));
        if request.include_auth {
            if let Some(token) = self.session.get_token() {
                http.headers
                    .push(("Authorization".to_string(), format!("Bearer {token}")));
            }
        }
        for (name, value) in &request.headers {
            http.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
            http.headers.push((name.clone(), value.clone()));
        }
        http.body = request.body.clone();
        http
    }

    fn interpret(&self, response: HttpResponse) -> Result<Reply, ApiError> {
        let status = response.status;
        if status == 401 {
            tracing::warn!("server rejected the session, logging out");
            if let Err(e) = self.session.logout() {
                tracing::error!(error = %e, "could not clear session after 401");
            }
            return Err(ApiError::SessionExpired);
        }

        let text = response.body.trim();
        let parsed = (response.declares_json() && !text.is_empty())
            .then(|| JsonCodec.decode_str::<Value>(text));

        if !response.is_success() {
            let message = match &parsed {
                Some(Ok(Value::Object(map))) => message_field(map),
                _ => None,
            }
            .unwrap_or_else(|| error_excerpt(status, text));
            return Err(ApiError::Http { status, message });
        }

        if status == 204 {
            return Ok(Reply { status, body: None });
        }
        if text.is_empty() {
            return Err(ApiError::InvalidResponse(format!(
                "empty body with status {status}"
            )));
        }
        match parsed {
            Some(Ok(value)) => Ok(Reply {
                status,
                body: Some(value),
            }),
            Some(Err(e)) => {
                Err(ApiError::InvalidResponse(format!("malformed JSON body: {e}")))
            }
            None => Err(ApiError::InvalidResponse(format!(
                "expected JSON, got content type {}",
                response.content_type().unwrap_or("(none)")
            ))),
        }
    }
}

/// `"HTTP Error: <status> - <first 200 chars>"`, or just the status for
/// an empty body.
fn error_excerpt(status: u16, body: &str) -> String {
    if body.is_empty() {
        return format!("HTTP Error: {status}");
    }
    let excerpt: String = body.chars().take(ERROR_EXCERPT_CHARS).collect();
    format!("HTTP Error: {status} - {excerpt}")
}
