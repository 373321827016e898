//! Request descriptors: what a resource method asks the client to do.
//!
//! A resource method never touches the network. It builds a
//! [`RequestDescriptor`] (verb, path, optional JSON body, whether to
//! attach auth, which key the payload may be wrapped under) and hands it
//! to [`ApiClient::request`](crate::ApiClient::request), which owns
//! headers, the timeout, and response handling.

use std::time::Duration;

use eventdesk_protocol::{Codec, JsonCodec};
use eventdesk_transport::Method;
use serde::Serialize;

use crate::ApiError;

/// One logical API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path relative to the base URL, starting with `/`.
    pub path: String,
    /// Encoded JSON body.
    pub body: Option<Vec<u8>>,
    /// Attach `Authorization: Bearer <token>` when a token is stored.
    pub include_auth: bool,
    /// Extra headers, applied after the defaults so they win.
    pub headers: Vec<(String, String)>,
    /// Key the payload may be wrapped under (`{"event": {...}}`).
    pub resource_key: Option<&'static str>,
    /// Overrides the client-wide deadline for this call.
    pub timeout: Option<Duration>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            include_auth: true,
            headers: Vec::new(),
            resource_key: None,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Encodes `body` as the JSON request body.
    ///
    /// # Errors
    /// [`ApiError::Encode`] if the value can't be serialized.
    pub fn json<B: Serialize + ?Sized>(
        mut self,
        body: &B,
    ) -> Result<Self, ApiError> {
        self.body = Some(JsonCodec.encode(body).map_err(ApiError::Encode)?);
        Ok(self)
    }

    /// Marks the call as public: no bearer token, even if one is stored.
    pub fn public(mut self) -> Self {
        self.include_auth = false;
        self
    }

    pub fn header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn resource(mut self, key: &'static str) -> Self {
        self.resource_key = Some(key);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
