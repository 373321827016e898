//! HTTP transport abstraction layer for EventDesk.
//!
//! Provides the [`HttpTransport`] trait that moves exactly one
//! [`HttpRequest`] to the backend and hands back one [`HttpResponse`].
//! The transport knows nothing about JSON, auth, or envelopes: those
//! live in the client above it.
//!
//! # Feature Flags
//!
//! - `reqwest` (default): HTTP transport via `reqwest`

mod error;
#[cfg(feature = "reqwest")]
mod reqwest_transport;

pub use error::{BoxError, TransportError};
#[cfg(feature = "reqwest")]
pub use reqwest_transport::ReqwestTransport;

use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// The HTTP verbs the backend API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Returns the canonical upper-case verb.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully-resolved outgoing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL, base URL already joined with the endpoint path.
    pub url: String,
    /// Header pairs in the order they were added.
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Returns the first value of the named header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A response as read off the wire.
///
/// The body is always read as text first; whether it is JSON is decided
/// by the caller after looking at the content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Creates a response with the given status and body and no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Adds a header, builder style.
    pub fn with_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the first value of the named header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Returns the declared `Content-Type`, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `true` if the content type claims JSON (`application/json` or a
    /// `+json` suffix type such as `application/problem+json`).
    pub fn declares_json(&self) -> bool {
        let Some(content_type) = self.content_type() else {
            return false;
        };
        let media = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        media == "application/json" || media.ends_with("+json")
    }
}

fn find_header<'a>(
    headers: &'a [(String, String)],
    name: &str,
) -> Option<&'a str> {
    headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Sends one request and returns the server's response.
///
/// Implementations must return `Ok` for every response the server
/// actually produced, whatever its status. `Err` is reserved for
/// transport failures where no response exists.
///
/// The returned future must be `Send` so that client calls can be
/// spawned or joined on a multi-threaded runtime.
pub trait HttpTransport: Send + Sync + 'static {
    /// Sends the request and reads the full response body.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<T: HttpTransport> HttpTransport for Arc<T> {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        T::send(self, request)
    }
}
