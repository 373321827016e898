//! HTTP transport implementation using `reqwest`.

use std::time::Instant;

use crate::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};

/// A `reqwest`-based [`HttpTransport`].
///
/// Holds one pooled `reqwest::Client`; cloning the transport shares the
/// pool. No client-level timeout is configured here: the API client
/// races every call against its own timer so that a timeout can be
/// told apart from a network failure.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds a transport with a fresh connection pool.
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| TransportError::InvalidRequest(Box::new(e)))?;
        Ok(Self { client })
    }

    /// Wraps an existing, pre-configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let started = Instant::now();
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(classify)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::ReceiveFailed(Box::new(e)))?;

        tracing::trace!(
            status,
            bytes = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "response read"
        );

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn classify(e: reqwest::Error) -> TransportError {
    if e.is_builder() {
        TransportError::InvalidRequest(Box::new(e))
    } else if e.is_connect() {
        TransportError::ConnectFailed(Box::new(e))
    } else {
        TransportError::SendFailed(Box::new(e))
    }
}
