/// Boxed source error carried by [`TransportError`] variants.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur in the transport layer.
///
/// Every variant means no usable response came back from the server.
/// HTTP error statuses are NOT transport errors: a 404 or 500 is a
/// perfectly good response and is handed up unchanged.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be built (malformed URL or header).
    #[error("invalid request: {0}")]
    InvalidRequest(#[source] BoxError),

    /// The server could not be reached (DNS failure, refused, TLS).
    #[error("connect failed: {0}")]
    ConnectFailed(#[source] BoxError),

    /// The connection broke while sending the request.
    #[error("send failed: {0}")]
    SendFailed(#[source] BoxError),

    /// The connection broke while reading the response body.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] BoxError),
}
