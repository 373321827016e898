//! Unified error type for the EventDesk client.

use std::time::Duration;

use eventdesk_protocol::ProtocolError;
use eventdesk_session::SessionError;
use eventdesk_transport::TransportError;

use crate::ConfigError;

/// Which class of failure an [`ApiError`] belongs to.
///
/// Decided where the failure was detected, so callers branch on this
/// instead of matching message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request did not finish within the configured deadline.
    Timeout,
    /// No response was received (DNS, refused connection, reset).
    NetworkUnreachable,
    /// The server answered 401; the stored session has been cleared.
    SessionExpired,
    /// The server answered with a non-2xx status, or a 2xx envelope
    /// reporting `success: false`.
    Http,
    /// A 2xx response whose body wasn't the JSON the caller expected.
    InvalidResponseShape,
    /// Failed on this side of the wire: bad configuration, a request
    /// body that couldn't be encoded, or session storage.
    Local,
}

/// Top-level error returned by every [`ApiClient`](crate::ApiClient) call.
///
/// Lower-layer errors convert with `?` through the `#[from]` variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request timed out after {} ms", after.as_millis())]
    Timeout { after: Duration },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("session expired, please log in again")]
    SessionExpired,

    /// `message` is the server's own text when it sent one.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("could not encode request body: {0}")]
    Encode(#[source] ProtocolError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Timeout { .. } => ErrorKind::Timeout,
            // A URL reqwest refuses to build never left the process.
            Self::Transport(TransportError::InvalidRequest(_)) => {
                ErrorKind::Local
            }
            Self::Transport(_) => ErrorKind::NetworkUnreachable,
            Self::SessionExpired => ErrorKind::SessionExpired,
            Self::Http { .. } => ErrorKind::Http,
            Self::InvalidResponse(_) => ErrorKind::InvalidResponseShape,
            Self::Encode(_) | Self::Session(_) | Self::Config(_) => {
                ErrorKind::Local
            }
        }
    }

    /// The HTTP status, for errors that came with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::SessionExpired => Some(401),
            _ => None,
        }
    }
}
