//! Error types for the session layer.

use eventdesk_protocol::ProtocolError;

/// Errors that can occur while reading or writing the stored session.
///
/// Reads never surface these: a session that can't be read is treated
/// as "not logged in". Only writes (`set_auth`, `logout`, `update_user`)
/// report them, because a write that silently failed would leave the
/// caller believing in a session that isn't there.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The backing storage failed (disk full, permissions, …).
    #[error("session storage failed: {0}")]
    Storage(#[from] std::io::Error),

    /// The user profile could not be serialized for storage.
    #[error("could not encode user profile: {0}")]
    Encode(#[source] ProtocolError),

    /// A profile update was not a JSON object, or merging it produced
    /// something that is no longer a valid profile (e.g. `id: null`).
    #[error("invalid profile update: {0}")]
    InvalidUpdate(String),
}
