//! Error types for the protocol layer.
//!
//! Each crate in EventDesk defines its own error enum. When you see a
//! `ProtocolError`, the problem is in turning values into bytes or back,
//! not in networking or in the session store.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust value into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust value).
    ///
    /// Common causes: malformed JSON, missing `_id`, or a field with the
    /// wrong JSON type.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The value parsed but has the wrong overall shape, e.g. a profile
    /// patch that is an array instead of an object.
    #[error("malformed value: {0}")]
    Malformed(String),
}
