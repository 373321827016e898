//! Codec trait and the JSON implementation.
//!
//! A "codec" (coder/decoder) converts between Rust values and raw bytes.
//! The API client uses it for request bodies and the session store uses
//! it for the persisted profile, so both agree on one representation.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust values to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because a codec lives inside long-lived
/// shared state (the client, the store) that async tasks reach from
/// any worker thread.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if the value can't be represented.
    fn encode<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed or
    /// don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// The backend speaks JSON and the stored profile is JSON, so this is
/// the only codec EventDesk needs today.
///
/// ## Example
///
/// ```rust
/// use eventdesk_protocol::{Codec, JsonCodec, UserProfile};
///
/// let codec = JsonCodec;
/// let user: UserProfile =
///     codec.decode(br#"{"_id":"1","role":"organizer"}"#).unwrap();
///
/// let bytes = codec.encode(&user).unwrap();
/// let again: UserProfile = codec.decode(&bytes).unwrap();
/// assert_eq!(user, again);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Encodes to a `String` rather than bytes. Handy for string-valued
    /// stores.
    pub fn encode_string<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    /// Decodes from a `&str`.
    pub fn decode_str<T: DeserializeOwned>(
        &self,
        data: &str,
    ) -> Result<T, ProtocolError> {
        serde_json::from_str(data).map_err(ProtocolError::Decode)
    }
}

impl Codec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
