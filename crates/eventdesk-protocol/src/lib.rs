//! Wire data model for EventDesk.
//!
//! This crate defines the shapes exchanged with the event-management
//! backend:
//!
//! - **Resources** ([`UserProfile`], [`Event`], [`Registration`],
//!   [`EventSession`], [`Speaker`]): what the REST API returns.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how values are turned
//!   into bytes for request bodies and local storage.
//! - **Errors** ([`ProtocolError`]): what can go wrong while encoding
//!   or decoding.
//!
//! # Tolerant decoding
//!
//! The backend is a document store: every resource carries an `_id`,
//! fields come and go between endpoints, and related resources arrive
//! either as an id string or as a populated object. So every model here
//! requires only its id, keeps the fields the client reads as `Option`,
//! and preserves everything else in an `extra` map. Nothing is lost when
//! a value is decoded and encoded again.
//!
//! ```text
//! Transport (bytes) → Protocol (resources) → Client (typed calls)
//! ```

/// Implements `Serialize` and `Deserialize` for a model derived with
/// `#[serde(remote = "Self")]`. Decoding first folds the `_id` and `id`
/// keys into `$key`, so a document may carry either spelling or both.
macro_rules! serde_with_id {
    ($ty:ident, $key:literal) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                $ty::serialize(self, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                crate::ids::deserialize_with_id(deserializer, $key, |value| {
                    $ty::deserialize(value)
                })
            }
        }
    };
}

mod agenda;
mod codec;
mod error;
mod event;
mod ids;
mod registration;
mod user;

pub use agenda::{EventSession, Speaker};
pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use event::{Event, parse_timestamp};
pub use ids::{Reference, ResourceId};
pub use registration::{Participant, Registration};
pub use user::{Credentials, UserProfile};

/// Free-form JSON object used to keep fields a model doesn't name.
pub type Extra = serde_json::Map<String, serde_json::Value>;
