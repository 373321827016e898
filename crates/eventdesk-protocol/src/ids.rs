//! Identity types: resource ids and references to other resources.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Extra;

/// The id of a backend resource.
///
/// A "newtype wrapper" around `String`, so that an id can't be mixed up
/// with a title or an email at a call site. The backend mostly sends
/// string ids (`"_id": "65f0..."`), but some fixtures and older
/// endpoints send plain numbers, so decoding accepts both and always
/// stores text. Encoding always writes a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ResourceId(pub String);

impl ResourceId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Unsigned(n) => Self(n.to_string()),
            Raw::Signed(n) => Self(n.to_string()),
        })
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for ResourceId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ResourceId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A link to another resource: either its bare id or the populated
/// document.
///
/// Whether the backend populates a relation depends on the endpoint:
/// `GET /events` may return `"organizer": "u1"` while `GET /events/{id}`
/// returns `"organizer": {"_id": "u1", "firstName": "Ada"}`. Callers
/// usually only need [`Reference::id`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reference {
    /// Only the id was sent.
    Id(ResourceId),
    /// The related document was populated.
    Populated {
        #[serde(rename = "_id")]
        id: ResourceId,
        #[serde(flatten)]
        extra: Extra,
    },
}

impl Reference {
    /// Returns the referenced id, whichever form was sent.
    pub fn id(&self) -> &ResourceId {
        match self {
            Self::Id(id) => id,
            Self::Populated { id, .. } => id,
        }
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => {
                let mut extra = fold_id_keys(map, "_id");
                let id = extra
                    .remove("_id")
                    .ok_or_else(|| de::Error::missing_field("_id"))?;
                let id = ResourceId::deserialize(id).map_err(de::Error::custom)?;
                Ok(Self::Populated { id, extra })
            }
            other => ResourceId::deserialize(other)
                .map(Self::Id)
                .map_err(de::Error::custom),
        }
    }
}

/// Moves the document's id under `canonical`.
///
/// Documents carry `_id`, `id` or both (a virtual `id` next to the stored
/// `_id`). A non-null `_id` wins; the other key is dropped.
pub(crate) fn fold_id_keys(mut map: Extra, canonical: &str) -> Extra {
    let underscore = map.remove("_id").filter(|v| !v.is_null());
    let plain = map.remove("id");
    if let Some(id) = underscore.or(plain) {
        map.insert(canonical.to_string(), id);
    }
    map
}

/// Decodes a JSON object with `decode` after [`fold_id_keys`].
pub(crate) fn deserialize_with_id<'de, D, T>(
    deserializer: D,
    canonical: &str,
    decode: impl FnOnce(Value) -> Result<T, serde_json::Error>,
) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
{
    let map = Extra::deserialize(deserializer)?;
    decode(Value::Object(fold_id_keys(map, canonical))).map_err(de::Error::custom)
}
