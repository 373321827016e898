//! The event programme: sessions (talks, workshops) and their speakers.

use serde::{Deserialize, Serialize};

use crate::{Extra, Reference, ResourceId};

/// One slot in an event's programme.
///
/// Named `EventSession` so it can't be confused with the signed-in
/// user's auth session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct EventSession {
    #[serde(rename = "_id")]
    pub id: ResourceId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<Reference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `keynote`, `workshop`, `panel`, … (server-defined).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub session_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub speakers: Vec<Reference>,

    #[serde(flatten)]
    pub extra: Extra,
}

/// A speaker who can be attached to sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Speaker {
    #[serde(rename = "_id")]
    pub id: ResourceId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expertise: Vec<String>,

    #[serde(flatten)]
    pub extra: Extra,
}

serde_with_id!(EventSession, "_id");
serde_with_id!(Speaker, "_id");
