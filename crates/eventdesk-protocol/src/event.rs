//! Events: the core resource organizers create and participants register for.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Extra, Reference, ResourceId};

/// An event as returned by `/events`.
///
/// Dates stay as the strings the server sent; [`Event::starts_at`] and
/// friends parse them on demand. A date the client can't parse makes the
/// event "not upcoming / not ongoing / not past" instead of failing the
/// whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: ResourceId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// `draft`, `published`, `cancelled`, `completed`, … (server-defined).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<Reference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_registrations: Option<u64>,

    /// Older endpoints count registrations under this name instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Event {
    /// Creates an event with only an id set.
    pub fn new(id: impl Into<ResourceId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            category: None,
            status: None,
            start_date: None,
            end_date: None,
            created_at: None,
            organizer: None,
            total_registrations: None,
            registration_count: None,
            revenue: None,
            extra: Extra::new(),
        }
    }

    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.start_date.as_deref().and_then(parse_timestamp)
    }

    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.end_date.as_deref().and_then(parse_timestamp)
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    /// Starts strictly after `now`.
    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.starts_at().is_some_and(|start| start > now)
    }

    /// Started at or before `now` and ends at or after it.
    pub fn is_ongoing(&self, now: DateTime<Utc>) -> bool {
        match (self.starts_at(), self.ends_at()) {
            (Some(start), Some(end)) => start <= now && end >= now,
            _ => false,
        }
    }

    /// Ended strictly before `now`.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.ends_at().is_some_and(|end| end < now)
    }

    /// `true` if the organizer (bare id or populated) is `user_id`.
    /// Events without an organizer belong to nobody.
    pub fn is_organized_by(&self, user_id: &str) -> bool {
        self.organizer
            .as_ref()
            .is_some_and(|organizer| organizer.id() == user_id)
    }

    /// Registrations so far, whichever counter the endpoint filled in.
    pub fn registrations(&self) -> u64 {
        self.total_registrations
            .or(self.registration_count)
            .unwrap_or(0)
    }
}

/// Parses the timestamp formats the backend emits.
///
/// Accepted, in order: RFC 3339 (`2025-03-01T09:00:00.000Z`), a naive
/// date-time (`2025-03-01T09:00:00`, taken as UTC), and a bare date
/// (`2025-03-01`, midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

serde_with_id!(Event, "_id");
