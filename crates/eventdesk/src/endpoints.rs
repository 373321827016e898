//! Endpoint paths of the backend API, relative to the base URL.
//!
//! Fixed paths are constants; parameterized ones are functions that
//! percent-encode every parameter, so an id containing `/` or `?` can't
//! escape its path segment.

use std::borrow::Cow;

fn seg(raw: &str) -> Cow<'_, str> {
    urlencoding::encode(raw)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub const USERS: &str = "/users";
pub const REGISTER: &str = "/users/register";
pub const LOGIN: &str = "/users/login";
pub const PROFILE: &str = "/users/profile";
pub const CHANGE_PASSWORD: &str = "/users/change-password";

pub fn user(id: &str) -> String {
    format!("/users/{}", seg(id))
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

pub const EVENTS: &str = "/events";

pub fn event(id: &str) -> String {
    format!("/events/{}", seg(id))
}

pub fn publish_event(id: &str) -> String {
    format!("/events/{}/publish", seg(id))
}

// ---------------------------------------------------------------------------
// Registrations
// ---------------------------------------------------------------------------

pub const REGISTRATIONS: &str = "/registrations";

pub fn registration(id: &str) -> String {
    format!("/registrations/{}", seg(id))
}

pub fn event_registrations(event_id: &str) -> String {
    format!("/registrations/event/{}", seg(event_id))
}

pub fn user_registrations(user_id: &str) -> String {
    format!("/registrations/user/{}", seg(user_id))
}

pub fn registration_status(id: &str) -> String {
    format!("/registrations/{}/status", seg(id))
}

pub fn registration_checkin(id: &str) -> String {
    format!("/registrations/{}/checkin", seg(id))
}

pub fn registration_cancel(id: &str) -> String {
    format!("/registrations/{}/cancel", seg(id))
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

pub fn event_analytics(event_id: &str) -> String {
    format!("/analytics/event/{}", seg(event_id))
}

pub fn analytics_summary(event_id: &str) -> String {
    format!("/analytics/event/{}/summary", seg(event_id))
}

pub fn analytics_generate(event_id: &str) -> String {
    format!("/analytics/event/{}/generate", seg(event_id))
}

pub fn analytics_track_view(event_id: &str) -> String {
    format!("/analytics/event/{}/track-view", seg(event_id))
}

// ---------------------------------------------------------------------------
// Sessions (programme slots)
// ---------------------------------------------------------------------------

pub const SESSIONS: &str = "/sessions";

pub fn session(id: &str) -> String {
    format!("/sessions/{}", seg(id))
}

pub fn event_sessions(event_id: &str) -> String {
    format!("/sessions/event/{}", seg(event_id))
}

pub fn sessions_by_type(event_id: &str, session_type: &str) -> String {
    format!(
        "/sessions/event/{}/type/{}",
        seg(event_id),
        seg(session_type)
    )
}

pub fn session_speaker(session_id: &str, speaker_id: &str) -> String {
    format!(
        "/sessions/{}/speakers/{}",
        seg(session_id),
        seg(speaker_id)
    )
}

// ---------------------------------------------------------------------------
// Speakers
// ---------------------------------------------------------------------------

pub const SPEAKERS: &str = "/speakers";

pub fn speaker(id: &str) -> String {
    format!("/speakers/{}", seg(id))
}

pub fn speakers_by_expertise(expertise: &str) -> String {
    format!("/speakers/expertise/{}", seg(expertise))
}

pub fn speaker_upcoming_sessions(speaker_id: &str) -> String {
    format!("/speakers/{}/sessions/upcoming", seg(speaker_id))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

pub const HEALTH: &str = "/health";
