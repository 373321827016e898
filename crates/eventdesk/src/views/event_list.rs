//! The events list: who sees which events, and the filter bar.

use chrono::{DateTime, Utc};
use eventdesk_protocol::{Event, UserProfile};
use eventdesk_session::ADMIN_ROLE;

/// Which slice of time (or which status) the list shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimeWindow {
    #[default]
    All,
    /// Start is after now.
    Upcoming,
    /// Started, not yet ended.
    Ongoing,
    /// End is before now.
    Past,
    /// Exact server status, e.g. `published` or `draft`.
    Status(String),
}

/// Filter bar state: a window plus free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub window: TimeWindow,
    pub search: Option<String>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(mut self, window: TimeWindow) -> Self {
        self.window = window;
        self
    }

    /// Case-insensitive substring over title, description and category.
    /// Blank text matches everything.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn matches(&self, event: &Event, now: DateTime<Utc>) -> bool {
        let in_window = match &self.window {
            TimeWindow::All => true,
            TimeWindow::Upcoming => event.is_upcoming(now),
            TimeWindow::Ongoing => event.is_ongoing(now),
            TimeWindow::Past => event.is_past(now),
            TimeWindow::Status(status) => {
                event.status.as_deref() == Some(status.as_str())
            }
        };
        in_window && self.matches_search(event)
    }

    /// Keeps the matching events, in their original order.
    pub fn apply<'a>(
        &self,
        events: impl IntoIterator<Item = &'a Event>,
        now: DateTime<Utc>,
    ) -> Vec<&'a Event> {
        events
            .into_iter()
            .filter(|event| self.matches(event, now))
            .collect()
    }

    fn matches_search(&self, event: &Event) -> bool {
        let Some(needle) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        else {
            return true;
        };
        let needle = needle.to_lowercase();
        [&event.title, &event.description, &event.category]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// `true` if `user_id` organizes `event`.
pub fn owned_by(event: &Event, user_id: &str) -> bool {
    event.is_organized_by(user_id)
}

/// Events `user` may see in the list.
///
/// Admins see everything. Everyone else sees their own events and
/// events without an organizer.
pub fn visible_events<'a>(
    events: &'a [Event],
    user: &UserProfile,
) -> Vec<&'a Event> {
    if user.has_role(ADMIN_ROLE) {
        return events.iter().collect();
    }
    events
        .iter()
        .filter(|event| {
            event.organizer.is_none() || owned_by(event, user.id.as_str())
        })
        .collect()
}
