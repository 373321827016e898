//! The organizer dashboard.
//!
//! Three sections, each computed over the events the user organizes:
//! headline statistics, the most recently created events, and the next
//! events to start. Sections load concurrently and fail independently,
//! so a failed "recent events" call still leaves the statistics on
//! screen.

use chrono::{DateTime, Utc};
use eventdesk_protocol::Event;
use eventdesk_session::Storage;
use eventdesk_transport::HttpTransport;

use super::owned_by;
use crate::{ApiClient, ApiError};

/// How many events the recent and upcoming sections list.
pub const SECTION_LIMIT: usize = 5;

/// Headline numbers for one organizer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_events: usize,
    pub upcoming_events: usize,
    /// Sum of registrations across the organizer's events.
    pub total_participants: u64,
    pub total_revenue: f64,
    /// The soonest upcoming event, if any.
    pub next_event: Option<Event>,
}

impl DashboardStats {
    pub fn compute(events: &[Event], user_id: &str, now: DateTime<Utc>) -> Self {
        let mine: Vec<&Event> = owned(events, user_id).collect();
        Self {
            total_events: mine.len(),
            upcoming_events: mine.iter().filter(|e| e.is_upcoming(now)).count(),
            total_participants: mine.iter().map(|e| e.registrations()).sum(),
            total_revenue: mine.iter().filter_map(|e| e.revenue).sum(),
            next_event: upcoming_events(events, user_id, now, 1).pop(),
        }
    }
}

/// The user's events, newest `createdAt` first. Events without a
/// parseable creation date go last.
pub fn recent_events(events: &[Event], user_id: &str, limit: usize) -> Vec<Event> {
    let mut mine: Vec<&Event> = owned(events, user_id).collect();
    // `Option` orders `None` first, so reversing puts undated events last.
    mine.sort_by_key(|e| std::cmp::Reverse(e.created()));
    mine.into_iter().take(limit).cloned().collect()
}

/// The user's events that haven't started yet, soonest first.
pub fn upcoming_events(
    events: &[Event],
    user_id: &str,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<Event> {
    let mut upcoming: Vec<&Event> = owned(events, user_id)
        .filter(|e| e.is_upcoming(now))
        .collect();
    upcoming.sort_by_key(|e| e.starts_at());
    upcoming.into_iter().take(limit).cloned().collect()
}

fn owned<'a>(
    events: &'a [Event],
    user_id: &'a str,
) -> impl Iterator<Item = &'a Event> + 'a {
    events.iter().filter(move |e| owned_by(e, user_id))
}

/// A loaded dashboard. Each section keeps its own outcome.
#[derive(Debug)]
pub struct Dashboard {
    pub stats: Result<DashboardStats, ApiError>,
    pub recent: Result<Vec<Event>, ApiError>,
    pub upcoming: Result<Vec<Event>, ApiError>,
}

impl Dashboard {
    /// Loads all three sections for `user_id` concurrently.
    pub async fn load<T: HttpTransport, S: Storage>(
        client: &ApiClient<T, S>,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let stats = async {
            let events = client.get_all_events().await?;
            Ok::<_, ApiError>(DashboardStats::compute(&events, user_id, now))
        };
        let recent = async {
            let events = client.get_all_events().await?;
            Ok::<_, ApiError>(recent_events(&events, user_id, SECTION_LIMIT))
        };
        let upcoming = async {
            let events = client.get_all_events().await?;
            Ok::<_, ApiError>(upcoming_events(&events, user_id, now, SECTION_LIMIT))
        };

        let (stats, recent, upcoming) = tokio::join!(stats, recent, upcoming);
        for (section, failed) in [
            ("stats", stats.as_ref().err()),
            ("recent", recent.as_ref().err()),
            ("upcoming", upcoming.as_ref().err()),
        ] {
            if let Some(e) = failed {
                tracing::warn!(section, error = %e, "dashboard section failed");
            }
        }
        Self {
            stats,
            recent,
            upcoming,
        }
    }
}
