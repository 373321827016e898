//! Page views as plain data.
//!
//! Each view takes fetched resources and the current time and returns
//! what a page would show. No rendering, no I/O except
//! [`Dashboard::load`], which only fans out API calls.

mod dashboard;
mod event_list;

pub use dashboard::{
    Dashboard, DashboardStats, SECTION_LIMIT, recent_events, upcoming_events,
};
pub use event_list::{EventFilter, TimeWindow, owned_by, visible_events};
