//! # EventDesk
//!
//! Typed client for the event-management REST backend.
//!
//! EventDesk gives an organizer-facing application everything between
//! "the user clicked a button" and "the backend answered": a session
//! store that remembers who is logged in, one request pipeline that
//! attaches credentials, bounds every call with a deadline and turns the
//! backend's inconsistent responses into one shape, and thin typed
//! methods for each resource.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use eventdesk::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Arc::new(SessionStore::new(FileStorage::new("session.json")));
//! let client = ApiClient::builder()
//!     .config(ClientConfig::from_env()?)
//!     .build(ReqwestTransport::new()?, session)?;
//!
//! client
//!     .login(&Credentials::new("ada@example.com", "hunter2"))
//!     .await?;
//! for event in client.get_all_events().await? {
//!     println!("{}", event.title.unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure handling
//!
//! Every call returns [`ApiError`]; branch on [`ApiError::kind`]. An HTTP
//! 401 from any endpoint clears the stored session before
//! [`ErrorKind::SessionExpired`] is returned, so a stale token is never
//! sent twice.

mod api;
mod client;
mod config;
pub mod endpoints;
pub mod envelope;
mod error;
mod request;
pub mod views;

pub use api::EventQuery;
pub use client::{ApiClient, ApiClientBuilder};
pub use config::{
    BASE_URL_VAR, ClientConfig, ConfigError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT,
    LEGACY_BASE_URL_VAR, TIMEOUT_VAR,
};
pub use error::{ApiError, ErrorKind};
pub use request::RequestDescriptor;

/// Re-exports everything an application needs in one `use`.
///
/// ```rust
/// use eventdesk::prelude::*;
/// ```
pub mod prelude {
    pub use crate::views::{
        Dashboard, DashboardStats, EventFilter, TimeWindow, visible_events,
    };
    pub use crate::{
        ApiClient, ApiClientBuilder, ApiError, ClientConfig, ConfigError,
        ErrorKind, EventQuery, RequestDescriptor,
    };

    pub use eventdesk_protocol::{
        Credentials, Event, EventSession, Participant, Reference,
        Registration, ResourceId, Speaker, UserProfile,
    };
    pub use eventdesk_session::{
        FileStorage, MemoryStorage, Session, SessionError, SessionStore,
        Storage,
    };
    pub use eventdesk_transport::{
        HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport,
        TransportError,
    };
}
