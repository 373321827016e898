//! Events.

use eventdesk_protocol::Event;
use eventdesk_session::Storage;
use eventdesk_transport::HttpTransport;
use serde::Serialize;

use crate::{ApiClient, ApiError, RequestDescriptor, endpoints};

/// Query string for the public event listing.
///
/// Parameters are sent in insertion order and percent-encoded. Which
/// parameters the server honours is up to the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    params: Vec<(String, String)>,
}

impl EventQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an arbitrary parameter.
    pub fn param(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn status(self, status: &str) -> Self {
        self.param("status", status)
    }

    pub fn category(self, category: &str) -> Self {
        self.param("category", category)
    }

    pub fn search(self, text: &str) -> Self {
        self.param("search", text)
    }

    pub fn page(self, page: u32) -> Self {
        self.param("page", page.to_string())
    }

    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", limit.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `name=value` pairs joined with `&`, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.params
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<T: HttpTransport, S: Storage> ApiClient<T, S> {
    pub async fn get_all_events(&self) -> Result<Vec<Event>, ApiError> {
        self.fetch(RequestDescriptor::get(endpoints::EVENTS).resource("events"))
            .await
    }

    /// Published events, without authentication.
    pub async fn get_public_events(
        &self,
        query: &EventQuery,
    ) -> Result<Vec<Event>, ApiError> {
        let path = if query.is_empty() {
            endpoints::EVENTS.to_string()
        } else {
            format!("{}?{}", endpoints::EVENTS, query.to_query_string())
        };
        self.fetch(RequestDescriptor::get(path).public().resource("events"))
            .await
    }

    pub async fn get_event_by_id(&self, id: &str) -> Result<Event, ApiError> {
        self.fetch(RequestDescriptor::get(endpoints::event(id)).resource("event"))
            .await
    }

    /// One event, without authentication (public event page).
    pub async fn get_public_event(&self, id: &str) -> Result<Event, ApiError> {
        self.fetch(
            RequestDescriptor::get(endpoints::event(id))
                .public()
                .resource("event"),
        )
        .await
    }

    pub async fn create_event<B: Serialize + ?Sized>(
        &self,
        event_data: &B,
    ) -> Result<Event, ApiError> {
        self.fetch(
            RequestDescriptor::post(endpoints::EVENTS)
                .json(event_data)?
                .resource("event"),
        )
        .await
    }

    pub async fn update_event<B: Serialize + ?Sized>(
        &self,
        id: &str,
        event_data: &B,
    ) -> Result<Event, ApiError> {
        self.fetch(
            RequestDescriptor::put(endpoints::event(id))
                .json(event_data)?
                .resource("event"),
        )
        .await
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), ApiError> {
        self.execute(RequestDescriptor::delete(endpoints::event(id)))
            .await
    }

    /// Moves a draft event to `published`.
    pub async fn publish_event(&self, id: &str) -> Result<Event, ApiError> {
        self.fetch(
            RequestDescriptor::patch(endpoints::publish_event(id))
                .json(&serde_json::json!({}))?
                .resource("event"),
        )
        .await
    }
}
