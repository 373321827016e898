//! Per-event analytics.
//!
//! The backend computes these; their shape changes with its aggregation
//! pipeline, so they are returned as raw JSON.

use eventdesk_session::Storage;
use eventdesk_transport::HttpTransport;
use serde_json::{Value, json};

use crate::{ApiClient, ApiError, RequestDescriptor, endpoints};

impl<T: HttpTransport, S: Storage> ApiClient<T, S> {
    pub async fn get_event_analytics(
        &self,
        event_id: &str,
    ) -> Result<Value, ApiError> {
        self.request(
            RequestDescriptor::get(endpoints::event_analytics(event_id))
                .resource("analytics"),
        )
        .await
    }

    pub async fn get_analytics_summary(
        &self,
        event_id: &str,
    ) -> Result<Value, ApiError> {
        self.request(
            RequestDescriptor::get(endpoints::analytics_summary(event_id))
                .resource("analytics"),
        )
        .await
    }

    /// Asks the server to recompute analytics now.
    pub async fn generate_real_time_analytics(
        &self,
        event_id: &str,
    ) -> Result<Value, ApiError> {
        self.request(
            RequestDescriptor::post(endpoints::analytics_generate(event_id))
                .json(&json!({}))?
                .resource("analytics"),
        )
        .await
    }

    /// Records one view of the event page.
    pub async fn track_event_view(&self, event_id: &str) -> Result<(), ApiError> {
        self.execute(
            RequestDescriptor::post(endpoints::analytics_track_view(event_id))
                .json(&json!({}))?,
        )
        .await
    }
}
