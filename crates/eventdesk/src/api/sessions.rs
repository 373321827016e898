//! Programme sessions (talks, workshops) within an event.

use eventdesk_protocol::EventSession;
use eventdesk_session::Storage;
use eventdesk_transport::HttpTransport;
use serde::Serialize;
use serde_json::json;

use crate::{ApiClient, ApiError, RequestDescriptor, endpoints};

impl<T: HttpTransport, S: Storage> ApiClient<T, S> {
    pub async fn create_session<B: Serialize + ?Sized>(
        &self,
        session_data: &B,
    ) -> Result<EventSession, ApiError> {
        self.fetch(
            RequestDescriptor::post(endpoints::SESSIONS)
                .json(session_data)?
                .resource("session"),
        )
        .await
    }

    pub async fn get_event_sessions(
        &self,
        event_id: &str,
    ) -> Result<Vec<EventSession>, ApiError> {
        self.fetch(
            RequestDescriptor::get(endpoints::event_sessions(event_id))
                .resource("sessions"),
        )
        .await
    }

    pub async fn get_session_by_id(
        &self,
        id: &str,
    ) -> Result<EventSession, ApiError> {
        self.fetch(
            RequestDescriptor::get(endpoints::session(id)).resource("session"),
        )
        .await
    }

    pub async fn update_session<B: Serialize + ?Sized>(
        &self,
        id: &str,
        session_data: &B,
    ) -> Result<EventSession, ApiError> {
        self.fetch(
            RequestDescriptor::put(endpoints::session(id))
                .json(session_data)?
                .resource("session"),
        )
        .await
    }

    pub async fn delete_session(&self, id: &str) -> Result<(), ApiError> {
        self.execute(RequestDescriptor::delete(endpoints::session(id)))
            .await
    }

    pub async fn add_speaker_to_session(
        &self,
        session_id: &str,
        speaker_id: &str,
    ) -> Result<EventSession, ApiError> {
        self.fetch(
            RequestDescriptor::post(endpoints::session_speaker(
                session_id, speaker_id,
            ))
            .json(&json!({}))?
            .resource("session"),
        )
        .await
    }

    pub async fn remove_speaker_from_session(
        &self,
        session_id: &str,
        speaker_id: &str,
    ) -> Result<(), ApiError> {
        self.execute(RequestDescriptor::delete(endpoints::session_speaker(
            session_id, speaker_id,
        )))
        .await
    }

    pub async fn get_sessions_by_type(
        &self,
        event_id: &str,
        session_type: &str,
    ) -> Result<Vec<EventSession>, ApiError> {
        self.fetch(
            RequestDescriptor::get(endpoints::sessions_by_type(
                event_id,
                session_type,
            ))
            .resource("sessions"),
        )
        .await
    }
}
