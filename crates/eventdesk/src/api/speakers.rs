//! Speakers.

use eventdesk_protocol::{EventSession, Speaker};
use eventdesk_session::Storage;
use eventdesk_transport::HttpTransport;
use serde::Serialize;

use crate::{ApiClient, ApiError, RequestDescriptor, endpoints};

impl<T: HttpTransport, S: Storage> ApiClient<T, S> {
    pub async fn create_speaker<B: Serialize + ?Sized>(
        &self,
        speaker_data: &B,
    ) -> Result<Speaker, ApiError> {
        self.fetch(
            RequestDescriptor::post(endpoints::SPEAKERS)
                .json(speaker_data)?
                .resource("speaker"),
        )
        .await
    }

    pub async fn get_all_speakers(&self) -> Result<Vec<Speaker>, ApiError> {
        self.fetch(
            RequestDescriptor::get(endpoints::SPEAKERS).resource("speakers"),
        )
        .await
    }

    pub async fn get_speaker_by_id(&self, id: &str) -> Result<Speaker, ApiError> {
        self.fetch(
            RequestDescriptor::get(endpoints::speaker(id)).resource("speaker"),
        )
        .await
    }

    pub async fn update_speaker<B: Serialize + ?Sized>(
        &self,
        id: &str,
        speaker_data: &B,
    ) -> Result<Speaker, ApiError> {
        self.fetch(
            RequestDescriptor::put(endpoints::speaker(id))
                .json(speaker_data)?
                .resource("speaker"),
        )
        .await
    }

    pub async fn delete_speaker(&self, id: &str) -> Result<(), ApiError> {
        self.execute(RequestDescriptor::delete(endpoints::speaker(id)))
            .await
    }

    pub async fn get_speakers_by_expertise(
        &self,
        expertise: &str,
    ) -> Result<Vec<Speaker>, ApiError> {
        self.fetch(
            RequestDescriptor::get(endpoints::speakers_by_expertise(expertise))
                .resource("speakers"),
        )
        .await
    }

    pub async fn get_speaker_upcoming_sessions(
        &self,
        speaker_id: &str,
    ) -> Result<Vec<EventSession>, ApiError> {
        self.fetch(
            RequestDescriptor::get(endpoints::speaker_upcoming_sessions(
                speaker_id,
            ))
            .resource("sessions"),
        )
        .await
    }
}
