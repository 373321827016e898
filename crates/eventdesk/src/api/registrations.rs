//! Registrations: participants signed up for events.

use eventdesk_protocol::Registration;
use eventdesk_session::Storage;
use eventdesk_transport::HttpTransport;
use serde::Serialize;
use serde_json::json;

use crate::{ApiClient, ApiError, RequestDescriptor, endpoints};

impl<T: HttpTransport, S: Storage> ApiClient<T, S> {
    /// Submits a registration from the public event page. Sent without a
    /// token: participants don't have accounts.
    pub async fn create_registration<B: Serialize + ?Sized>(
        &self,
        registration_data: &B,
    ) -> Result<Registration, ApiError> {
        self.fetch(
            RequestDescriptor::post(endpoints::REGISTRATIONS)
                .public()
                .json(registration_data)?
                .resource("registration"),
        )
        .await
    }

    /// Looks up a registration by id, e.g. for a confirmation page.
    pub async fn get_registration(
        &self,
        id: &str,
    ) -> Result<Registration, ApiError> {
        self.fetch(
            RequestDescriptor::get(endpoints::registration(id))
                .public()
                .resource("registration"),
        )
        .await
    }

    pub async fn get_event_registrations(
        &self,
        event_id: &str,
    ) -> Result<Vec<Registration>, ApiError> {
        self.fetch(
            RequestDescriptor::get(endpoints::event_registrations(event_id))
                .resource("registrations"),
        )
        .await
    }

    pub async fn get_user_registrations(
        &self,
        user_id: &str,
    ) -> Result<Vec<Registration>, ApiError> {
        self.fetch(
            RequestDescriptor::get(endpoints::user_registrations(user_id))
                .resource("registrations"),
        )
        .await
    }

    pub async fn update_registration<B: Serialize + ?Sized>(
        &self,
        id: &str,
        registration_data: &B,
    ) -> Result<Registration, ApiError> {
        self.fetch(
            RequestDescriptor::put(endpoints::registration(id))
                .json(registration_data)?
                .resource("registration"),
        )
        .await
    }

    pub async fn update_registration_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Registration, ApiError> {
        self.fetch(
            RequestDescriptor::patch(endpoints::registration_status(id))
                .json(&json!({ "status": status }))?
                .resource("registration"),
        )
        .await
    }

    pub async fn check_in_participant(
        &self,
        id: &str,
    ) -> Result<Registration, ApiError> {
        self.fetch(
            RequestDescriptor::patch(endpoints::registration_checkin(id))
                .json(&json!({}))?
                .resource("registration"),
        )
        .await
    }

    pub async fn cancel_registration(
        &self,
        id: &str,
        reason: &str,
    ) -> Result<Registration, ApiError> {
        self.fetch(
            RequestDescriptor::patch(endpoints::registration_cancel(id))
                .json(&json!({ "cancellationReason": reason }))?
                .resource("registration"),
        )
        .await
    }
}
