use eventdesk_session::Storage;
use eventdesk_transport::HttpTransport;
use serde_json::Value;

use crate::{ApiClient, ApiError, RequestDescriptor, endpoints};

impl<T: HttpTransport, S: Storage> ApiClient<T, S> {
    /// Pings the backend. Public; returns whatever status document the
    /// server sends.
    pub async fn health_check(&self) -> Result<Value, ApiError> {
        self.request(RequestDescriptor::get(endpoints::HEALTH).public())
            .await
    }
}
