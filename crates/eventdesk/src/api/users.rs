//! Users: authentication, the caller's own profile, and account admin.

use eventdesk_protocol::{Credentials, UserProfile};
use eventdesk_session::{Session, Storage};
use eventdesk_transport::HttpTransport;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::envelope::{self, message_field};
use crate::{ApiClient, ApiError, RequestDescriptor, endpoints};

impl<T: HttpTransport, S: Storage> ApiClient<T, S> {
    /// Logs in and stores the new session.
    ///
    /// Token and user may sit at the top of the response or inside its
    /// `data` envelope.
    ///
    /// # Errors
    /// [`ApiError::InvalidResponse`] if the response lacks either the
    /// token or the user; nothing is stored in that case.
    pub async fn login(
        &self,
        credentials: &Credentials,
    ) -> Result<Session, ApiError> {
        let request = RequestDescriptor::post(endpoints::LOGIN)
            .public()
            .json(credentials)?;
        let reply = self.exchange(&request).await?;

        let (token, user) = auth_payload(reply.status, reply.body)?
            .ok_or_else(|| {
                ApiError::InvalidResponse(
                    "login response is missing the token or the user".into(),
                )
            })?;
        self.session().set_auth(&token, &user)?;
        tracing::info!(user_id = %user.id, "logged in");
        Ok(Session { token, user })
    }

    /// Creates an account.
    ///
    /// When the server answers with a token and user, the new account is
    /// logged in right away and its session returned. Otherwise the
    /// caller has to [`login`](Self::login) separately.
    pub async fn register<B: Serialize + ?Sized>(
        &self,
        user_data: &B,
    ) -> Result<Option<Session>, ApiError> {
        let request = RequestDescriptor::post(endpoints::REGISTER)
            .public()
            .json(user_data)?;
        let reply = self.exchange(&request).await?;

        let Some((token, user)) = auth_payload(reply.status, reply.body)? else {
            tracing::info!("account registered");
            return Ok(None);
        };
        self.session().set_auth(&token, &user)?;
        tracing::info!(user_id = %user.id, "account registered and logged in");
        Ok(Some(Session { token, user }))
    }

    /// Clears the stored session. No request is sent.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session().logout()?;
        Ok(())
    }

    pub async fn get_profile(&self) -> Result<UserProfile, ApiError> {
        self.fetch(RequestDescriptor::get(endpoints::PROFILE).resource("user"))
            .await
    }

    /// Saves profile changes and merges the result into the session, so
    /// the new name or role shows up without logging in again.
    pub async fn update_profile<B: Serialize + ?Sized>(
        &self,
        profile_data: &B,
    ) -> Result<UserProfile, ApiError> {
        let request = RequestDescriptor::put(endpoints::PROFILE)
            .json(profile_data)?
            .resource("user");
        let payload = self.request(request).await?;
        let profile: UserProfile = envelope::decode(payload.clone())?;
        self.session().update_user(&payload)?;
        Ok(profile)
    }

    pub async fn change_password<B: Serialize + ?Sized>(
        &self,
        password_data: &B,
    ) -> Result<(), ApiError> {
        self.execute(
            RequestDescriptor::put(endpoints::CHANGE_PASSWORD)
                .json(password_data)?,
        )
        .await
    }

    pub async fn get_all_users(&self) -> Result<Vec<UserProfile>, ApiError> {
        self.fetch(RequestDescriptor::get(endpoints::USERS).resource("users"))
            .await
    }

    pub async fn get_user_by_id(
        &self,
        id: &str,
    ) -> Result<UserProfile, ApiError> {
        self.fetch(RequestDescriptor::get(endpoints::user(id)).resource("user"))
            .await
    }

    pub async fn update_user<B: Serialize + ?Sized>(
        &self,
        id: &str,
        user_data: &B,
    ) -> Result<UserProfile, ApiError> {
        self.fetch(
            RequestDescriptor::put(endpoints::user(id))
                .json(user_data)?
                .resource("user"),
        )
        .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        self.execute(RequestDescriptor::delete(endpoints::user(id))).await
    }
}

/// Pulls `token` and `user` out of a login/register response.
///
/// `Ok(None)` when either is missing. A `success: false` envelope is an
/// error even on a 2xx status.
fn auth_payload(
    status: u16,
    body: Option<Value>,
) -> Result<Option<(String, UserProfile)>, ApiError> {
    let Some(Value::Object(mut root)) = body else {
        return Ok(None);
    };
    if root.get("success") == Some(&Value::Bool(false)) {
        let message = message_field(&root)
            .unwrap_or_else(|| format!("HTTP Error: {status}"));
        return Err(ApiError::Http { status, message });
    }

    let mut data = match root.remove("data") {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    let mut take = |key: &str| {
        root.remove(key)
            .filter(|v| !v.is_null())
            .or_else(|| data.remove(key).filter(|v| !v.is_null()))
    };
    let token = take("token");
    let user = take("user");

    match (token, user) {
        (Some(Value::String(token)), Some(user)) if !token.is_empty() => {
            Ok(Some((token, envelope::decode(user)?)))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_auth_payload_at_root() {
        let body = json!({ "token": "abc", "user": { "_id": "1", "role": "organizer" } });

        let (token, user) = auth_payload(200, Some(body)).unwrap().unwrap();

        assert_eq!(token, "abc");
        assert_eq!(user.id, "1");
    }

    #[test]
    fn test_auth_payload_inside_data() {
        let body = json!({
            "success": true,
            "data": { "token": "abc", "user": { "id": "1" } }
        });

        let (token, user) = auth_payload(200, Some(body)).unwrap().unwrap();

        assert_eq!(token, "abc");
        assert_eq!(user.id, "1");
    }

    #[test]
    fn test_auth_payload_missing_half_is_none() {
        let no_user = json!({ "token": "abc" });
        let no_token = json!({ "data": { "user": { "id": "1" } } });
        let empty_token = json!({ "token": "", "user": { "id": "1" } });

        assert!(auth_payload(200, Some(no_user)).unwrap().is_none());
        assert!(auth_payload(200, Some(no_token)).unwrap().is_none());
        assert!(auth_payload(200, Some(empty_token)).unwrap().is_none());
        assert!(auth_payload(204, None).unwrap().is_none());
    }

    #[test]
    fn test_auth_payload_success_false_is_http_error() {
        let body = json!({ "success": false, "message": "Email already registered" });

        let err = auth_payload(200, Some(body)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Http);
        assert_eq!(err.to_string(), "Email already registered");
    }

    #[test]
    fn test_auth_payload_malformed_user_is_invalid_shape() {
        let body = json!({ "token": "abc", "user": "not a profile" });

        let err = auth_payload(200, Some(body)).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidResponseShape);
    }
}
