//! The session value: who is logged in, and with which token.

use eventdesk_protocol::UserProfile;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "event_mgmt_token";

/// Storage key of the JSON-encoded [`UserProfile`].
pub const USER_KEY: &str = "event_mgmt_user";

/// A token paired with the profile of the user it authenticates.
///
/// Token and user are only ever written and cleared together (see
/// [`SessionStore::set_auth`](crate::SessionStore::set_auth)), so a
/// `Session` never exists with one half missing.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Opaque bearer credential, sent as `Authorization: Bearer <token>`.
    pub token: String,

    /// Profile of the user the token belongs to.
    pub user: UserProfile,
}
