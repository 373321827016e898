//! The session store: single source of truth for "who is logged in".
//!
//! The store wraps a [`Storage`] backend holding two entries, the token
//! and the serialized profile, and gives them session semantics:
//!
//! ```text
//! set_auth() ──→ [logged in] ──→ update_user() ──→ [logged in]
//!                     │                                 │
//!                     └──── logout() / HTTP 401 ────────┴──→ [logged out]
//! ```
//!
//! # Atomicity
//!
//! Writers (`set_auth`, `logout`, `update_user`) take one write lock, so
//! another writer never observes a token without its user or the other
//! way round. If storing the user fails after the token was written,
//! the token is removed again before the error is returned.
//!
//! # Failing soft on reads
//!
//! Readers never return errors. Missing, unreadable or malformed stored
//! values read as "not logged in": corrupt local state must never stop
//! the application from starting, it only sends the user back to login.

use eventdesk_protocol::{JsonCodec, UserProfile};
use parking_lot::Mutex;
use serde_json::Value;

use crate::session::{TOKEN_KEY, USER_KEY};
use crate::{MemoryStorage, Session, SessionError, Storage};

/// Role label that [`SessionStore::is_admin`] checks for.
pub const ADMIN_ROLE: &str = "admin";

/// Persists the auth token and user profile across runs.
///
/// Meant to be created once and shared (`Arc<SessionStore<_>>`) by the
/// API client and anything else that needs auth state.
pub struct SessionStore<S: Storage = MemoryStorage> {
    storage: S,
    codec: JsonCodec,
    write_lock: Mutex<()>,
}

impl SessionStore<MemoryStorage> {
    /// A store that forgets everything when the process exits.
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }
}

impl<S: Storage> SessionStore<S> {
    /// Creates a store over the given backend. Whatever session the
    /// backend already holds is picked up as-is.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            codec: JsonCodec,
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Stores a new session: token and user together.
    ///
    /// # Errors
    /// - [`SessionError::Encode`]: the profile can't be serialized;
    ///   nothing was written.
    /// - [`SessionError::Storage`]: the backend failed; any half-written
    ///   state has been rolled back.
    pub fn set_auth(
        &self,
        token: &str,
        user: &UserProfile,
    ) -> Result<(), SessionError> {
        // Encode before touching storage so an unencodable profile
        // can't leave a lone token behind.
        let user_json = self
            .codec
            .encode_string(user)
            .map_err(SessionError::Encode)?;

        let _guard = self.write_lock.lock();
        self.storage.set(TOKEN_KEY, token)?;
        if let Err(e) = self.storage.set(USER_KEY, &user_json) {
            if let Err(rollback) = self.storage.remove(TOKEN_KEY) {
                tracing::error!(
                    error = %rollback,
                    "could not roll back token after failed profile write"
                );
            }
            return Err(e);
        }

        tracing::info!(user_id = %user.id, "session stored");
        Ok(())
    }

    /// Returns the stored token. An empty string counts as no token.
    pub fn get_token(&self) -> Option<String> {
        match self.storage.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored token");
                None
            }
        }
    }

    /// Returns the stored profile, or `None` if there is none or it
    /// can't be decoded.
    pub fn get_user(&self) -> Option<UserProfile> {
        let raw = match self.storage.get(USER_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored user");
                return None;
            }
        };
        match self.codec.decode_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(error = %e, "stored user profile is malformed");
                None
            }
        }
    }

    /// Returns token and user together, or `None` unless both are present.
    pub fn session(&self) -> Option<Session> {
        let token = self.get_token()?;
        let user = self.get_user()?;
        Some(Session { token, user })
    }

    /// `true` iff a token is stored.
    ///
    /// This is presence only. Whether the server still accepts the token
    /// is discovered on the next call that comes back 401.
    pub fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }

    /// Clears token and user.
    ///
    /// Does not navigate anywhere: deciding what to show next is the
    /// caller's business. Both removals are attempted even if the first
    /// fails; the first error is returned.
    pub fn logout(&self) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock();
        let token = self.storage.remove(TOKEN_KEY);
        let user = self.storage.remove(USER_KEY);
        tracing::info!("session cleared");
        token.and(user)
    }

    /// `true` if a user is stored and their role is exactly `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.get_user().is_some_and(|user| user.has_role(role))
    }

    /// Shorthand for `has_role("admin")`.
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }

    /// Shallow-merges `partial` into the stored profile and persists it.
    ///
    /// Top-level keys of `partial` replace the stored ones; nested
    /// objects are replaced, not merged. Used after a profile edit so the
    /// session shows the new name or role without logging in again.
    ///
    /// Returns the merged profile, or `Ok(None)` when no user is stored
    /// (nothing to update; no user is created).
    ///
    /// # Errors
    /// [`SessionError::InvalidUpdate`] if `partial` isn't a JSON object or
    /// the merge breaks the profile (e.g. `"id": null`); the stored
    /// profile is left unchanged.
    pub fn update_user(
        &self,
        partial: &Value,
    ) -> Result<Option<UserProfile>, SessionError> {
        let Value::Object(patch) = partial else {
            return Err(SessionError::InvalidUpdate(format!(
                "expected a JSON object, got {partial}"
            )));
        };

        let _guard = self.write_lock.lock();
        let Some(current) = self.get_user() else {
            return Ok(None);
        };

        let mut merged = match serde_json::to_value(&current) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(SessionError::InvalidUpdate(format!(
                    "stored profile is not an object: {other}"
                )));
            }
            Err(e) => return Err(SessionError::InvalidUpdate(e.to_string())),
        };
        // The patch may spell the id `_id` while the stored copy says `id`.
        if patch.contains_key("_id") || patch.contains_key("id") {
            merged.remove("_id");
            merged.remove("id");
        }
        for (key, value) in patch {
            merged.insert(key.clone(), value.clone());
        }

        let updated: UserProfile =
            serde_json::from_value(Value::Object(merged))
                .map_err(|e| SessionError::InvalidUpdate(e.to_string()))?;
        let user_json = self
            .codec
            .encode_string(&updated)
            .map_err(SessionError::Encode)?;
        self.storage.set(USER_KEY, &user_json)?;

        tracing::debug!(user_id = %updated.id, "stored profile updated");
        Ok(Some(updated))
    }
}

// =========================================================================
// Tests
// =========================================================================
