//! Auth session storage for EventDesk.
//!
//! This crate answers one question for the rest of the stack: *is
//! someone logged in, and who?*
//!
//! 1. **Storage**: where the two session entries live ([`Storage`]
//!    trait, [`MemoryStorage`], [`FileStorage`])
//! 2. **Session store**: token and profile kept consistent
//!    ([`SessionStore`])
//! 3. **Role checks**: `has_role` / `is_admin` for gating admin views
//!
//! # How it fits in the stack
//!
//! ```text
//! API Client (above)  ← attaches the token, clears the session on 401
//!     ↕
//! Session Layer (this crate)  ← owns token + user profile
//!     ↕
//! Protocol Layer (below)  ← provides UserProfile, JsonCodec
//! ```

mod error;
mod session;
mod storage;
mod store;

pub use error::SessionError;
pub use session::{Session, TOKEN_KEY, USER_KEY};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{ADMIN_ROLE, SessionStore};
