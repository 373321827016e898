//! Per-resource API methods.
//!
//! Each submodule adds an `impl` block to [`ApiClient`](crate::ApiClient)
//! for one backend resource. Methods only describe the call (verb, path,
//! body, auth, resource key) and pick the payload type; everything else
//! happens in [`ApiClient::request`](crate::ApiClient::request).

mod analytics;
mod events;
mod health;
mod registrations;
mod sessions;
mod speakers;
mod users;

pub use events::EventQuery;
