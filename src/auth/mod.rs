//! Authentication module
//!
//! Supports: API Key, Basic, and Bearer auth. The `Authenticator` applies
//! the configured style to each outgoing request.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, Location};
