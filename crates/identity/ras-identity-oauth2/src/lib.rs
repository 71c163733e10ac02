//! Generic OAuth2 authorization-code client.
//!
//! Provider strategies depend on the [`OAuth2Capability`] trait rather than on
//! a concrete client. [`OAuth2Client`] is the `reqwest`-backed implementation:
//! it builds authorization URLs (with CSRF state and optional PKCE), exchanges
//! authorization codes for tokens, and performs bearer-authenticated GETs of
//! protected resources.

mod capability;
mod client;
mod config;
mod error;
mod pkce;
mod state;
mod types;


pub use capability::OAuth2Capability;
pub use client::OAuth2Client;
pub use config::OAuth2ClientConfig;
pub use error::{OAuth2Error, OAuth2Result};
pub use pkce::PkceChallenge;
pub use state::{InMemoryStateStore, PendingAuthorization, StateStore};
pub use types::{AuthorizationRequest, AuthorizationResponse, ProtectedResource, TokenResponse};
