//! Core identity provider traits and types.
//!
//! Strategies implement [`IdentityProvider`] so the host can route callbacks to
//! them by id, and [`ProfileProvider`] so the host can ask for a
//! [`NormalizedProfile`] given an access token.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod profile;

pub use profile::{NormalizedProfile, ProfileName};

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Invalid authentication payload")]
    InvalidPayload,
}

pub type IdentityResult<T> = Result<T, IdentityError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub provider_id: String,
    pub subject: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn provider_id(&self) -> &str;

    async fn verify(&self, auth_payload: serde_json::Value) -> IdentityResult<VerifiedIdentity>;
}

/// Fetches and normalizes the user profile behind an access token.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fixed strategy name the host routes on.
    fn name(&self) -> &str;

    async fn user_profile(&self, access_token: &str) -> Result<NormalizedProfile, Self::Error>;
}
