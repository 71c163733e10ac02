//! OAuth2 protocol types.

use serde::{Deserialize, Serialize};

/// Authorization URL handed to the user agent, with the state it carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
}

/// Response from OAuth2 authorization callback
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorizationResponse {
    pub code: String,
    pub state: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// OAuth2 token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: Option<u64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub id_token: Option<String>,
}

/// Body and status of a successful protected resource request.
#[derive(Debug, Clone)]
pub struct ProtectedResource {
    pub status: u16,
    pub body: String,
}
