//! OAuth2 client configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Endpoints and credentials for one OAuth2 authorization server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuth2ClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub authorization_url: String,
    pub token_url: String,
    pub redirect_uri: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Joins `scopes` in the `scope` query parameter.
    #[serde(default = "default_scope_separator")]
    pub scope_separator: String,
    /// Fixed parameters appended to every authorization request
    #[serde(default)]
    pub auth_params: BTreeMap<String, String>,
    #[serde(default = "default_true")]
    pub use_pkce: bool,
    #[serde(default = "default_state_ttl")]
    pub state_ttl_seconds: u64,
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

fn default_scope_separator() -> String {
    " ".to_string()
}

fn default_true() -> bool {
    true
}

fn default_state_ttl() -> u64 {
    600 // 10 minutes
}

fn default_http_timeout() -> u64 {
    30
}

impl OAuth2ClientConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        authorization_url: impl Into<String>,
        token_url: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            authorization_url: authorization_url.into(),
            token_url: token_url.into(),
            redirect_uri: redirect_uri.into(),
            scopes: Vec::new(),
            scope_separator: default_scope_separator(),
            auth_params: BTreeMap::new(),
            use_pkce: true,
            state_ttl_seconds: default_state_ttl(),
            http_timeout_seconds: default_http_timeout(),
        }
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scope_separator(mut self, separator: impl Into<String>) -> Self {
        self.scope_separator = separator.into();
        self
    }

    pub fn with_auth_params(mut self, params: BTreeMap<String, String>) -> Self {
        self.auth_params.extend(params);
        self
    }

    pub fn with_pkce(mut self, enabled: bool) -> Self {
        self.use_pkce = enabled;
        self
    }

    pub fn with_state_ttl(mut self, seconds: u64) -> Self {
        self.state_ttl_seconds = seconds;
        self
    }

    pub fn with_http_timeout(mut self, seconds: u64) -> Self {
        self.http_timeout_seconds = seconds;
        self
    }

    /// Scope parameter value, or `None` when no scopes are configured.
    pub fn scope_param(&self) -> Option<String> {
        if self.scopes.is_empty() {
            None
        } else {
            Some(self.scopes.join(&self.scope_separator))
        }
    }
}
