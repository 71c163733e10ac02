//! `reqwest` implementation of [`OAuth2Capability`].

use crate::capability::OAuth2Capability;
use crate::config::OAuth2ClientConfig;
use crate::error::{OAuth2Error, OAuth2Result};
use crate::pkce::PkceChallenge;
use crate::state::{InMemoryStateStore, PendingAuthorization, StateStore};
use crate::types::{AuthorizationRequest, AuthorizationResponse, ProtectedResource, TokenResponse};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

/// Query parameters the client sets itself; fixed and per-request params never override them.
const RESERVED_PARAMS: &[&str] = &[
    "response_type",
    "client_id",
    "redirect_uri",
    "state",
    "scope",
    "code_challenge",
    "code_challenge_method",
];

/// Authorization-code client for a single authorization server.
#[derive(Clone)]
pub struct OAuth2Client {
    http_client: Client,
    config: Arc<OAuth2ClientConfig>,
    state_store: Arc<dyn StateStore>,
}

impl OAuth2Client {
    pub fn new(config: OAuth2ClientConfig) -> OAuth2Result<Self> {
        Self::with_state_store(config, Arc::new(InMemoryStateStore::new()))
    }

    pub fn with_state_store(
        config: OAuth2ClientConfig,
        state_store: Arc<dyn StateStore>,
    ) -> OAuth2Result<Self> {
        if config.client_id.trim().is_empty() {
            return Err(OAuth2Error::ConfigError("client_id is required".to_string()));
        }

        // Reject unusable endpoints at construction rather than on first use
        Url::parse(&config.authorization_url)?;
        Url::parse(&config.token_url)?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()?;

        Ok(Self {
            http_client,
            config: Arc::new(config),
            state_store,
        })
    }

    pub fn config(&self) -> &OAuth2ClientConfig {
        &self.config
    }

    pub fn state_store(&self) -> &Arc<dyn StateStore> {
        &self.state_store
    }

    fn authorization_url(
        &self,
        state: &str,
        pkce: Option<&PkceChallenge>,
        extra_params: &BTreeMap<String, String>,
    ) -> OAuth2Result<String> {
        let config = &self.config;
        let mut url = Url::parse(&config.authorization_url)?;

        {
            let mut params = url.query_pairs_mut();
            params.append_pair("response_type", "code");
            params.append_pair("client_id", &config.client_id);
            params.append_pair("redirect_uri", &config.redirect_uri);
            params.append_pair("state", state);

            if let Some(scope) = config.scope_param() {
                params.append_pair("scope", &scope);
            }

            if let Some(pkce) = pkce {
                params.append_pair("code_challenge", &pkce.code_challenge);
                params.append_pair("code_challenge_method", PkceChallenge::METHOD);
            }

            // Per-request params win over the configured ones
            let merged: BTreeMap<&str, &str> = config
                .auth_params
                .iter()
                .chain(extra_params)
                .map(|(key, value)| (key.as_str(), value.as_str()))
                .collect();

            for (key, value) in merged {
                if RESERVED_PARAMS.contains(&key) {
                    warn!(param = key, "Ignoring reserved authorization parameter");
                    continue;
                }
                params.append_pair(key, value);
            }
        }

        Ok(url.into())
    }
}

#[async_trait]
impl OAuth2Capability for OAuth2Client {
    async fn authorize(
        &self,
        extra_params: &BTreeMap<String, String>,
    ) -> OAuth2Result<AuthorizationRequest> {
        let pkce = self.config.use_pkce.then(PkceChallenge::generate);

        let pending = PendingAuthorization::new(
            self.config.redirect_uri.clone(),
            pkce.as_ref().map(|p| p.code_verifier.clone()),
            self.config.state_ttl_seconds,
        );
        let state = pending.state.clone();

        let url = self.authorization_url(&state, pkce.as_ref(), extra_params)?;
        self.state_store.store(pending).await?;

        debug!("Generated authorization URL for {}", self.config.authorization_url);
        Ok(AuthorizationRequest { url, state })
    }

    async fn exchange_token(&self, callback: AuthorizationResponse) -> OAuth2Result<TokenResponse> {
        if callback.state.trim().is_empty() {
            return Err(OAuth2Error::InvalidState);
        }

        let pending = self.state_store.take(&callback.state).await?;

        if let Some(error) = &callback.error {
            let description = callback
                .error_description
                .as_deref()
                .unwrap_or("No description");
            return Err(OAuth2Error::CallbackError(format!("{}: {}", error, description)));
        }

        let mut params = HashMap::new();
        params.insert("grant_type", "authorization_code");
        params.insert("code", callback.code.as_str());
        params.insert("client_id", self.config.client_id.as_str());
        params.insert("client_secret", self.config.client_secret.as_str());
        params.insert("redirect_uri", pending.redirect_uri.as_str());
        if let Some(verifier) = pending.code_verifier.as_deref() {
            params.insert("code_verifier", verifier);
        }

        let response = self
            .http_client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Token exchange failed: {}", error_text);
            return Err(OAuth2Error::TokenExchangeFailed(error_text));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| OAuth2Error::InvalidTokenResponse(e.to_string()))?;

        info!("Successfully exchanged code for tokens");
        Ok(token_response)
    }

    async fn fetch_protected_resource(
        &self,
        url: &str,
        access_token: &str,
    ) -> OAuth2Result<ProtectedResource> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(OAuth2Error::ResourceFetchFailed {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), "Fetched protected resource");
        Ok(ProtectedResource {
            status: status.as_u16(),
            body,
        })
    }
}
