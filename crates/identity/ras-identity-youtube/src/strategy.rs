//! The YouTube strategy: OAuth2 handshake delegation plus profile normalization.

use crate::config::YoutubeConfig;
use crate::error::{YoutubeError, YoutubeResult};
use crate::profile::parse_profile;
use async_trait::async_trait;
use ras_identity_core::{
    IdentityError, IdentityProvider, IdentityResult, NormalizedProfile, ProfileProvider,
    VerifiedIdentity,
};
use ras_identity_oauth2::{
    AuthorizationRequest, AuthorizationResponse, OAuth2Capability, OAuth2Client, OAuth2Error,
    TokenResponse,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Name the host routes YouTube callbacks by.
pub const STRATEGY_NAME: &str = "youtube";

/// Extra parameters for every authorization request: ask for a refresh token.
pub fn authorization_params(_options: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    BTreeMap::from([("access_type".to_string(), "offline".to_string())])
}

/// Turns a freshly fetched profile into the identity the host should trust.
#[async_trait]
pub trait ProfileVerifier: Send + Sync {
    async fn verify(
        &self,
        tokens: &TokenResponse,
        profile: NormalizedProfile,
    ) -> IdentityResult<VerifiedIdentity>;
}

/// Accepts every profile, using its `id` as the subject.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileIdentity;

#[async_trait]
impl ProfileVerifier for ProfileIdentity {
    async fn verify(
        &self,
        _tokens: &TokenResponse,
        profile: NormalizedProfile,
    ) -> IdentityResult<VerifiedIdentity> {
        Ok(VerifiedIdentity {
            provider_id: profile.provider,
            subject: profile.id,
            email: None,
            display_name: Some(profile.display_name),
            metadata: Some(serde_json::json!({
                "username": profile.username,
                "name": profile.name,
            })),
        })
    }
}

#[derive(Clone)]
pub struct YoutubeStrategy {
    config: Arc<YoutubeConfig>,
    oauth2: Arc<dyn OAuth2Capability>,
    verifier: Arc<dyn ProfileVerifier>,
}

impl YoutubeStrategy {
    pub fn new(
        config: YoutubeConfig,
        oauth2: Arc<dyn OAuth2Capability>,
        verifier: Arc<dyn ProfileVerifier>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            oauth2,
            verifier,
        }
    }

    /// Strategy backed by an [`OAuth2Client`] built from `config`.
    pub fn from_config(
        config: YoutubeConfig,
        verifier: Arc<dyn ProfileVerifier>,
    ) -> YoutubeResult<Self> {
        let client = OAuth2Client::new(config.oauth2_client_config())?;
        Ok(Self::new(config, Arc::new(client), verifier))
    }

    pub fn name(&self) -> &'static str {
        STRATEGY_NAME
    }

    pub fn config(&self) -> &YoutubeConfig {
        &self.config
    }

    /// Authorization redirect for the user agent.
    ///
    /// `extra_params` are added after [`authorization_params`] and win on
    /// conflicting keys.
    pub async fn authorization_url(
        &self,
        extra_params: &BTreeMap<String, String>,
    ) -> YoutubeResult<AuthorizationRequest> {
        let mut params = authorization_params(extra_params);
        params.extend(extra_params.iter().map(|(k, v)| (k.clone(), v.clone())));

        Ok(self.oauth2.authorize(&params).await?)
    }

    /// Fetch the profile behind `access_token` and normalize it.
    pub async fn user_profile(&self, access_token: &str) -> YoutubeResult<NormalizedProfile> {
        if access_token.trim().is_empty() {
            return Err(YoutubeError::MissingAccessToken);
        }

        let resource = self
            .oauth2
            .fetch_protected_resource(&self.config.profile_url, access_token)
            .await
            .map_err(|e| {
                YoutubeError::ProfileFetch(OAuth2Error::internal("failed to fetch user profile", e))
            })?;

        let profile = parse_profile(&resource.body)?;

        debug!(id = %profile.id, username = %profile.username, "Normalized youtube profile");
        Ok(profile)
    }

    /// Finish the authorization-code flow and hand the profile to the verifier.
    pub async fn complete_callback(
        &self,
        callback: AuthorizationResponse,
    ) -> YoutubeResult<VerifiedIdentity> {
        let tokens = self.oauth2.exchange_token(callback).await?;
        let profile = self.user_profile(&tokens.access_token).await?;

        let identity = self
            .verifier
            .verify(&tokens, profile)
            .await
            .map_err(YoutubeError::Verify)?;

        info!("Successfully verified identity for provider: {}", STRATEGY_NAME);
        Ok(identity)
    }
}

#[async_trait]
impl ProfileProvider for YoutubeStrategy {
    type Error = YoutubeError;

    fn name(&self) -> &str {
        STRATEGY_NAME
    }

    async fn user_profile(&self, access_token: &str) -> YoutubeResult<NormalizedProfile> {
        YoutubeStrategy::user_profile(self, access_token).await
    }
}

#[async_trait]
impl IdentityProvider for YoutubeStrategy {
    fn provider_id(&self) -> &str {
        STRATEGY_NAME
    }

    /// Expects the callback query parameters as a JSON object:
    /// `{"code": ..., "state": ..., "error"?: ..., "error_description"?: ...}`.
    async fn verify(&self, auth_payload: serde_json::Value) -> IdentityResult<VerifiedIdentity> {
        let callback: AuthorizationResponse =
            serde_json::from_value(auth_payload).map_err(|_| IdentityError::InvalidPayload)?;

        Ok(self.complete_callback(callback).await?)
    }
}
