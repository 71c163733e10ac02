//! The capability surface strategies build on.

use crate::error::OAuth2Result;
use crate::types::{AuthorizationRequest, AuthorizationResponse, ProtectedResource, TokenResponse};
use async_trait::async_trait;
use std::collections::BTreeMap;

/// What a provider strategy needs from an OAuth2 client.
///
/// Strategies hold this as a trait object, so tests can swap in a fake that
/// serves canned resource bodies.
#[async_trait]
pub trait OAuth2Capability: Send + Sync {
    /// Build the authorization redirect, adding `extra_params` to the query.
    async fn authorize(
        &self,
        extra_params: &BTreeMap<String, String>,
    ) -> OAuth2Result<AuthorizationRequest>;

    /// Validate the callback and trade its code for tokens.
    async fn exchange_token(&self, callback: AuthorizationResponse) -> OAuth2Result<TokenResponse>;

    /// Authenticated GET of `url` using `access_token`.
    async fn fetch_protected_resource(
        &self,
        url: &str,
        access_token: &str,
    ) -> OAuth2Result<ProtectedResource>;
}
