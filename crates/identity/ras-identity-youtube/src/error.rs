//! YouTube strategy error types.

use ras_identity_core::IdentityError;
use ras_identity_oauth2::OAuth2Error;
use thiserror::Error;

pub type YoutubeResult<T> = Result<T, YoutubeError>;

#[derive(Debug, Error)]
pub enum YoutubeError {
    /// The profile request never produced a usable response. Carries the
    /// client error wrapped as [`OAuth2Error::Internal`].
    #[error(transparent)]
    ProfileFetch(OAuth2Error),

    #[error("failed to parse user profile: {0}")]
    ProfileParse(#[from] ParseError),

    #[error("access token is empty")]
    MissingAccessToken,

    #[error("OAuth2 error: {0}")]
    OAuth2(#[from] OAuth2Error),

    #[error("profile verification failed: {0}")]
    Verify(#[source] IdentityError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Why a profile body could not be normalized.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

impl From<YoutubeError> for IdentityError {
    fn from(err: YoutubeError) -> Self {
        match err {
            YoutubeError::Verify(inner) => inner,
            other => IdentityError::ProviderError(other.to_string()),
        }
    }
}
