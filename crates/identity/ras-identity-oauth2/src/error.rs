//! OAuth2 error types.

use thiserror::Error;

pub type OAuth2Result<T> = Result<T, OAuth2Error>;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum OAuth2Error {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Invalid state parameter")]
    InvalidState,

    #[error("State not found or expired")]
    StateNotFound,

    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),

    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),

    #[error("Protected resource request failed with status {status}: {body}")]
    ResourceFetchFailed { status: u16, body: String },

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Callback error: {0}")]
    CallbackError(String),

    /// Wraps a lower-level failure with a message describing what was being attempted.
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: BoxError,
    },
}

impl OAuth2Error {
    pub fn internal(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Internal {
            message: message.into(),
            source: source.into(),
        }
    }
}
