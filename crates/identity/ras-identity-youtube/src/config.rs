//! YouTube strategy configuration.
//!
//! Every endpoint has a default pointing at Google's legacy OAuth2 endpoints
//! and the GData profile feed, so normally only the client credentials and
//! redirect URI need to be supplied. Values can be set in code through the
//! `with_*` builders or loaded from `YOUTUBE_*` environment variables.

use crate::error::YoutubeResult;
use config::{Config as ConfigBuilder, Environment, File, FileFormat, Source};
use ras_identity_oauth2::OAuth2ClientConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_AUTHORIZATION_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.google.com/o/oauth2/token";
pub const DEFAULT_PROFILE_URL: &str =
    "https://gdata.youtube.com/feeds/api/users/default?alt=json";
pub const DEFAULT_SCOPE_SEPARATOR: &str = ",";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default = "default_authorization_url")]
    pub authorization_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_profile_url")]
    pub profile_url: String,
    #[serde(default = "default_scope_separator")]
    pub scope_separator: String,
    #[serde(default = "default_true")]
    pub use_pkce: bool,
    /// Timeout applied by the OAuth2 client to every request it makes
    #[serde(default = "default_http_timeout")]
    pub http_timeout_seconds: u64,
}

fn default_authorization_url() -> String {
    DEFAULT_AUTHORIZATION_URL.to_string()
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

fn default_profile_url() -> String {
    DEFAULT_PROFILE_URL.to_string()
}

fn default_scope_separator() -> String {
    DEFAULT_SCOPE_SEPARATOR.to_string()
}

fn default_true() -> bool {
    true
}

fn default_http_timeout() -> u64 {
    30
}

impl YoutubeConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scopes: Vec::new(),
            authorization_url: default_authorization_url(),
            token_url: default_token_url(),
            profile_url: default_profile_url(),
            scope_separator: default_scope_separator(),
            use_pkce: true,
            http_timeout_seconds: default_http_timeout(),
        }
    }

    /// Load from `YOUTUBE_*` environment variables, e.g. `YOUTUBE_CLIENT_ID`
    /// or `YOUTUBE_PROFILE_URL`. `YOUTUBE_SCOPES` is a space separated list.
    pub fn from_env() -> YoutubeResult<Self> {
        Self::load(
            Environment::with_prefix("YOUTUBE")
                .try_parsing(true)
                .list_separator(" ")
                .with_list_parse_key("scopes"),
        )
    }

    /// Parse a TOML document with the same keys as the environment loader.
    pub fn from_toml(document: &str) -> YoutubeResult<Self> {
        Self::load(File::from_str(document, FileFormat::Toml))
    }

    fn load<S>(source: S) -> YoutubeResult<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let config = ConfigBuilder::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_authorization_url(mut self, url: impl Into<String>) -> Self {
        self.authorization_url = url.into();
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = url.into();
        self
    }

    pub fn with_scope_separator(mut self, separator: impl Into<String>) -> Self {
        self.scope_separator = separator.into();
        self
    }

    pub fn with_pkce(mut self, enabled: bool) -> Self {
        self.use_pkce = enabled;
        self
    }

    pub fn with_http_timeout(mut self, seconds: u64) -> Self {
        self.http_timeout_seconds = seconds;
        self
    }

    /// Settings for the generic OAuth2 client backing the strategy.
    pub fn oauth2_client_config(&self) -> OAuth2ClientConfig {
        OAuth2ClientConfig::new(
            self.client_id.clone(),
            self.client_secret.clone(),
            self.authorization_url.clone(),
            self.token_url.clone(),
            self.redirect_uri.clone(),
        )
        .with_scopes(self.scopes.iter().cloned())
        .with_scope_separator(self.scope_separator.clone())
        .with_pkce(self.use_pkce)
        .with_http_timeout(self.http_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Removes every variable it set when dropped.
    struct EnvVarGuard {
        vars: Vec<String>,
    }

    impl EnvVarGuard {
        fn new() -> Self {
            Self { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            unsafe {
                std::env::set_var(key, value);
            }
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            for key in &self.vars {
                unsafe {
                    std::env::remove_var(key);
                }
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = YoutubeConfig::new("id", "secret", "http://localhost:3000/callback");

        assert_eq!(config.authorization_url, DEFAULT_AUTHORIZATION_URL);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.profile_url, DEFAULT_PROFILE_URL);
        assert_eq!(config.scope_separator, ",");
    }

    #[test]
    fn test_from_toml_fills_defaults() {
        let config = YoutubeConfig::from_toml(
            r#"
            client_id = "abc.apps.googleusercontent.com"
            client_secret = "shh"
            redirect_uri = "http://localhost:3000/auth/youtube/callback"
            scopes = ["https://gdata.youtube.com"]
            profile_url = "http://127.0.0.1:8080/profile"
            "#,
        )
        .unwrap();

        assert_eq!(config.client_id, "abc.apps.googleusercontent.com");
        assert_eq!(config.scopes, vec!["https://gdata.youtube.com"]);
        assert_eq!(config.profile_url, "http://127.0.0.1:8080/profile");
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.scope_separator, DEFAULT_SCOPE_SEPARATOR);
        assert!(config.use_pkce);
    }

    #[test]
    #[serial_test::serial(env_change)]
    fn test_from_env_reads_prefixed_variables() {
        let mut env = EnvVarGuard::new();
        env.set("YOUTUBE_CLIENT_ID", "env-client-id");
        env.set("YOUTUBE_CLIENT_SECRET", "env-secret");
        env.set("YOUTUBE_REDIRECT_URI", "http://localhost:3000/auth/youtube/callback");
        env.set("YOUTUBE_SCOPES", "a b");

        let config = YoutubeConfig::from_env().unwrap();

        assert_eq!(config.client_id, "env-client-id");
        assert_eq!(config.client_secret, "env-secret");
        assert_eq!(config.redirect_uri, "http://localhost:3000/auth/youtube/callback");
        assert_eq!(config.scopes, vec!["a", "b"]);
        assert_eq!(config.authorization_url, DEFAULT_AUTHORIZATION_URL);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.profile_url, DEFAULT_PROFILE_URL);
        assert_eq!(config.scope_separator, DEFAULT_SCOPE_SEPARATOR);
        assert!(config.use_pkce);
    }

    #[test]
    fn test_from_toml_requires_credentials() {
        assert!(YoutubeConfig::from_toml(r#"redirect_uri = "http://localhost""#).is_err());
    }

    #[test]
    fn test_oauth2_client_config_projection() {
        let client_config = YoutubeConfig::new("id", "secret", "http://localhost/cb")
            .with_scopes(["a", "b"])
            .with_token_url("http://127.0.0.1/token")
            .oauth2_client_config();

        assert_eq!(client_config.token_url, "http://127.0.0.1/token");
        assert_eq!(client_config.authorization_url, DEFAULT_AUTHORIZATION_URL);
        assert_eq!(client_config.scope_param().as_deref(), Some("a,b"));
        assert!(client_config.auth_params.is_empty());
    }
}
