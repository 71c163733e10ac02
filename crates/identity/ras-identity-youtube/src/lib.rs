//! YouTube OAuth2 identity strategy.
//!
//! The authorization-code handshake is delegated to an
//! [`OAuth2Capability`](ras_identity_oauth2::OAuth2Capability). This crate adds
//! what is specific to YouTube: default endpoints, the `access_type=offline`
//! authorization parameter, and normalization of the GData profile feed into a
//! [`NormalizedProfile`](ras_identity_core::NormalizedProfile).
//!
//! ```no_run
//! use ras_identity_youtube::{ProfileIdentity, YoutubeConfig, YoutubeStrategy};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = YoutubeConfig::new("client-id", "client-secret", "http://localhost:3000/callback");
//! let strategy = YoutubeStrategy::from_config(config, Arc::new(ProfileIdentity))?;
//!
//! let profile = strategy.user_profile("ya29.access-token").await?;
//! println!("{} ({})", profile.display_name, profile.id);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod fields;
mod profile;
mod strategy;


pub use self::config::{
    DEFAULT_AUTHORIZATION_URL, DEFAULT_PROFILE_URL, DEFAULT_SCOPE_SEPARATOR, DEFAULT_TOKEN_URL,
    YoutubeConfig,
};
pub use error::{ParseError, YoutubeError, YoutubeResult};
pub use fields::map_profile_fields_to_query;
pub use profile::{PROVIDER, parse_profile};
pub use strategy::{
    ProfileIdentity, ProfileVerifier, STRATEGY_NAME, YoutubeStrategy, authorization_params,
};

// Re-export common types for convenience
pub use ras_identity_core::{IdentityProvider, NormalizedProfile, ProfileName, ProfileProvider};
