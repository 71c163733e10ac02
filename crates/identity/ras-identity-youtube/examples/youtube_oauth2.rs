//! Example showing how to wire up the YouTube strategy
//!
//! Reads `YOUTUBE_CLIENT_ID`, `YOUTUBE_CLIENT_SECRET` and `YOUTUBE_REDIRECT_URI`
//! (a `.env` file works too), prints the authorization URL, and when
//! `YOUTUBE_ACCESS_TOKEN` is set fetches and prints the normalized profile.

use anyhow::{Context, Result};
use ras_identity_youtube::{
    ProfileIdentity, YoutubeConfig, YoutubeStrategy, map_profile_fields_to_query,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dotenvy::dotenv().ok();

    let config = YoutubeConfig::from_env().context("Failed to load YOUTUBE_* configuration")?;
    let strategy = YoutubeStrategy::from_config(config, Arc::new(ProfileIdentity))?;
    info!("YouTube strategy '{}' initialized", strategy.name());

    let request = strategy.authorization_url(&BTreeMap::new()).await?;
    println!("Authorization URL: {}", request.url);
    println!("State: {}", request.state);
    println!(
        "Profile fields for [id, displayName, name]: {}",
        map_profile_fields_to_query(&["id", "displayName", "name"])
    );

    match std::env::var("YOUTUBE_ACCESS_TOKEN") {
        Ok(token) => {
            let profile = strategy.user_profile(&token).await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Err(_) => {
            println!("\nSet YOUTUBE_ACCESS_TOKEN to fetch the profile behind a token.");
        }
    }

    Ok(())
}
