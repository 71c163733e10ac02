//! CSRF state tracking for in-flight authorization requests.

use crate::error::{OAuth2Error, OAuth2Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A pending authorization request, keyed by its `state` parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingAuthorization {
    pub state: String,
    pub redirect_uri: String,
    pub code_verifier: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl PendingAuthorization {
    pub fn new(redirect_uri: String, code_verifier: Option<String>, ttl_seconds: u64) -> Self {
        Self {
            state: Uuid::new_v4().to_string(),
            redirect_uri,
            code_verifier,
            expires_at: Utc::now() + Duration::seconds(ttl_seconds as i64),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[async_trait]
pub trait StateStore: Send + Sync {
    async fn store(&self, pending: PendingAuthorization) -> OAuth2Result<()>;

    /// Removes and returns the entry; a state is accepted at most once.
    async fn take(&self, state: &str) -> OAuth2Result<PendingAuthorization>;

    async fn purge_expired(&self) -> OAuth2Result<usize>;
}

#[derive(Default)]
pub struct InMemoryStateStore {
    pending: Arc<RwLock<HashMap<String, PendingAuthorization>>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pending authorizations currently held.
    pub async fn len(&self) -> usize {
        self.pending.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pending.read().await.is_empty()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn store(&self, pending: PendingAuthorization) -> OAuth2Result<()> {
        let mut entries = self.pending.write().await;
        // Abandoned logins never reach `take`, so expired entries go here
        entries.retain(|_, entry| !entry.is_expired());
        entries.insert(pending.state.clone(), pending);
        Ok(())
    }

    async fn take(&self, state: &str) -> OAuth2Result<PendingAuthorization> {
        let pending = self
            .pending
            .write()
            .await
            .remove(state)
            .ok_or(OAuth2Error::StateNotFound)?;

        if pending.is_expired() {
            return Err(OAuth2Error::StateNotFound);
        }

        Ok(pending)
    }

    async fn purge_expired(&self) -> OAuth2Result<usize> {
        let mut pending = self.pending.write().await;
        let before = pending.len();
        pending.retain(|_, entry| !entry.is_expired());
        Ok(before - pending.len())
    }
}
