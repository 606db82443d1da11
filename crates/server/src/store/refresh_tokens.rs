//! Refresh-token repository over the in-memory store.
//!
//! A record here is what makes a refresh token live; deleting it on logout is
//! the revocation. Token signatures alone are not enough to refresh.

use chrono::{DateTime, Utc};

use market_core::UserId;

use super::Store;

/// A persisted refresh-token record, keyed by the token string.
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub token: String,
    pub user: UserId,
    pub expires_at: DateTime<Utc>,
}

/// Repository for refresh-token operations.
pub struct RefreshTokenRepository<'a> {
    store: &'a Store,
}

impl<'a> RefreshTokenRepository<'a> {
    pub(crate) const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Persist a freshly issued token.
    pub async fn insert(&self, record: RefreshTokenRecord) {
        self.store.write().await.refresh_tokens.push(record);
    }

    /// Delete a token record. Returns whether a record existed.
    pub async fn remove(&self, token: &str) -> bool {
        let mut state = self.store.write().await;
        let before = state.refresh_tokens.len();
        state.refresh_tokens.retain(|r| r.token != token);
        state.refresh_tokens.len() < before
    }

    /// Whether a live record exists for the token.
    pub async fn contains(&self, token: &str) -> bool {
        self.store
            .read()
            .await
            .refresh_tokens
            .iter()
            .any(|r| r.token == token)
    }

    /// Drop records whose expiry has passed. Returns how many were dropped.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut state = self.store.write().await;
        let before = state.refresh_tokens.len();
        state.refresh_tokens.retain(|r| r.expires_at > now);
        before - state.refresh_tokens.len()
    }
}
