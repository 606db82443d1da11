//! Application state shared across handlers.

use std::sync::Arc;

use crate::auth::{AuthService, TokenKeys};
use crate::config::{ServerConfig, secret_bytes};
use crate::store::Store;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; carries the configuration, the entity store
/// handle, and the token signing keys.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: Store,
    keys: TokenKeys,
}

impl AppState {
    /// Create application state with an empty store.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        let keys = TokenKeys::new(
            secret_bytes(&config.access_token_secret),
            secret_bytes(&config.refresh_token_secret),
        );
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: Store::new(),
                keys,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the entity store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Get a reference to the token signing keys.
    #[must_use]
    pub fn keys(&self) -> &TokenKeys {
        &self.inner.keys
    }

    /// Authentication service over this state's store and keys.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.store(), self.keys())
    }
}
