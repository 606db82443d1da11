//! In-memory entity store.
//!
//! The store owns the authoritative Product, Category, User, and
//! refresh-token collections. Handlers never touch the collections directly;
//! they go through the per-entity repositories, and the store handle is
//! injected via [`AppState`](crate::state::AppState) rather than living in a
//! global.
//!
//! All collections sit behind a single `RwLock`. Multi-entity operations
//! (the category-existence check before a product write, the reference check
//! before a category delete) therefore run in one critical section and cannot
//! race a concurrent mutation.

pub mod categories;
pub mod products;
pub mod refresh_tokens;
pub mod users;

pub use categories::CategoryRepository;
pub use products::ProductRepository;
pub use refresh_tokens::{RefreshTokenRecord, RefreshTokenRepository};
pub use users::{User, UserGroup, UserRepository};

use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use market_core::{Category, Product};

/// Errors that can occur during entity store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Requested entity was not found.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A referenced entity does not resolve.
    #[error("{0} does not exist")]
    InvalidReference(&'static str),

    /// Constraint violation (e.g., deleting a referenced category).
    #[error("{0}")]
    Conflict(String),

    /// Data in the store is corrupted or inconsistent.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// The collections owned by the store, guarded together.
#[derive(Debug, Default)]
pub(crate) struct Collections {
    pub(crate) products: Vec<Product>,
    pub(crate) categories: Vec<Category>,
    pub(crate) users: Vec<User>,
    pub(crate) refresh_tokens: Vec<RefreshTokenRecord>,
}

/// In-memory authoritative entity collections.
#[derive(Debug, Default)]
pub struct Store {
    collections: RwLock<Collections>,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository over the product collection.
    #[must_use]
    pub const fn products(&self) -> ProductRepository<'_> {
        ProductRepository::new(self)
    }

    /// Repository over the category collection.
    #[must_use]
    pub const fn categories(&self) -> CategoryRepository<'_> {
        CategoryRepository::new(self)
    }

    /// Repository over the user collection.
    #[must_use]
    pub const fn users(&self) -> UserRepository<'_> {
        UserRepository::new(self)
    }

    /// Repository over the refresh-token collection.
    #[must_use]
    pub const fn refresh_tokens(&self) -> RefreshTokenRepository<'_> {
        RefreshTokenRepository::new(self)
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.collections.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.collections.write().await
    }
}
