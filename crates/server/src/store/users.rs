//! User repository over the in-memory store.

use serde::{Deserialize, Serialize};

use market_core::UserId;

use super::{Store, StoreError};

/// Access group carried in token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserGroup {
    Admin,
    User,
}

/// An account that can log in.
///
/// Users are seeded (startup config, tests, CLI); there is no self-service
/// registration route.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    /// Argon2 PHC string, never the plain password.
    pub password_hash: String,
    pub group: UserGroup,
    pub avatar: Option<String>,
}

/// Repository for user operations.
pub struct UserRepository<'a> {
    store: &'a Store,
}

impl<'a> UserRepository<'a> {
    pub(crate) const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Insert a user.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the username is already taken.
    pub async fn create(&self, user: User) -> Result<User, StoreError> {
        let mut state = self.store.write().await;
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::Conflict("Username already taken".to_owned()));
        }
        state.users.push(user.clone());
        Ok(user)
    }

    /// Look up a user by username.
    pub async fn find_by_username(&self, username: &str) -> Option<User> {
        self.store
            .read()
            .await
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
    }

    /// Look up a user by id.
    pub async fn find(&self, id: UserId) -> Option<User> {
        self.store
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }
}
