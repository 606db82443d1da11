//! Authentication service.
//!
//! Drives the per-session state machine: `LoggedOut → LoggedIn` on a
//! successful login (password checked against its argon2 hash, both tokens
//! issued, refresh record persisted) and `LoggedIn → LoggedOut` on logout
//! (refresh record deleted, which is the revocation).

mod error;
pub mod tokens;

pub use error::AuthError;
pub use tokens::{
    ACCESS_TOKEN_COOKIE, AccessClaims, REFRESH_TOKEN_COOKIE, RefreshClaims, TokenKeys,
};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;

use market_core::UserId;

use crate::store::{RefreshTokenRecord, Store, StoreError, User, UserGroup};

/// Tokens minted by a successful login.
#[derive(Debug)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// Authentication service over the store and signing keys.
pub struct AuthService<'a> {
    store: &'a Store,
    keys: &'a TokenKeys,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(store: &'a Store, keys: &'a TokenKeys) -> Self {
        Self { store, keys }
    }

    /// Create an account with a hashed password.
    ///
    /// Used for seeding; there is no public registration route.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserAlreadyExists` if the username is taken and
    /// `AuthError::PasswordHash` if hashing fails.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        group: UserGroup,
        avatar: Option<String>,
    ) -> Result<User, AuthError> {
        let password_hash = hash_password(password)?;
        let user = User {
            id: UserId::generate(),
            username: username.to_owned(),
            email: email.to_owned(),
            password_hash,
            group,
            avatar,
        };
        self.store.users().create(user).await.map_err(|e| match e {
            StoreError::Conflict(_) => AuthError::UserAlreadyExists,
            other => AuthError::Store(other),
        })
    }

    /// Login with username and password.
    ///
    /// Issues both tokens and persists the refresh record. Refresh records
    /// whose expiry has passed are dropped here; login is the only moment
    /// the collection grows, so it is also where it gets pruned.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the username has no account and
    /// `AuthError::InvalidPassword` if the password does not match.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionTokens, AuthError> {
        let user = self
            .store
            .users()
            .find_by_username(username)
            .await
            .ok_or(AuthError::UserNotFound)?;

        verify_password(password, &user.password_hash)?;

        let purged = self.store.refresh_tokens().purge_expired(Utc::now()).await;
        if purged > 0 {
            tracing::debug!(purged, "Dropped expired refresh token records");
        }

        let access_token = self.keys.issue_access(&user)?;
        let (refresh_token, expires_at) = self.keys.issue_refresh(user.id)?;
        self.store
            .refresh_tokens()
            .insert(RefreshTokenRecord {
                token: refresh_token.clone(),
                user: user.id,
                expires_at,
            })
            .await;

        Ok(SessionTokens {
            access_token,
            refresh_token,
        })
    }

    /// Logout by revoking the refresh token record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidRefreshToken` if no record exists for the
    /// token — a replayed cookie after logout lands here.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        if self.store.refresh_tokens().remove(refresh_token).await {
            Ok(())
        } else {
            Err(AuthError::InvalidRefreshToken)
        }
    }

    /// Mint a new access token from a live refresh token.
    ///
    /// The token must verify (signature and expiry) and its record must
    /// still exist server-side; revocation wins over a valid signature.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidRefreshToken` for a mis-signed, expired,
    /// or revoked token and `AuthError::UserNotFound` if the account behind
    /// it no longer exists.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self
            .keys
            .verify_refresh(refresh_token)
            .map_err(|_| AuthError::InvalidRefreshToken)?;

        if !self.store.refresh_tokens().contains(refresh_token).await {
            return Err(AuthError::InvalidRefreshToken);
        }

        let user = self
            .store
            .users()
            .find(claims.user_id)
            .await
            .ok_or(AuthError::UserNotFound)?;

        Ok(self.keys.issue_access(&user)?)
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidPassword)
}
