//! Authentication error types.

use thiserror::Error;

use super::tokens::TokenError;
use crate::store::StoreError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login username has no account.
    #[error("User not found")]
    UserNotFound,

    /// Password does not match the stored hash.
    #[error("Invalid password")]
    InvalidPassword,

    /// Logout request without a refresh token cookie.
    #[error("No refresh token provided")]
    MissingRefreshToken,

    /// Refresh token is unknown, revoked, or mis-signed.
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Username is already taken (seeding).
    #[error("Username already taken")]
    UserAlreadyExists,

    /// Password hashing or hash parsing failed.
    #[error("password hashing error")]
    PasswordHash,

    /// Token signing failed.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Entity store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}
