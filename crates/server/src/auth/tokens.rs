//! Signed, time-bounded access and refresh tokens.
//!
//! Both tokens are HS256 JWTs with distinct signing secrets. The access
//! token carries the profile claims the gateway needs without a store
//! lookup; the refresh token carries only the user id and is additionally
//! checked against the persisted record before it can mint a new access
//! token.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use market_core::UserId;

use crate::store::{User, UserGroup};

/// Cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
/// Cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Access tokens expire after 15 minutes.
const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;
/// Refresh tokens expire after 7 days.
const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Error signing or verifying a token.
#[derive(Debug, Error)]
#[error("token error: {0}")]
pub struct TokenError(#[from] jsonwebtoken::errors::Error);

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub username: String,
    pub email: String,
    pub group: UserGroup,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// Claims carried by a refresh token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub user_id: UserId,
    pub iat: i64,
    pub exp: i64,
}

/// Signing and verification keys for both token kinds.
pub struct TokenKeys {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
}

impl TokenKeys {
    /// Build keys from the two configured secrets.
    #[must_use]
    pub fn new(access_secret: &[u8], refresh_secret: &[u8]) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret),
            access_decoding: DecodingKey::from_secret(access_secret),
            refresh_encoding: EncodingKey::from_secret(refresh_secret),
            refresh_decoding: DecodingKey::from_secret(refresh_secret),
        }
    }

    /// Issue an access token carrying the user's profile claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if signing fails.
    pub fn issue_access(&self, user: &User) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = AccessClaims {
            username: user.username.clone(),
            email: user.email.clone(),
            group: user.group,
            avatar: user.avatar.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ACCESS_TOKEN_TTL_SECS)).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.access_encoding)?)
    }

    /// Verify an access token's signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if the token is malformed, mis-signed, or
    /// expired.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let data = decode::<AccessClaims>(token, &self.access_decoding, &Validation::default())?;
        Ok(data.claims)
    }

    /// Issue a refresh token; also returns the expiry for the store record.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if signing fails.
    pub fn issue_refresh(&self, user_id: UserId) -> Result<(String, DateTime<Utc>), TokenError> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(REFRESH_TOKEN_TTL_SECS);
        let claims = RefreshClaims {
            user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.refresh_encoding)?;
        Ok((token, expires_at))
    }

    /// Verify a refresh token's signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if the token is malformed, mis-signed, or
    /// expired.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        let data = decode::<RefreshClaims>(token, &self.refresh_decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> TokenKeys {
        TokenKeys::new(
            b"access-secret-for-tests-0123456789ab",
            b"refresh-secret-for-tests-0123456789a",
        )
    }

    fn user() -> User {
        User {
            id: UserId::generate(),
            username: "admin".to_owned(),
            email: "admin@example.com".to_owned(),
            password_hash: String::new(),
            group: UserGroup::Admin,
            avatar: None,
        }
    }

    #[test]
    fn access_token_round_trips_its_claims() {
        let keys = keys();
        let user = user();
        let token = keys.issue_access(&user).expect("issue");
        let claims = keys.verify_access(&token).expect("verify");
        assert_eq!(claims.username, user.username);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.group, user.group);
    }

    #[test]
    fn tokens_are_not_interchangeable_between_kinds() {
        let keys = keys();
        let user = user();
        let (refresh, _) = keys.issue_refresh(user.id).expect("issue");
        assert!(keys.verify_access(&refresh).is_err());
    }

    #[test]
    fn expired_access_tokens_are_rejected() {
        let keys = keys();
        let user = user();
        let past = Utc::now() - Duration::minutes(30);
        let claims = AccessClaims {
            username: user.username,
            email: user.email,
            group: user.group,
            avatar: None,
            iat: past.timestamp(),
            exp: (past + Duration::seconds(1)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &keys.access_encoding).expect("encode");
        assert!(keys.verify_access(&token).is_err());
    }

    #[test]
    fn refresh_token_verifies_against_its_own_secret_only() {
        let keys = keys();
        let other = TokenKeys::new(b"another-secret-entirely-0123456789ab", b"and-another-one-here-0123456789abcd");
        let (token, _) = keys.issue_refresh(UserId::generate()).expect("issue");
        assert!(keys.verify_refresh(&token).is_ok());
        assert!(other.verify_refresh(&token).is_err());
    }
}
