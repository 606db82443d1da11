//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MARKET_ACCESS_TOKEN_SECRET` - Access-token signing secret (min 32 chars)
//! - `MARKET_REFRESH_TOKEN_SECRET` - Refresh-token signing secret (min 32 chars)
//!
//! ## Optional
//! - `MARKET_HOST` - Bind address (default: 127.0.0.1)
//! - `MARKET_PORT` - Listen port (default: 5000)
//! - `MARKET_CORS_ORIGIN` - Allowed browser origin (default: <http://localhost:5173>)
//! - `MARKET_ADMIN_USERNAME` / `MARKET_ADMIN_EMAIL` / `MARKET_ADMIN_PASSWORD` -
//!   account seeded at startup; all three must be set together

use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderValue;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Browser origin allowed to send credentialed requests
    pub cors_origin: HeaderValue,
    /// Access-token signing secret
    pub access_token_secret: SecretString,
    /// Refresh-token signing secret
    pub refresh_token_secret: SecretString,
    /// Account created at startup, if configured
    pub seed_admin: Option<SeedAdmin>,
}

/// Initial account created at startup.
///
/// There is no self-service registration route, so the first login always
/// goes through a seeded account.
#[derive(Debug, Clone)]
pub struct SeedAdmin {
    pub username: String,
    pub email: String,
    pub password: SecretString,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid, or
    /// if a signing secret is shorter than 32 characters.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let host = optional_var("MARKET_HOST")
            .map_or(Ok(IpAddr::from([127, 0, 0, 1])), |raw| {
                raw.parse().map_err(|_| {
                    ConfigError::InvalidEnvVar("MARKET_HOST".to_owned(), raw)
                })
            })?;

        let port = optional_var("MARKET_PORT").map_or(Ok(5000), |raw| {
            raw.parse().map_err(|_| {
                ConfigError::InvalidEnvVar("MARKET_PORT".to_owned(), raw)
            })
        })?;

        let cors_origin = optional_var("MARKET_CORS_ORIGIN")
            .unwrap_or_else(|| "http://localhost:5173".to_owned());
        let cors_origin = cors_origin.parse::<HeaderValue>().map_err(|_| {
            ConfigError::InvalidEnvVar("MARKET_CORS_ORIGIN".to_owned(), cors_origin)
        })?;

        Ok(Self {
            host,
            port,
            cors_origin,
            access_token_secret: required_secret("MARKET_ACCESS_TOKEN_SECRET")?,
            refresh_token_secret: required_secret("MARKET_REFRESH_TOKEN_SECRET")?,
            seed_admin: seed_admin_from_env()?,
        })
    }

    /// The socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn required_var(name: &str) -> Result<String, ConfigError> {
    optional_var(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_owned()))
}

fn required_secret(name: &str) -> Result<SecretString, ConfigError> {
    let value = required_var(name)?;
    if value.len() < MIN_TOKEN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            name.to_owned(),
            format!("must be at least {MIN_TOKEN_SECRET_LENGTH} characters"),
        ));
    }
    Ok(SecretString::from(value))
}

fn seed_admin_from_env() -> Result<Option<SeedAdmin>, ConfigError> {
    let username = optional_var("MARKET_ADMIN_USERNAME");
    let email = optional_var("MARKET_ADMIN_EMAIL");
    let password = optional_var("MARKET_ADMIN_PASSWORD");

    match (username, email, password) {
        (Some(username), Some(email), Some(password)) => Ok(Some(SeedAdmin {
            username,
            email,
            password: SecretString::from(password),
        })),
        (None, None, None) => Ok(None),
        _ => Err(ConfigError::InvalidEnvVar(
            "MARKET_ADMIN_*".to_owned(),
            "username, email, and password must be set together".to_owned(),
        )),
    }
}

/// Expose a secret for signing-key construction.
#[must_use]
pub fn secret_bytes(secret: &SecretString) -> &[u8] {
    secret.expose_secret().as_bytes()
}
