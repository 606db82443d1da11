//! HTTP client over the REST surface.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use market_core::{Category, CategoryDraft, CategoryId, ProductDraft, ProductId, ProductView};

/// Bound on every request round-trip; a hung call fails with
/// [`ClientError::Timeout`] instead of hanging its caller.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the gateway.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request did not complete within the bounded timeout.
    #[error("request timed out")]
    Timeout,

    /// The gateway answered with an error body.
    #[error("api error ({status}): {message}")]
    Api {
        status: StatusCode,
        message: String,
    },

    /// Transport-level failure below the HTTP protocol.
    #[error("http error: {0}")]
    Http(reqwest::Error),

    /// The client itself could not be constructed.
    #[error("failed to build http client: {0}")]
    Build(reqwest::Error),
}

/// Shape of every gateway error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for the Market REST surface.
///
/// Holds the `accessToken`/`refreshToken` cookies set by login, so one
/// client instance is one session.
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for a gateway at `base_url` (no trailing slash
    /// needed).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Build)?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Log in; on success the auth cookies are retained for later calls.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with the gateway's message for a
    /// rejected login.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    /// Log out, revoking the refresh token server-side.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] if no session is active.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/logout"))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    /// Ask the gateway for a fresh access-token cookie.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] if the refresh token is missing or no
    /// longer live.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/api/auth/refresh"))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Fetch every product, categories populated.
    pub async fn products(&self) -> Result<Vec<ProductView>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/products"))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?.json().await.map_err(transport)
    }

    /// Fetch one product by id.
    pub async fn product(&self, id: ProductId) -> Result<ProductView, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/api/products/{id}")))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?.json().await.map_err(transport)
    }

    /// Create a product, returning the server's representation.
    pub async fn create_product(&self, draft: &ProductDraft) -> Result<ProductView, ClientError> {
        let response = self
            .http
            .post(self.url("/api/products"))
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        check(response).await?.json().await.map_err(transport)
    }

    /// Replace a product's mutable fields.
    pub async fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<ProductView, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/api/products/{id}")))
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        check(response).await?.json().await.map_err(transport)
    }

    /// Delete a product by id.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/products/{id}")))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Fetch every category.
    pub async fn categories(&self) -> Result<Vec<Category>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/categories"))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?.json().await.map_err(transport)
    }

    /// Create a category, returning the server's representation.
    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ClientError> {
        let response = self
            .http
            .post(self.url("/api/categories"))
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        check(response).await?.json().await.map_err(transport)
    }

    /// Replace a category's name.
    pub async fn update_category(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Category, ClientError> {
        let response = self
            .http
            .put(self.url(&format!("/api/categories/{id}")))
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        check(response).await?.json().await.map_err(transport)
    }

    /// Delete a category by id.
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/api/categories/{id}")))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into [`ClientError::Api`] with the gateway's
/// message.
async fn check(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response
        .json::<ErrorBody>()
        .await
        .map_or_else(|_| status.to_string(), |body| body.error);
    Err(ClientError::Api { status, message })
}

fn transport(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Http(err)
    }
}
