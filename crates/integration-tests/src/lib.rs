//! Shared harness for the end-to-end tests.
//!
//! Spawns the full gateway in-process on an ephemeral port; each test gets
//! its own isolated store, so tests never share state and need no external
//! services.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::IpAddr;

use axum::http::HeaderValue;
use reqwest::Client;
use secrecy::SecretString;
use serde_json::{Value, json};

use market_server::config::ServerConfig;
use market_server::state::AppState;
use market_server::store::UserGroup;

/// Username of the account seeded into every test server.
pub const TEST_USERNAME: &str = "admin";
/// Password of the seeded account.
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// A running test server.
pub struct TestApp {
    pub base_url: String,
}

/// Spawn the gateway on an ephemeral port with one seeded user.
///
/// # Panics
///
/// Panics if the server cannot be started; tests cannot proceed without it.
pub async fn spawn_app() -> TestApp {
    let config = ServerConfig {
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        cors_origin: HeaderValue::from_static("http://localhost:5173"),
        access_token_secret: SecretString::from(
            "integration-access-secret-0123456789abcdef".to_owned(),
        ),
        refresh_token_secret: SecretString::from(
            "integration-refresh-secret-0123456789abcde".to_owned(),
        ),
        seed_admin: None,
    };
    let state = AppState::new(config);
    state
        .auth()
        .create_user(
            TEST_USERNAME,
            "admin@example.com",
            TEST_PASSWORD,
            UserGroup::Admin,
            None,
        )
        .await
        .expect("Failed to seed test user");

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    let app = market_server::app(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server error");
    });

    TestApp {
        base_url: format!("http://{addr}"),
    }
}

impl TestApp {
    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A cookie-holding client, not yet logged in.
    #[must_use]
    pub fn client(&self) -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client")
    }

    /// A client already logged in as the seeded user.
    pub async fn logged_in_client(&self) -> Client {
        let client = self.client();
        let response = client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD }))
            .send()
            .await
            .expect("Login request failed");
        assert!(response.status().is_success(), "login should succeed");
        client
    }

    /// Test helper: create a category and return its JSON record.
    pub async fn create_category(&self, client: &Client, name: &str) -> Value {
        let response = client
            .post(self.url("/api/categories"))
            .json(&json!({ "name": name }))
            .send()
            .await
            .expect("Create category request failed");
        assert_eq!(response.status().as_u16(), 201);
        response.json().await.expect("Category body")
    }

    /// Test helper: create a product in the given category.
    pub async fn create_product(&self, client: &Client, category_id: &str, name: &str) -> Value {
        let response = client
            .post(self.url("/api/products"))
            .json(&json!({
                "name": name,
                "description": "demo item",
                "category": category_id,
                "stock": 3,
                "price": 19.99,
            }))
            .send()
            .await
            .expect("Create product request failed");
        assert_eq!(response.status().as_u16(), 201);
        response.json().await.expect("Product body")
    }
}
