//! End-to-end tests for the authentication flow.

use reqwest::StatusCode;
use reqwest::header::SET_COOKIE;
use serde_json::{Value, json};

use market_integration_tests::{TEST_PASSWORD, TEST_USERNAME, spawn_app};

/// Extract the value of a named cookie from a response's Set-Cookie headers.
fn cookie_value(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find_map(|header| {
            let (pair, _) = header.split_once(';').unwrap_or((header, ""));
            let (cookie_name, value) = pair.split_once('=')?;
            (cookie_name == name).then(|| value.to_owned())
        })
}

#[tokio::test]
async fn login_sets_both_cookies_and_unlocks_the_catalog() {
    let app = spawn_app().await;
    let client = app.client();

    let response = client
        .post(app.url("/api/auth/login"))
        .json(&json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD }))
        .send()
        .await
        .expect("login request");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(cookie_value(&response, "accessToken").is_some());
    assert!(cookie_value(&response, "refreshToken").is_some());

    let body: Value = response.json().await.expect("login body");
    assert_eq!(body["message"], "Logged in successfully");

    // The cookie jar now carries the access token.
    let response = client
        .get(app.url("/api/products"))
        .send()
        .await
        .expect("products request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_cookie_is_access_denied() {
    let app = spawn_app().await;

    let response = app
        .client()
        .get(app.url("/api/products"))
        .send()
        .await
        .expect("products request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("error body");
    assert_eq!(body["error"], "Access denied");
}

#[tokio::test]
async fn garbage_cookie_is_invalid_token() {
    let app = spawn_app().await;

    let response = app
        .client()
        .get(app.url("/api/products"))
        .header("Cookie", "accessToken=not-a-jwt")
        .send()
        .await
        .expect("products request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("error body");
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn bad_credentials_are_distinguished() {
    let app = spawn_app().await;
    let client = app.client();

    let response = client
        .post(app.url("/api/auth/login"))
        .json(&json!({ "username": "nobody", "password": TEST_PASSWORD }))
        .send()
        .await
        .expect("login request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("error body");
    assert_eq!(body["error"], "User not found");

    let response = client
        .post(app.url("/api/auth/login"))
        .json(&json!({ "username": TEST_USERNAME, "password": "wrong" }))
        .send()
        .await
        .expect("login request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("error body");
    assert_eq!(body["error"], "Invalid password");
}

#[tokio::test]
async fn logout_without_a_refresh_cookie_is_rejected() {
    let app = spawn_app().await;

    let response = app
        .client()
        .post(app.url("/api/auth/logout"))
        .send()
        .await
        .expect("logout request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("error body");
    assert_eq!(body["error"], "No refresh token provided");
}

#[tokio::test]
async fn logout_revokes_the_refresh_token_and_replay_is_rejected() {
    let app = spawn_app().await;
    let client = app.client();

    let response = client
        .post(app.url("/api/auth/login"))
        .json(&json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD }))
        .send()
        .await
        .expect("login request");
    let refresh_token = cookie_value(&response, "refreshToken").expect("refresh cookie");

    let response = client
        .post(app.url("/api/auth/logout"))
        .send()
        .await
        .expect("logout request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("logout body");
    assert_eq!(body["message"], "Logged out successfully");

    // Replaying the old cookie after logout: the record is gone.
    let replay = format!("refreshToken={refresh_token}");
    let response = app
        .client()
        .post(app.url("/api/auth/logout"))
        .header("Cookie", replay.clone())
        .send()
        .await
        .expect("replayed logout request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("error body");
    assert_eq!(body["error"], "Invalid refresh token");

    // And it cannot mint a new access token either.
    let response = app
        .client()
        .post(app.url("/api/auth/refresh"))
        .header("Cookie", replay)
        .send()
        .await
        .expect("refresh request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("error body");
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn refresh_reissues_the_access_cookie_for_a_live_session() {
    let app = spawn_app().await;
    let client = app.logged_in_client().await;

    let response = client
        .post(app.url("/api/auth/refresh"))
        .send()
        .await
        .expect("refresh request");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(cookie_value(&response, "accessToken").is_some());

    let response = client
        .get(app.url("/api/products"))
        .send()
        .await
        .expect("products request");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn refresh_without_a_cookie_is_access_denied() {
    let app = spawn_app().await;

    let response = app
        .client()
        .post(app.url("/api/auth/refresh"))
        .send()
        .await
        .expect("refresh request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json().await.expect("error body");
    assert_eq!(body["error"], "Access denied");
}
