//! Auth route handlers: login, logout, token refresh.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde::Deserialize;

use super::MessageBody;
use crate::auth::{ACCESS_TOKEN_COOKIE, AuthError, REFRESH_TOKEN_COOKIE};
use crate::error::{AppError, Result};
use crate::extract::ApiJson;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/refresh", post(refresh))
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoginPayload {
    username: String,
    password: String,
}

async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(payload): ApiJson<LoginPayload>,
) -> Result<(CookieJar, Json<MessageBody>)> {
    let tokens = state
        .auth()
        .login(&payload.username, &payload.password)
        .await?;

    let jar = jar
        .add(auth_cookie(ACCESS_TOKEN_COOKIE, tokens.access_token))
        .add(auth_cookie(REFRESH_TOKEN_COOKIE, tokens.refresh_token));

    Ok((
        jar,
        Json(MessageBody {
            message: "Logged in successfully",
        }),
    ))
}

async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageBody>)> {
    let token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .ok_or(AppError::Auth(AuthError::MissingRefreshToken))?
        .value()
        .to_owned();

    state.auth().logout(&token).await?;

    let jar = jar
        .remove(removal_cookie(ACCESS_TOKEN_COOKIE))
        .remove(removal_cookie(REFRESH_TOKEN_COOKIE));

    Ok((
        jar,
        Json(MessageBody {
            message: "Logged out successfully",
        }),
    ))
}

/// Re-issue the access token cookie from a live refresh token.
///
/// The refresh token itself is not rotated; revocation still happens only
/// through logout.
async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageBody>)> {
    let token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .ok_or(AppError::AccessDenied)?
        .value()
        .to_owned();

    let access_token = state.auth().refresh(&token).await.map_err(|e| match e {
        AuthError::InvalidRefreshToken | AuthError::UserNotFound => AppError::InvalidToken,
        other => AppError::Auth(other),
    })?;

    let jar = jar.add(auth_cookie(ACCESS_TOKEN_COOKIE, access_token));

    Ok((
        jar,
        Json(MessageBody {
            message: "Access token refreshed",
        }),
    ))
}

fn auth_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}
