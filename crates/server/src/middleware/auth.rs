//! Authentication extractor for protected routes.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use crate::auth::{ACCESS_TOKEN_COOKIE, AccessClaims};
use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires a valid access token cookie.
///
/// Rejections carry the gateway's exact 401 bodies: `Access denied` when the
/// cookie is absent, `Invalid token` when it fails verification.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(claims): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", claims.username)
/// }
/// ```
pub struct RequireAuth(pub AccessClaims);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(ACCESS_TOKEN_COOKIE).ok_or(AppError::AccessDenied)?;
        let claims = state
            .keys()
            .verify_access(cookie.value())
            .map_err(|_| AppError::InvalidToken)?;
        Ok(Self(claims))
    }
}
