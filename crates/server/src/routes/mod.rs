//! Route handlers for the REST surface.

pub mod auth;
pub mod categories;
pub mod products;

use std::str::FromStr;

use axum::Router;
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::store::StoreError;

/// Assemble every API route.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/products", products::routes())
        .nest("/api/categories", categories::routes())
        .nest("/api/auth", auth::routes())
}

/// Body for operations that return only a confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// Parse a path id, treating garbage the same as an unknown id.
///
/// Identifiers are opaque to callers, so an unparseable one gets the same
/// 404 as an id with no record rather than leaking the id format.
pub(crate) fn parse_id<T: FromStr>(raw: &str, entity: &'static str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::Store(StoreError::NotFound(entity)))
}
