//! Product route handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use market_core::{ProductDraft, ProductId, ProductView};

use super::{MessageBody, parse_id};
use crate::error::{AppError, Result};
use crate::extract::ApiJson;
use crate::middleware::RequireAuth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update).delete(remove))
}

async fn create(
    State(state): State<AppState>,
    _auth: RequireAuth,
    ApiJson(draft): ApiJson<ProductDraft>,
) -> Result<(StatusCode, Json<ProductView>)> {
    validate(&draft)?;
    let view = state.store().products().create(draft).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn list(
    State(state): State<AppState>,
    _auth: RequireAuth,
) -> Result<Json<Vec<ProductView>>> {
    Ok(Json(state.store().products().find_all().await?))
}

async fn show(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<ProductView>> {
    let id: ProductId = parse_id(&id, "Product")?;
    Ok(Json(state.store().products().find(id).await?))
}

async fn update(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<String>,
    ApiJson(draft): ApiJson<ProductDraft>,
) -> Result<Json<ProductView>> {
    let id: ProductId = parse_id(&id, "Product")?;
    validate(&draft)?;
    Ok(Json(state.store().products().update(id, draft).await?))
}

async fn remove(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>> {
    let id: ProductId = parse_id(&id, "Product")?;
    state.store().products().delete(id).await?;
    Ok(Json(MessageBody {
        message: "Product deleted",
    }))
}

/// Checks beyond field presence, which serde already enforces.
fn validate(draft: &ProductDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Product name must not be empty".to_owned(),
        ));
    }
    Ok(())
}
