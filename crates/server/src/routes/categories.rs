//! Category route handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use market_core::{Category, CategoryDraft, CategoryId};

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
    ApiJson(draft): ApiJson<CategoryDraft>,
) -> Result<(StatusCode, Json<Category>)> {
    validate(&draft)?;
    let category = state.store().categories().create(draft).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn list(State(state): State<AppState>, _auth: RequireAuth) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.store().categories().find_all().await))
}

async fn show(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Category>> {
    let id: CategoryId = parse_id(&id, "Category")?;
    Ok(Json(state.store().categories().find(id).await?))
}

async fn update(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<String>,
    ApiJson(draft): ApiJson<CategoryDraft>,
) -> Result<Json<Category>> {
    let id: CategoryId = parse_id(&id, "Category")?;
    validate(&draft)?;
    Ok(Json(state.store().categories().update(id, draft).await?))
}

async fn remove(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>> {
    let id: CategoryId = parse_id(&id, "Category")?;
    state.store().categories().delete(id).await?;
    Ok(Json(MessageBody {
        message: "Category deleted",
    }))
}

fn validate(draft: &CategoryDraft) -> Result<()> {
    if draft.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Category name must not be empty".to_owned(),
        ));
    }
    Ok(())
}
