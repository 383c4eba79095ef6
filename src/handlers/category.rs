// src/handlers/category.rs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::instrument;

use crate::dtos::category::{CategoryPatchRequest, CategoryRequest, CategoryResponse};
use crate::dtos::page::{PageQuery, PageResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::user::Role;
use crate::state::AppState;

// GET /categories
pub async fn list_categories(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(page): Query<PageQuery>,
) -> Result<Json<PageResponse<CategoryResponse>>, AppError> {
    auth.require(Role::User)?;
    let categories = state.categories.list(page.pagination()).await?;
    Ok(Json(categories))
}

// GET /categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<CategoryResponse>, AppError> {
    auth.require(Role::User)?;
    let category = state.categories.get_by_id(id).await?;
    Ok(Json(category))
}

// GET /categories/name/{name}
pub async fn get_category_by_name(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(name): Path<String>,
) -> Result<Json<CategoryResponse>, AppError> {
    auth.require(Role::User)?;
    let category = state.categories.get_by_name(&name).await?;
    Ok(Json(category))
}

// POST /categories
#[instrument(skip(state, auth, payload))]
pub async fn create_category(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    auth.require(Role::Admin)?;
    let category = state.categories.create(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

// PUT /categories/{id}
#[instrument(skip(state, auth, payload), fields(id))]
pub async fn update_category(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    auth.require(Role::Admin)?;
    let category = state.categories.update_full(id, payload).await?;
    Ok(Json(category))
}

// PATCH /categories/{id}
#[instrument(skip(state, auth, payload), fields(id))]
pub async fn patch_category(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryPatchRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    auth.require(Role::Admin)?;
    let category = state.categories.update_partial(id, payload).await?;
    Ok(Json(category))
}

// DELETE /categories/{id}
#[instrument(skip(state, auth), fields(id))]
pub async fn delete_category(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require(Role::Admin)?;
    state.categories.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
