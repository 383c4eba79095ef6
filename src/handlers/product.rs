// src/handlers/product.rs
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::instrument;

use crate::dtos::page::{PageQuery, PageResponse};
use crate::dtos::product::{ProductPatchRequest, ProductRequest, ProductResponse, QuantityRequest};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::user::Role;
use crate::state::AppState;

// GET /products - every returned row is audited as a CONSULT
#[instrument(skip(state, auth))]
pub async fn list_products(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(page): Query<PageQuery>,
) -> Result<Json<PageResponse<ProductResponse>>, AppError> {
    auth.require(Role::User)?;
    let products = state
        .products
        .list(page.pagination(), Some(auth.user_id))
        .await?;
    Ok(Json(products))
}

// GET /products/{id}
#[instrument(skip(state, auth), fields(id))]
pub async fn get_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, AppError> {
    auth.require(Role::User)?;
    let product = state.products.get_by_id(id, Some(auth.user_id)).await?;
    Ok(Json(product))
}

// GET /products/name/{name}
#[instrument(skip(state, auth))]
pub async fn get_product_by_name(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(name): Path<String>,
) -> Result<Json<ProductResponse>, AppError> {
    auth.require(Role::User)?;
    let product = state.products.get_by_name(&name, Some(auth.user_id)).await?;
    Ok(Json(product))
}

// POST /products
#[instrument(skip(state, auth, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    auth.require(Role::Admin)?;
    let product = state.products.create(payload, Some(auth.user_id)).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /products/{id}
#[instrument(skip(state, auth, payload), fields(id))]
pub async fn update_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    auth.require(Role::Admin)?;
    let product = state
        .products
        .update_full(id, payload, Some(auth.user_id))
        .await?;
    Ok(Json(product))
}

// PATCH /products/{id}
#[instrument(skip(state, auth, payload), fields(id))]
pub async fn patch_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(payload): Json<ProductPatchRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    auth.require(Role::Admin)?;
    let product = state
        .products
        .update_partial(id, payload, Some(auth.user_id))
        .await?;
    Ok(Json(product))
}

// PATCH /products/{id}/increase-quantity
#[instrument(skip(state, auth), fields(id))]
pub async fn increase_quantity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(payload): Json<QuantityRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    auth.require(Role::Admin)?;
    let product = state
        .products
        .increase_quantity(id, payload.quantity, Some(auth.user_id))
        .await?;
    Ok(Json(product))
}

// PATCH /products/{id}/decrease-quantity
#[instrument(skip(state, auth), fields(id))]
pub async fn decrease_quantity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(payload): Json<QuantityRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    auth.require(Role::Admin)?;
    let product = state
        .products
        .decrease_quantity(id, payload.quantity, Some(auth.user_id))
        .await?;
    Ok(Json(product))
}

// PATCH /products/{id}/set-quantity
#[instrument(skip(state, auth), fields(id))]
pub async fn set_quantity(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(payload): Json<QuantityRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    auth.require(Role::Admin)?;
    let product = state
        .products
        .set_quantity(id, payload.quantity, Some(auth.user_id))
        .await?;
    Ok(Json(product))
}

// DELETE /products/{id}
#[instrument(skip(state, auth), fields(id))]
pub async fn delete_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require(Role::Admin)?;
    state.products.delete(id, Some(auth.user_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
