// src/handlers/movement.rs
use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::NaiveDate;

use crate::dtos::movement::MovementResponse;
use crate::dtos::page::{PageQuery, PageResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::user::Role;
use crate::state::AppState;

// GET /movements
pub async fn list_movements(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(page): Query<PageQuery>,
) -> Result<Json<PageResponse<MovementResponse>>, AppError> {
    auth.require(Role::User)?;
    let movements = state.movements.list(page.pagination()).await?;
    Ok(Json(movements))
}

// GET /movements/type/{type}
pub async fn list_movements_by_type(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(movement_type): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<Json<PageResponse<MovementResponse>>, AppError> {
    auth.require(Role::User)?;
    let movements = state
        .movements
        .list_by_type(&movement_type, page.pagination())
        .await?;
    Ok(Json(movements))
}

// GET /movements/description/{description}
pub async fn list_movements_by_description(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(description): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<Json<PageResponse<MovementResponse>>, AppError> {
    auth.require(Role::User)?;
    let movements = state
        .movements
        .list_by_description(&description, page.pagination())
        .await?;
    Ok(Json(movements))
}

// GET /movements/product/{product_id}
pub async fn list_movements_by_product(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(product_id): Path<i64>,
    Query(page): Query<PageQuery>,
) -> Result<Json<PageResponse<MovementResponse>>, AppError> {
    auth.require(Role::User)?;
    let movements = state
        .movements
        .list_by_product(product_id, page.pagination())
        .await?;
    Ok(Json(movements))
}

// GET /movements/date/{start}/{end}
pub async fn list_movements_by_date(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path((start, end)): Path<(NaiveDate, NaiveDate)>,
    Query(page): Query<PageQuery>,
) -> Result<Json<PageResponse<MovementResponse>>, AppError> {
    auth.require(Role::User)?;
    let movements = state
        .movements
        .list_by_date_range(start, end, page.pagination())
        .await?;
    Ok(Json(movements))
}
