// src/handlers/user.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use tracing::instrument;

use crate::dtos::user::{RoleChangeRequest, UserPatchRequest, UserResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::user::Role;
use crate::state::AppState;

// PATCH /users/{id} - the addressed user or an admin
#[instrument(skip(state, auth, payload), fields(id))]
pub async fn patch_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(payload): Json<UserPatchRequest>,
) -> Result<Json<UserResponse>, AppError> {
    auth.require_self_or_admin(id)?;
    let user = state.users.update_partial(id, payload).await?;
    Ok(Json(user))
}

// PATCH /users/roles/{id} - admin only
#[instrument(skip(state, auth, payload), fields(id))]
pub async fn update_user_role(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
    Json(payload): Json<RoleChangeRequest>,
) -> Result<Json<UserResponse>, AppError> {
    auth.require(Role::Admin)?;
    let user = state.users.update_role(id, payload).await?;
    Ok(Json(user))
}

// DELETE /users/{id} - the addressed user or an admin
#[instrument(skip(state, auth), fields(id))]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    auth.require_self_or_admin(id)?;
    state.users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
