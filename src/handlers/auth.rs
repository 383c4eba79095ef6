// src/handlers/auth.rs
use axum::{extract::State, http::StatusCode, Json};
use tracing::instrument;

use crate::auth::jwt::{sign_token, TOKEN_TTL_SECONDS};
use crate::dtos::user::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::error::AppError;
use crate::state::AppState;

// POST /auth/register
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state.users.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// POST /auth/login
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state.users.login(payload).await?;
    let token = sign_token(&user, &state.config.jwt_secret)?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: TOKEN_TTL_SECONDS,
    }))
}
