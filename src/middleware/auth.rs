use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::auth::jwt::verify_token;
use crate::error::AppError;
use crate::models::user::Role;
use crate::state::AppState;

/// Identity attached to the request once the bearer token checks out.
#[derive(Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

impl AuthContext {
    /// Role gate: the caller's authority set must contain `role`.
    pub fn require(&self, role: Role) -> Result<(), AppError> {
        if self.role.authorities().contains(&role) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Requires the {} role",
                role.as_str()
            )))
        }
    }

    /// Self-service gate: the caller must be the addressed user or an admin.
    pub fn require_self_or_admin(&self, user_id: i64) -> Result<(), AppError> {
        if self.user_id == user_id {
            return Ok(());
        }
        if self.role.authorities().contains(&Role::Admin) {
            return Ok(());
        }
        Err(AppError::forbidden("Not the resource owner"))
    }
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let auth_header = match req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
    {
        Some(h) => h,
        None => return AppError::unauthorized("Missing Authorization header").into_response(),
    };

    // Expect "Bearer <token>"
    let token = match auth_header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return AppError::unauthorized("Invalid Authorization format").into_response(),
    };

    let claims = match verify_token(token, &state.config.jwt_secret) {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };

    req.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
        username: claims.username,
        role: claims.role,
    });

    next.run(req).await
}
