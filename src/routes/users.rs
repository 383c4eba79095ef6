use axum::{middleware, routing::patch, Router};

use crate::handlers::user::{delete_user, patch_user, update_user_role};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/users/{id}", patch(patch_user).delete(delete_user))
        .route("/users/roles/{id}", patch(update_user_role))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
