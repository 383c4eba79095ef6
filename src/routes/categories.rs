use axum::{
    middleware,
    routing::get,
    Router,
};

use crate::handlers::category::{
    create_category, delete_category, get_category, get_category_by_name, list_categories,
    patch_category, update_category,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category)
                .put(update_category)
                .patch(patch_category)
                .delete(delete_category),
        )
        .route("/categories/name/{name}", get(get_category_by_name))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
