use axum::{
    middleware,
    routing::{get, patch},
    Router,
};

use crate::handlers::product::{
    create_product, decrease_quantity, delete_product, get_product, get_product_by_name,
    increase_quantity, list_products, patch_product, set_quantity, update_product,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product)
                .put(update_product)
                .patch(patch_product)
                .delete(delete_product),
        )
        .route("/products/name/{name}", get(get_product_by_name))
        .route("/products/{id}/increase-quantity", patch(increase_quantity))
        .route("/products/{id}/decrease-quantity", patch(decrease_quantity))
        .route("/products/{id}/set-quantity", patch(set_quantity))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
