use axum::{middleware, routing::get, Router};

use crate::handlers::movement::{
    list_movements, list_movements_by_date, list_movements_by_description,
    list_movements_by_product, list_movements_by_type,
};
use crate::middleware::auth::require_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/movements", get(list_movements))
        .route("/movements/type/{type}", get(list_movements_by_type))
        .route(
            "/movements/description/{description}",
            get(list_movements_by_description),
        )
        .route(
            "/movements/product/{product_id}",
            get(list_movements_by_product),
        )
        .route("/movements/date/{start}/{end}", get(list_movements_by_date))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
