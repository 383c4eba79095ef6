pub mod auth;
pub mod categories;
pub mod movements;
pub mod products;
pub mod users;

use axum::Router;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(categories::routes(state.clone()))
        .merge(products::routes(state.clone()))
        .merge(movements::routes(state.clone()))
        .merge(users::routes(state))
}
