// src/state.rs
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::repository::postgres::{
    PgCategoryRepository, PgMovementRepository, PgProductRepository, PgUserRepository,
};
use crate::services::{CategoryService, MovementService, ProductService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub categories: CategoryService,
    pub products: ProductService,
    pub movements: MovementService,
    pub users: UserService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        let categories = CategoryService::new(Arc::new(PgCategoryRepository::new(pool.clone())));
        let movements = MovementService::new(Arc::new(PgMovementRepository::new(pool.clone())));
        let products = ProductService::new(
            Arc::new(PgProductRepository::new(pool.clone())),
            categories.clone(),
            movements.clone(),
        );
        let users = UserService::new(Arc::new(PgUserRepository::new(pool)));

        Self {
            categories,
            products,
            movements,
            users,
            config: Arc::new(config),
        }
    }
}
