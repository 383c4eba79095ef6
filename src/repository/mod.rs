pub mod postgres;

#[cfg(test)]
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::error::AppError;
use crate::models::category::Category;
use crate::models::movement::{Movement, MovementDescription, MovementType};
use crate::models::product::Product;
use crate::models::user::{Role, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Page request for listing queries. `page` is 1-based.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub sort: SortOrder,
}

impl Pagination {
    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page.max(1) as i64 - 1) * self.page_size as i64
    }
}

#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewMovement {
    pub product_id: i64,
    pub date: DateTime<Utc>,
    pub movement_type: MovementType,
    pub description: MovementDescription,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

pub type DynCategoryRepository = Arc<dyn CategoryRepository + Send + Sync>;
pub type DynProductRepository = Arc<dyn ProductRepository + Send + Sync>;
pub type DynMovementRepository = Arc<dyn MovementRepository + Send + Sync>;
pub type DynUserRepository = Arc<dyn UserRepository + Send + Sync>;

/// Absence is always reported as `Ok(None)`; translating it into a NotFound
/// failure is the services' job.
#[async_trait]
pub trait CategoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError>;
    async fn insert(&self, data: &NewCategory) -> Result<Category, AppError>;
    async fn update(&self, category: &Category) -> Result<Category, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    async fn list(&self, page: Pagination) -> Result<(Vec<Category>, i64), AppError>;
}

#[async_trait]
pub trait ProductRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, AppError>;
    async fn insert(&self, data: &NewProduct) -> Result<Product, AppError>;
    async fn update(&self, product: &Product) -> Result<Product, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
    async fn list(&self, page: Pagination) -> Result<(Vec<Product>, i64), AppError>;
}

/// Append-only: there is deliberately no update or delete here.
#[async_trait]
pub trait MovementRepository {
    async fn insert(&self, data: &NewMovement) -> Result<Movement, AppError>;
    async fn list(&self, page: Pagination) -> Result<(Vec<Movement>, i64), AppError>;
    async fn list_by_type(
        &self,
        movement_type: MovementType,
        page: Pagination,
    ) -> Result<(Vec<Movement>, i64), AppError>;
    async fn list_by_description(
        &self,
        description: MovementDescription,
        page: Pagination,
    ) -> Result<(Vec<Movement>, i64), AppError>;
    async fn list_by_product(
        &self,
        product_id: i64,
        page: Pagination,
    ) -> Result<(Vec<Movement>, i64), AppError>;
    async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        page: Pagination,
    ) -> Result<(Vec<Movement>, i64), AppError>;
}

#[async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn insert(&self, data: &NewUser) -> Result<User, AppError>;
    async fn update(&self, user: &User) -> Result<User, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
