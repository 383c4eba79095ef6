use async_trait::async_trait;
use sqlx::PgPool;

use super::map_unique_violation;
use crate::error::AppError;
use crate::models::product::Product;
use crate::repository::{NewProduct, Pagination, ProductRepository, SortOrder};

const COLUMNS: &str = "id, name, description, price, quantity, category_id";

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {COLUMNS} FROM products WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn insert(&self, data: &NewProduct) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (name, description, price, quantity, category_id)
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.price)
        .bind(data.quantity)
        .bind(data.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Product name already exists"))?;

        Ok(product)
    }

    async fn update(&self, product: &Product) -> Result<Product, AppError> {
        let updated = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET name = $1, description = $2, price = $3,
                    quantity = $4, category_id = $5
             WHERE id = $6 RETURNING {COLUMNS}"
        ))
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.category_id)
        .bind(product.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Product name already exists"))?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Product not found"));
        }

        Ok(())
    }

    async fn list(&self, page: Pagination) -> Result<(Vec<Product>, i64), AppError> {
        let sql = match page.sort {
            SortOrder::Asc => {
                format!("SELECT {COLUMNS} FROM products ORDER BY name ASC LIMIT $1 OFFSET $2")
            }
            SortOrder::Desc => {
                format!("SELECT {COLUMNS} FROM products ORDER BY name DESC LIMIT $1 OFFSET $2")
            }
        };

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok((products, total))
    }
}
