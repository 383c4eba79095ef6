use async_trait::async_trait;
use sqlx::PgPool;

use super::map_unique_violation;
use crate::error::AppError;
use crate::models::category::Category;
use crate::repository::{CategoryRepository, NewCategory, Pagination, SortOrder};

#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description FROM categories WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn insert(&self, data: &NewCategory) -> Result<Category, AppError> {
        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description)
             VALUES ($1, $2) RETURNING id, name, description",
        )
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Category name already exists"))?;

        Ok(category)
    }

    async fn update(&self, category: &Category) -> Result<Category, AppError> {
        let updated = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $1, description = $2
             WHERE id = $3 RETURNING id, name, description",
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "Category name already exists"))?
        .ok_or_else(|| AppError::not_found("Category not found"))?;

        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Category not found"));
        }

        Ok(())
    }

    async fn list(&self, page: Pagination) -> Result<(Vec<Category>, i64), AppError> {
        let sql = match page.sort {
            SortOrder::Asc => {
                "SELECT id, name, description FROM categories ORDER BY name ASC LIMIT $1 OFFSET $2"
            }
            SortOrder::Desc => {
                "SELECT id, name, description FROM categories ORDER BY name DESC LIMIT $1 OFFSET $2"
            }
        };

        let categories = sqlx::query_as::<_, Category>(sql)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok((categories, total))
    }
}
