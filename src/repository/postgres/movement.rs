use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::error::AppError;
use crate::models::movement::{Movement, MovementDescription, MovementType};
use crate::repository::{MovementRepository, NewMovement, Pagination, SortOrder};

const COLUMNS: &str = "id, product_id, date, movement_type, description, user_id";

/// Raw row shape; the enum columns are TEXT and get parsed on the way out.
#[derive(FromRow)]
struct MovementRow {
    id: i64,
    product_id: Option<i64>,
    date: DateTime<Utc>,
    movement_type: String,
    description: String,
    user_id: Option<i64>,
}

impl MovementRow {
    fn into_movement(self) -> Result<Movement, AppError> {
        Ok(Movement {
            id: self.id,
            product_id: self.product_id,
            date: self.date,
            movement_type: MovementType::parse(&self.movement_type)
                .map_err(|_| AppError::internal("Corrupt movement_type column"))?,
            description: MovementDescription::parse(&self.description)
                .map_err(|_| AppError::internal("Corrupt movement description column"))?,
            user_id: self.user_id,
        })
    }
}

fn order_clause(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::Asc => "ORDER BY date ASC, id ASC",
        SortOrder::Desc => "ORDER BY date DESC, id DESC",
    }
}

fn collect(rows: Vec<MovementRow>) -> Result<Vec<Movement>, AppError> {
    rows.into_iter().map(MovementRow::into_movement).collect()
}

#[derive(Clone)]
pub struct PgMovementRepository {
    pool: PgPool,
}

impl PgMovementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovementRepository for PgMovementRepository {
    async fn insert(&self, data: &NewMovement) -> Result<Movement, AppError> {
        let row = sqlx::query_as::<_, MovementRow>(&format!(
            "INSERT INTO movements (product_id, date, movement_type, description, user_id)
             VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(data.product_id)
        .bind(data.date)
        .bind(data.movement_type.as_str())
        .bind(data.description.as_str())
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await?;

        row.into_movement()
    }

    async fn list(&self, page: Pagination) -> Result<(Vec<Movement>, i64), AppError> {
        let rows = sqlx::query_as::<_, MovementRow>(&format!(
            "SELECT {COLUMNS} FROM movements {} LIMIT $1 OFFSET $2",
            order_clause(page.sort)
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movements")
            .fetch_one(&self.pool)
            .await?;

        Ok((collect(rows)?, total))
    }

    async fn list_by_type(
        &self,
        movement_type: MovementType,
        page: Pagination,
    ) -> Result<(Vec<Movement>, i64), AppError> {
        let rows = sqlx::query_as::<_, MovementRow>(&format!(
            "SELECT {COLUMNS} FROM movements WHERE movement_type = $1 {} LIMIT $2 OFFSET $3",
            order_clause(page.sort)
        ))
        .bind(movement_type.as_str())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM movements WHERE movement_type = $1",
        )
        .bind(movement_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok((collect(rows)?, total))
    }

    async fn list_by_description(
        &self,
        description: MovementDescription,
        page: Pagination,
    ) -> Result<(Vec<Movement>, i64), AppError> {
        let rows = sqlx::query_as::<_, MovementRow>(&format!(
            "SELECT {COLUMNS} FROM movements WHERE description = $1 {} LIMIT $2 OFFSET $3",
            order_clause(page.sort)
        ))
        .bind(description.as_str())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM movements WHERE description = $1",
        )
        .bind(description.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok((collect(rows)?, total))
    }

    async fn list_by_product(
        &self,
        product_id: i64,
        page: Pagination,
    ) -> Result<(Vec<Movement>, i64), AppError> {
        let rows = sqlx::query_as::<_, MovementRow>(&format!(
            "SELECT {COLUMNS} FROM movements WHERE product_id = $1 {} LIMIT $2 OFFSET $3",
            order_clause(page.sort)
        ))
        .bind(product_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM movements WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((collect(rows)?, total))
    }

    async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        page: Pagination,
    ) -> Result<(Vec<Movement>, i64), AppError> {
        let rows = sqlx::query_as::<_, MovementRow>(&format!(
            "SELECT {COLUMNS} FROM movements WHERE date::date BETWEEN $1 AND $2 {} LIMIT $3 OFFSET $4",
            order_clause(page.sort)
        ))
        .bind(start)
        .bind(end)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM movements WHERE date::date BETWEEN $1 AND $2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        Ok((collect(rows)?, total))
    }
}
