// src/services/movement.rs
use chrono::{NaiveDate, Utc};

use crate::dtos::movement::MovementResponse;
use crate::dtos::page::PageResponse;
use crate::error::AppError;
use crate::models::movement::{Movement, MovementDescription, MovementType};
use crate::repository::{DynMovementRepository, NewMovement, Pagination};

/// Recorder for the product audit log, plus its read-only query surface.
/// Every `record` call appends exactly one row; nothing here ever updates or
/// deletes one.
#[derive(Clone)]
pub struct MovementService {
    movements: DynMovementRepository,
}

impl MovementService {
    pub fn new(movements: DynMovementRepository) -> Self {
        Self { movements }
    }

    /// Append one audit row stamped with the current time. The caller picks
    /// the type/description pair; see the product service for the mapping.
    pub async fn record(
        &self,
        product_id: i64,
        movement_type: MovementType,
        description: MovementDescription,
        user_id: Option<i64>,
    ) -> Result<(), AppError> {
        let movement = NewMovement {
            product_id,
            date: Utc::now(),
            movement_type,
            description,
            user_id,
        };

        self.movements.insert(&movement).await?;
        Ok(())
    }

    pub async fn list(&self, page: Pagination) -> Result<PageResponse<MovementResponse>, AppError> {
        let (movements, total) = self.movements.list(page).await?;
        Ok(Self::to_page(movements, page, total))
    }

    pub async fn list_by_type(
        &self,
        raw_type: &str,
        page: Pagination,
    ) -> Result<PageResponse<MovementResponse>, AppError> {
        let movement_type = MovementType::parse(raw_type)?;
        let (movements, total) = self.movements.list_by_type(movement_type, page).await?;
        Ok(Self::to_page(movements, page, total))
    }

    pub async fn list_by_description(
        &self,
        raw_description: &str,
        page: Pagination,
    ) -> Result<PageResponse<MovementResponse>, AppError> {
        let description = MovementDescription::parse(raw_description)?;
        let (movements, total) = self.movements.list_by_description(description, page).await?;
        Ok(Self::to_page(movements, page, total))
    }

    pub async fn list_by_product(
        &self,
        product_id: i64,
        page: Pagination,
    ) -> Result<PageResponse<MovementResponse>, AppError> {
        let (movements, total) = self.movements.list_by_product(product_id, page).await?;
        Ok(Self::to_page(movements, page, total))
    }

    pub async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        page: Pagination,
    ) -> Result<PageResponse<MovementResponse>, AppError> {
        if start > end {
            return Err(AppError::validation("Start date must not be after end date"));
        }

        let (movements, total) = self.movements.list_by_date_range(start, end, page).await?;
        Ok(Self::to_page(movements, page, total))
    }

    fn to_page(
        movements: Vec<Movement>,
        page: Pagination,
        total: i64,
    ) -> PageResponse<MovementResponse> {
        let items = movements.into_iter().map(MovementResponse::from).collect();
        PageResponse::new(items, page, total)
    }
}
