// src/dtos/movement.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::movement::{Movement, MovementDescription, MovementType};

#[derive(Debug, Serialize)]
pub struct MovementResponse {
    pub id: i64,
    pub product_id: Option<i64>,
    pub date: DateTime<Utc>,
    pub movement_type: MovementType,
    pub description: MovementDescription,
    pub user_id: Option<i64>,
}

impl From<Movement> for MovementResponse {
    fn from(movement: Movement) -> Self {
        Self {
            id: movement.id,
            product_id: movement.product_id,
            date: movement.date,
            movement_type: movement.movement_type,
            description: movement.description,
            user_id: movement.user_id,
        }
    }
}
