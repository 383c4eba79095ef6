use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Direction of a stock-affecting event. Stored as TEXT; the API speaks the
/// upper-case names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Entry,
    Exit,
    Edited,
    None,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::Entry => "ENTRY",
            MovementType::Exit => "EXIT",
            MovementType::Edited => "EDITED",
            MovementType::None => "NONE",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.to_ascii_uppercase().as_str() {
            "ENTRY" => Ok(MovementType::Entry),
            "EXIT" => Ok(MovementType::Exit),
            "EDITED" => Ok(MovementType::Edited),
            "NONE" => Ok(MovementType::None),
            other => Err(AppError::validation(format!("Unknown movement type: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementDescription {
    Added,
    QuantityDecreased,
    QuantityIncreased,
    Edited,
    Removed,
    Consult,
}

impl MovementDescription {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementDescription::Added => "ADDED",
            MovementDescription::QuantityDecreased => "QUANTITY_DECREASED",
            MovementDescription::QuantityIncreased => "QUANTITY_INCREASED",
            MovementDescription::Edited => "EDITED",
            MovementDescription::Removed => "REMOVED",
            MovementDescription::Consult => "CONSULT",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.to_ascii_uppercase().as_str() {
            "ADDED" => Ok(MovementDescription::Added),
            "QUANTITY_DECREASED" => Ok(MovementDescription::QuantityDecreased),
            "QUANTITY_INCREASED" => Ok(MovementDescription::QuantityIncreased),
            "EDITED" => Ok(MovementDescription::Edited),
            "REMOVED" => Ok(MovementDescription::Removed),
            "CONSULT" => Ok(MovementDescription::Consult),
            other => Err(AppError::validation(format!(
                "Unknown movement description: {other}"
            ))),
        }
    }
}

/// One immutable row of the audit log. Never updated or deleted once written;
/// `product_id` detaches to NULL when the product row goes away.
#[derive(Debug, Clone, Serialize)]
pub struct Movement {
    pub id: i64,
    pub product_id: Option<i64>,
    pub date: DateTime<Utc>,
    pub movement_type: MovementType,
    pub description: MovementDescription,
    pub user_id: Option<i64>,
}
