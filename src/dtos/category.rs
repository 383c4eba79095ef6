// src/dtos/category.rs
use serde::{Deserialize, Serialize};

use crate::models::category::Category;

/// Body for POST /categories and PUT /categories/{id}.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub description: String,
}

/// Patch body: absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryPatchRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}
