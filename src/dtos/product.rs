// src/dtos/product.rs
use serde::{Deserialize, Serialize};

use crate::dtos::category::CategoryResponse;
use crate::models::product::Product;

/// Body for POST /products and PUT /products/{id}. A null/absent category_id
/// leaves the product uncategorized.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
    pub category_id: Option<i64>,
}

/// Patch body: every field independently optional, applied only if present.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPatchRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<i32>,
    pub category_id: Option<i64>,
}

/// Body for the quantity adjustment endpoints.
#[derive(Debug, Deserialize)]
pub struct QuantityRequest {
    pub quantity: i32,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i32,
    pub category: Option<CategoryResponse>,
}

impl ProductResponse {
    pub fn from_parts(product: Product, category: Option<CategoryResponse>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            category,
        }
    }
}
