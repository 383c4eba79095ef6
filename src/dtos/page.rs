// src/dtos/page.rs
use serde::{Deserialize, Serialize};

use crate::repository::{Pagination, SortOrder};

/// Query parameters accepted by every list endpoint.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort: Option<String>,
}

impl PageQuery {
    pub fn pagination(&self) -> Pagination {
        let sort = match self.sort.as_deref() {
            Some(s) if s.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        };

        Pagination {
            page: self.page.unwrap_or(1).max(1),
            page_size: self.page_size.unwrap_or(10).clamp(1, 100),
            sort,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
    pub total_pages: i64,
}

impl<T> PageResponse<T> {
    pub fn new(items: Vec<T>, page: Pagination, total_items: i64) -> Self {
        let page_size = page.page_size.max(1);
        let total_pages = (total_items + page_size as i64 - 1) / page_size as i64;

        Self {
            items,
            page: page.page.max(1),
            page_size,
            total_items,
            total_pages,
        }
    }
}
