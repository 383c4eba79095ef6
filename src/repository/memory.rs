//! In-memory repository implementations backing the service unit tests.
//! Same contracts as the Postgres implementations, without the database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::AppError;
use crate::models::category::Category;
use crate::models::movement::{Movement, MovementDescription, MovementType};
use crate::models::product::Product;
use crate::models::user::User;
use crate::repository::{
    CategoryRepository, MovementRepository, NewCategory, NewMovement, NewProduct, NewUser,
    Pagination, ProductRepository, SortOrder, UserRepository,
};

fn paginate<T>(mut items: Vec<T>, page: Pagination) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let offset = page.offset().min(total) as usize;
    items = items.split_off(offset);
    items.truncate(page.limit() as usize);
    (items, total)
}

#[derive(Default)]
pub struct MemoryCategoryRepository {
    rows: Mutex<HashMap<i64, Category>>,
    next_id: AtomicI64,
}

#[async_trait]
impl CategoryRepository for MemoryCategoryRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, AppError> {
        let rows = self.rows.lock().expect("store poisoned");
        Ok(rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, AppError> {
        let rows = self.rows.lock().expect("store poisoned");
        Ok(rows.values().find(|c| c.name == name).cloned())
    }

    async fn insert(&self, data: &NewCategory) -> Result<Category, AppError> {
        let mut rows = self.rows.lock().expect("store poisoned");
        if rows.values().any(|c| c.name == data.name) {
            return Err(AppError::conflict("Category name already exists"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let category = Category {
            id,
            name: data.name.clone(),
            description: data.description.clone(),
        };
        rows.insert(id, category.clone());
        Ok(category)
    }

    async fn update(&self, category: &Category) -> Result<Category, AppError> {
        let mut rows = self.rows.lock().expect("store poisoned");
        if !rows.contains_key(&category.id) {
            return Err(AppError::not_found("Category not found"));
        }
        if rows
            .values()
            .any(|c| c.id != category.id && c.name == category.name)
        {
            return Err(AppError::conflict("Category name already exists"));
        }
        rows.insert(category.id, category.clone());
        Ok(category.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut rows = self.rows.lock().expect("store poisoned");
        rows.remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Category not found"))
    }

    async fn list(&self, page: Pagination) -> Result<(Vec<Category>, i64), AppError> {
        let rows = self.rows.lock().expect("store poisoned");
        let mut all: Vec<Category> = rows.values().cloned().collect();
        all.sort_by(|a, b| match page.sort {
            SortOrder::Asc => a.name.cmp(&b.name),
            SortOrder::Desc => b.name.cmp(&a.name),
        });
        Ok(paginate(all, page))
    }
}

#[derive(Default)]
pub struct MemoryProductRepository {
    rows: Mutex<HashMap<i64, Product>>,
    next_id: AtomicI64,
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        let rows = self.rows.lock().expect("store poisoned");
        Ok(rows.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, AppError> {
        let rows = self.rows.lock().expect("store poisoned");
        Ok(rows.values().find(|p| p.name == name).cloned())
    }

    async fn insert(&self, data: &NewProduct) -> Result<Product, AppError> {
        let mut rows = self.rows.lock().expect("store poisoned");
        if rows.values().any(|p| p.name == data.name) {
            return Err(AppError::conflict("Product name already exists"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let product = Product {
            id,
            name: data.name.clone(),
            description: data.description.clone(),
            price: data.price,
            quantity: data.quantity,
            category_id: data.category_id,
        };
        rows.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, product: &Product) -> Result<Product, AppError> {
        let mut rows = self.rows.lock().expect("store poisoned");
        if !rows.contains_key(&product.id) {
            return Err(AppError::not_found("Product not found"));
        }
        if rows
            .values()
            .any(|p| p.id != product.id && p.name == product.name)
        {
            return Err(AppError::conflict("Product name already exists"));
        }
        rows.insert(product.id, product.clone());
        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut rows = self.rows.lock().expect("store poisoned");
        rows.remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Product not found"))
    }

    async fn list(&self, page: Pagination) -> Result<(Vec<Product>, i64), AppError> {
        let rows = self.rows.lock().expect("store poisoned");
        let mut all: Vec<Product> = rows.values().cloned().collect();
        all.sort_by(|a, b| match page.sort {
            SortOrder::Asc => a.name.cmp(&b.name),
            SortOrder::Desc => b.name.cmp(&a.name),
        });
        Ok(paginate(all, page))
    }
}

#[derive(Default)]
pub struct MemoryMovementRepository {
    rows: Mutex<Vec<Movement>>,
    next_id: AtomicI64,
}

impl MemoryMovementRepository {
    /// Snapshot of everything recorded so far, in insertion order.
    pub fn all(&self) -> Vec<Movement> {
        self.rows.lock().expect("store poisoned").clone()
    }

    fn filtered(
        &self,
        page: Pagination,
        keep: impl Fn(&Movement) -> bool,
    ) -> (Vec<Movement>, i64) {
        let rows = self.rows.lock().expect("store poisoned");
        let mut matched: Vec<Movement> = rows.iter().filter(|m| keep(m)).cloned().collect();
        matched.sort_by(|a, b| match page.sort {
            SortOrder::Asc => (a.date, a.id).cmp(&(b.date, b.id)),
            SortOrder::Desc => (b.date, b.id).cmp(&(a.date, a.id)),
        });
        paginate(matched, page)
    }
}

#[async_trait]
impl MovementRepository for MemoryMovementRepository {
    async fn insert(&self, data: &NewMovement) -> Result<Movement, AppError> {
        let mut rows = self.rows.lock().expect("store poisoned");
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let movement = Movement {
            id,
            product_id: Some(data.product_id),
            date: data.date,
            movement_type: data.movement_type,
            description: data.description,
            user_id: data.user_id,
        };
        rows.push(movement.clone());
        Ok(movement)
    }

    async fn list(&self, page: Pagination) -> Result<(Vec<Movement>, i64), AppError> {
        Ok(self.filtered(page, |_| true))
    }

    async fn list_by_type(
        &self,
        movement_type: MovementType,
        page: Pagination,
    ) -> Result<(Vec<Movement>, i64), AppError> {
        Ok(self.filtered(page, |m| m.movement_type == movement_type))
    }

    async fn list_by_description(
        &self,
        description: MovementDescription,
        page: Pagination,
    ) -> Result<(Vec<Movement>, i64), AppError> {
        Ok(self.filtered(page, |m| m.description == description))
    }

    async fn list_by_product(
        &self,
        product_id: i64,
        page: Pagination,
    ) -> Result<(Vec<Movement>, i64), AppError> {
        Ok(self.filtered(page, |m| m.product_id == Some(product_id)))
    }

    async fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        page: Pagination,
    ) -> Result<(Vec<Movement>, i64), AppError> {
        Ok(self.filtered(page, |m| {
            let day = m.date.date_naive();
            day >= start && day <= end
        }))
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    rows: Mutex<HashMap<i64, User>>,
    next_id: AtomicI64,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let rows = self.rows.lock().expect("store poisoned");
        Ok(rows.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let rows = self.rows.lock().expect("store poisoned");
        Ok(rows.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let rows = self.rows.lock().expect("store poisoned");
        Ok(rows.values().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, data: &NewUser) -> Result<User, AppError> {
        let mut rows = self.rows.lock().expect("store poisoned");
        if rows
            .values()
            .any(|u| u.username == data.username || u.email == data.email)
        {
            return Err(AppError::conflict("Username or email already taken"));
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
        };
        rows.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let mut rows = self.rows.lock().expect("store poisoned");
        if !rows.contains_key(&user.id) {
            return Err(AppError::not_found("User not found"));
        }
        if rows
            .values()
            .any(|u| u.id != user.id && (u.username == user.username || u.email == user.email))
        {
            return Err(AppError::conflict("Username or email already taken"));
        }
        rows.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut rows = self.rows.lock().expect("store poisoned");
        rows.remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
