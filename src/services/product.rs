// src/services/product.rs
use crate::dtos::category::CategoryResponse;
use crate::dtos::page::PageResponse;
use crate::dtos::product::{ProductPatchRequest, ProductRequest, ProductResponse};
use crate::error::AppError;
use crate::models::movement::{MovementDescription, MovementType};
use crate::models::product::Product;
use crate::repository::{DynProductRepository, NewProduct, Pagination};
use crate::services::{CategoryService, MovementService};

/// Product CRUD and quantity adjustments. Every mutation and every read is
/// followed by one audit record; the record call runs after the product write
/// and its failure is surfaced to the caller without rolling the write back.
#[derive(Clone)]
pub struct ProductService {
    products: DynProductRepository,
    categories: CategoryService,
    recorder: MovementService,
}

impl ProductService {
    pub fn new(
        products: DynProductRepository,
        categories: CategoryService,
        recorder: MovementService,
    ) -> Self {
        Self {
            products,
            categories,
            recorder,
        }
    }

    pub async fn create(
        &self,
        data: ProductRequest,
        actor: Option<i64>,
    ) -> Result<ProductResponse, AppError> {
        validate_fields(&data.name, data.price, data.quantity)?;

        if self.products.find_by_name(&data.name).await?.is_some() {
            return Err(AppError::conflict("Product name already exists"));
        }

        // A nonexistent category fails the whole create before anything is written.
        let category = self.resolve_category(data.category_id).await?;

        let created = self
            .products
            .insert(&NewProduct {
                name: data.name,
                description: data.description,
                price: data.price,
                quantity: data.quantity,
                category_id: data.category_id,
            })
            .await?;

        self.recorder
            .record(
                created.id,
                MovementType::Entry,
                MovementDescription::Added,
                actor,
            )
            .await?;

        Ok(ProductResponse::from_parts(created, category))
    }

    pub async fn update_full(
        &self,
        id: i64,
        data: ProductRequest,
        actor: Option<i64>,
    ) -> Result<ProductResponse, AppError> {
        validate_fields(&data.name, data.price, data.quantity)?;

        let mut existing = self.find_existing(id).await?;

        if data.name != existing.name {
            self.require_name_free(&data.name).await?;
        }

        let category = self.resolve_category(data.category_id).await?;

        existing.name = data.name;
        existing.description = data.description;
        existing.price = data.price;
        existing.quantity = data.quantity;
        existing.category_id = data.category_id;

        let saved = self.products.update(&existing).await?;

        self.recorder
            .record(
                saved.id,
                MovementType::Edited,
                MovementDescription::Edited,
                actor,
            )
            .await?;

        Ok(ProductResponse::from_parts(saved, category))
    }

    pub async fn update_partial(
        &self,
        id: i64,
        data: ProductPatchRequest,
        actor: Option<i64>,
    ) -> Result<ProductResponse, AppError> {
        let mut existing = self.find_existing(id).await?;

        if let Some(name) = data.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("Name is required"));
            }
            if name != existing.name {
                self.require_name_free(&name).await?;
            }
            existing.name = name;
        }

        if let Some(description) = data.description {
            existing.description = description;
        }

        if let Some(price) = data.price {
            if price <= 0.0 {
                return Err(AppError::validation("Price must be positive"));
            }
            existing.price = price;
        }

        if let Some(quantity) = data.quantity {
            if quantity < 0 {
                return Err(AppError::validation("Quantity cannot be negative"));
            }
            existing.quantity = quantity;
        }

        if let Some(category_id) = data.category_id {
            self.categories.get_by_id(category_id).await?;
            existing.category_id = Some(category_id);
        }

        let saved = self.products.update(&existing).await?;

        self.recorder
            .record(
                saved.id,
                MovementType::Edited,
                MovementDescription::Edited,
                actor,
            )
            .await?;

        self.to_response(saved).await
    }

    pub async fn get_by_id(
        &self,
        id: i64,
        actor: Option<i64>,
    ) -> Result<ProductResponse, AppError> {
        let product = self.find_existing(id).await?;

        self.recorder
            .record(
                product.id,
                MovementType::None,
                MovementDescription::Consult,
                actor,
            )
            .await?;

        self.to_response(product).await
    }

    pub async fn get_by_name(
        &self,
        name: &str,
        actor: Option<i64>,
    ) -> Result<ProductResponse, AppError> {
        let product = self
            .products
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product not found: {name}")))?;

        self.recorder
            .record(
                product.id,
                MovementType::None,
                MovementDescription::Consult,
                actor,
            )
            .await?;

        self.to_response(product).await
    }

    /// Lists a page of products and logs one CONSULT movement per returned
    /// row: every exposure of a product's data is audited, bulk reads included.
    pub async fn list(
        &self,
        page: Pagination,
        actor: Option<i64>,
    ) -> Result<PageResponse<ProductResponse>, AppError> {
        let (products, total) = self.products.list(page).await?;

        let mut items = Vec::with_capacity(products.len());
        for product in products {
            self.recorder
                .record(
                    product.id,
                    MovementType::None,
                    MovementDescription::Consult,
                    actor,
                )
                .await?;
            items.push(self.to_response(product).await?);
        }

        Ok(PageResponse::new(items, page, total))
    }

    /// Records the REMOVED movement first, then deletes; the movement's
    /// product reference detaches when the row goes away.
    pub async fn delete(&self, id: i64, actor: Option<i64>) -> Result<(), AppError> {
        let product = self.find_existing(id).await?;

        self.recorder
            .record(
                product.id,
                MovementType::Exit,
                MovementDescription::Removed,
                actor,
            )
            .await?;

        self.products.delete(id).await
    }

    pub async fn increase_quantity(
        &self,
        id: i64,
        delta: i32,
        actor: Option<i64>,
    ) -> Result<ProductResponse, AppError> {
        if delta <= 0 {
            return Err(AppError::validation("The quantity to add must be positive"));
        }

        let mut product = self.find_existing(id).await?;
        product.quantity += delta;

        let saved = self.products.update(&product).await?;

        self.recorder
            .record(
                saved.id,
                MovementType::Entry,
                MovementDescription::QuantityIncreased,
                actor,
            )
            .await?;

        self.to_response(saved).await
    }

    pub async fn decrease_quantity(
        &self,
        id: i64,
        delta: i32,
        actor: Option<i64>,
    ) -> Result<ProductResponse, AppError> {
        if delta <= 0 {
            return Err(AppError::validation(
                "The quantity to remove must be positive",
            ));
        }

        let mut product = self.find_existing(id).await?;

        if delta > product.quantity {
            return Err(AppError::validation("The new quantity cannot be negative"));
        }

        product.quantity -= delta;

        let saved = self.products.update(&product).await?;

        self.recorder
            .record(
                saved.id,
                MovementType::Exit,
                MovementDescription::QuantityDecreased,
                actor,
            )
            .await?;

        self.to_response(saved).await
    }

    /// Overwrites the quantity outright. Negative targets are rejected, so the
    /// non-negativity invariant holds at this entry point too. The audit row
    /// compares against the prior value; a target equal to the prior value
    /// falls into the decrease branch.
    pub async fn set_quantity(
        &self,
        id: i64,
        quantity: i32,
        actor: Option<i64>,
    ) -> Result<ProductResponse, AppError> {
        if quantity < 0 {
            return Err(AppError::validation("Quantity cannot be negative"));
        }

        let mut product = self.find_existing(id).await?;
        let before = product.quantity;
        product.quantity = quantity;

        let saved = self.products.update(&product).await?;

        let description = if quantity > before {
            MovementDescription::QuantityIncreased
        } else {
            MovementDescription::QuantityDecreased
        };
        let movement_type = if quantity > before {
            MovementType::Entry
        } else {
            MovementType::Exit
        };

        self.recorder
            .record(saved.id, movement_type, description, actor)
            .await?;

        self.to_response(saved).await
    }

    async fn find_existing(&self, id: i64) -> Result<Product, AppError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product not found: {id}")))
    }

    async fn require_name_free(&self, name: &str) -> Result<(), AppError> {
        if self.products.find_by_name(name).await?.is_some() {
            return Err(AppError::conflict("Product name already exists"));
        }
        Ok(())
    }

    /// Resolve a requested category reference; a missing category is the
    /// caller's error.
    async fn resolve_category(
        &self,
        category_id: Option<i64>,
    ) -> Result<Option<CategoryResponse>, AppError> {
        match category_id {
            Some(id) => Ok(Some(self.categories.get_by_id(id).await?)),
            None => Ok(None),
        }
    }

    /// Response mapping tolerates an orphaned category reference (the category
    /// row may have been deleted out from under the product).
    async fn to_response(&self, product: Product) -> Result<ProductResponse, AppError> {
        let category = match product.category_id {
            Some(id) => match self.categories.get_by_id(id).await {
                Ok(category) => Some(category),
                Err(AppError::NotFound(_)) => None,
                Err(e) => return Err(e),
            },
            None => None,
        };

        Ok(ProductResponse::from_parts(product, category))
    }
}

fn validate_fields(name: &str, price: f64, quantity: i32) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    if price <= 0.0 {
        return Err(AppError::validation("Price must be positive"));
    }
    if quantity < 0 {
        return Err(AppError::validation("Quantity cannot be negative"));
    }
    Ok(())
}
