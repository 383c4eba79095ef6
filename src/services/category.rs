// src/services/category.rs
use crate::dtos::category::{CategoryPatchRequest, CategoryRequest, CategoryResponse};
use crate::dtos::page::PageResponse;
use crate::error::AppError;
use crate::models::category::Category;
use crate::repository::{DynCategoryRepository, NewCategory, Pagination};

#[derive(Clone)]
pub struct CategoryService {
    categories: DynCategoryRepository,
}

impl CategoryService {
    pub fn new(categories: DynCategoryRepository) -> Self {
        Self { categories }
    }

    pub async fn create(&self, data: CategoryRequest) -> Result<CategoryResponse, AppError> {
        require_non_blank(&data.name, "Name")?;
        require_non_blank(&data.description, "Description")?;

        if self.categories.find_by_name(&data.name).await?.is_some() {
            return Err(AppError::conflict("Category name already exists"));
        }

        let created = self
            .categories
            .insert(&NewCategory {
                name: data.name,
                description: data.description,
            })
            .await?;

        Ok(created.into())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<CategoryResponse, AppError> {
        Ok(self.find_existing(id).await?.into())
    }

    pub async fn get_by_name(&self, name: &str) -> Result<CategoryResponse, AppError> {
        let category = self
            .categories
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category not found: {name}")))?;

        Ok(category.into())
    }

    pub async fn list(&self, page: Pagination) -> Result<PageResponse<CategoryResponse>, AppError> {
        let (categories, total) = self.categories.list(page).await?;
        let items = categories.into_iter().map(CategoryResponse::from).collect();

        Ok(PageResponse::new(items, page, total))
    }

    pub async fn update_full(
        &self,
        id: i64,
        data: CategoryRequest,
    ) -> Result<CategoryResponse, AppError> {
        require_non_blank(&data.name, "Name")?;
        require_non_blank(&data.description, "Description")?;

        let mut existing = self.find_existing(id).await?;

        if data.name != existing.name {
            self.require_name_free(&data.name).await?;
        }

        existing.name = data.name;
        existing.description = data.description;

        let saved = self.categories.update(&existing).await?;
        Ok(saved.into())
    }

    pub async fn update_partial(
        &self,
        id: i64,
        data: CategoryPatchRequest,
    ) -> Result<CategoryResponse, AppError> {
        let mut existing = self.find_existing(id).await?;

        if let Some(name) = data.name {
            require_non_blank(&name, "Name")?;
            if name != existing.name {
                self.require_name_free(&name).await?;
            }
            existing.name = name;
        }

        if let Some(description) = data.description {
            require_non_blank(&description, "Description")?;
            existing.description = description;
        }

        let saved = self.categories.update(&existing).await?;
        Ok(saved.into())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.find_existing(id).await?;
        self.categories.delete(id).await
    }

    async fn find_existing(&self, id: i64) -> Result<Category, AppError> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category not found: {id}")))
    }

    async fn require_name_free(&self, name: &str) -> Result<(), AppError> {
        if self.categories.find_by_name(name).await?.is_some() {
            return Err(AppError::conflict("Category name already exists"));
        }
        Ok(())
    }
}

fn require_non_blank(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::repository::memory::MemoryCategoryRepository;
    use crate::repository::SortOrder;

    fn page() -> Pagination {
        Pagination {
            page: 1,
            page_size: 50,
            sort: SortOrder::Asc,
        }
    }

    fn service() -> CategoryService {
        CategoryService::new(Arc::new(MemoryCategoryRepository::default()))
    }

    fn tools() -> CategoryRequest {
        CategoryRequest {
            name: "Tools".to_string(),
            description: "hand tools".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let service = service();

        let created = service.create(tools()).await.unwrap();
        let fetched = service.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, "Tools");
        assert_eq!(fetched.description, "hand tools");
    }

    #[tokio::test]
    async fn duplicate_name_conflicts_and_leaves_one_row() {
        let service = service();

        service.create(tools()).await.unwrap();
        let second = service.create(tools()).await;

        assert!(matches!(second, Err(AppError::Conflict(_))));
        let listed = service.list(page()).await.unwrap();
        assert_eq!(listed.total_items, 1);
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let service = service();

        let blank_name = service
            .create(CategoryRequest {
                name: "  ".to_string(),
                description: "x".to_string(),
            })
            .await;

        assert!(matches!(blank_name, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let service = service();

        assert!(matches!(
            service.get_by_id(9999).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.get_by_name("Nope").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn full_update_overwrites_both_fields() {
        let service = service();
        let created = service.create(tools()).await.unwrap();

        let updated = service
            .update_full(
                created.id,
                CategoryRequest {
                    name: "Hardware".to_string(),
                    description: "fasteners".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Hardware");
        assert_eq!(updated.description, "fasteners");
    }

    #[tokio::test]
    async fn full_update_to_taken_name_conflicts() {
        let service = service();
        service.create(tools()).await.unwrap();
        let other = service
            .create(CategoryRequest {
                name: "Hardware".to_string(),
                description: "fasteners".to_string(),
            })
            .await
            .unwrap();

        let result = service.update_full(other.id, tools()).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn partial_update_applies_only_present_fields() {
        let service = service();
        let created = service.create(tools()).await.unwrap();

        let updated = service
            .update_partial(
                created.id,
                CategoryPatchRequest {
                    description: Some("power tools".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Tools");
        assert_eq!(updated.description, "power tools");
    }

    #[tokio::test]
    async fn empty_patch_changes_nothing() {
        let service = service();
        let created = service.create(tools()).await.unwrap();

        let updated = service
            .update_partial(created.id, CategoryPatchRequest::default())
            .await
            .unwrap();

        assert_eq!(updated.name, "Tools");
        assert_eq!(updated.description, "hand tools");
    }

    #[tokio::test]
    async fn patch_keeping_own_name_is_not_a_conflict() {
        let service = service();
        let created = service.create(tools()).await.unwrap();

        let updated = service
            .update_partial(
                created.id,
                CategoryPatchRequest {
                    name: Some("Tools".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Tools");
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let service = service();
        let created = service.create(tools()).await.unwrap();

        service.delete(created.id).await.unwrap();

        assert!(matches!(
            service.get_by_id(created.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.delete(created.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
