use common::CategoryId;
use entity_store::{Category, Repository};

use crate::error::{DomainError, EntityKind};

use super::{CategoryDto, mapping};

/// Service for managing categories.
pub struct CategoryService<R> {
    repository: R,
}

impl<R: Repository<Category>> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<CategoryDto>, DomainError> {
        let categories = self.repository.find_all().await?;
        Ok(categories.into_iter().map(CategoryDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, category_id: CategoryId) -> Result<CategoryDto, DomainError> {
        self.load(category_id).await.map(CategoryDto::from)
    }

    /// Persists a new category. Any identity in `dto` is ignored.
    #[tracing::instrument(skip(self))]
    pub async fn save(&self, mut dto: CategoryDto) -> Result<CategoryDto, DomainError> {
        dto.category_id = None;
        let saved = self.repository.save(Category::from(dto)).await?;
        Ok(CategoryDto::from(saved))
    }

    /// Creates or replaces the category named by `dto`.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, dto: CategoryDto) -> Result<CategoryDto, DomainError> {
        let saved = self.repository.save(Category::from(dto)).await?;
        Ok(CategoryDto::from(saved))
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_by_id(
        &self,
        category_id: CategoryId,
        dto: CategoryDto,
    ) -> Result<CategoryDto, DomainError> {
        let category = mapping::overlay(self.load(category_id).await?, dto);
        let saved = self.repository.save(category).await?;
        Ok(CategoryDto::from(saved))
    }

    /// Deletes the category, whether or not it exists. Its products go with
    /// it.
    #[tracing::instrument(skip(self))]
    pub async fn delete_by_id(&self, category_id: CategoryId) -> Result<(), DomainError> {
        self.repository.delete_by_id(category_id).await?;
        Ok(())
    }

    async fn load(&self, category_id: CategoryId) -> Result<Category, DomainError> {
        self.repository
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Category, category_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity_store::InMemoryStore;

    fn electronics() -> CategoryDto {
        CategoryDto {
            category_title: Some("Electronics".to_string()),
            image_url: Some("electronics.jpg".to_string()),
            ..CategoryDto::default()
        }
    }

    #[tokio::test]
    async fn save_assigns_identity() {
        let service = CategoryService::new(InMemoryStore::new());
        let mut dto = electronics();
        dto.category_id = Some(CategoryId::new(30));

        let saved = service.save(dto).await.unwrap();

        assert_eq!(saved.category_id, Some(CategoryId::new(1)));
        assert_eq!(service.find_by_id(CategoryId::new(1)).await.unwrap(), saved);
    }

    #[tokio::test]
    async fn update_replaces_existing() {
        let service = CategoryService::new(InMemoryStore::new());
        let mut saved = service.save(electronics()).await.unwrap();
        saved.category_title = Some("Home".to_string());

        let updated = service.update(saved.clone()).await.unwrap();

        assert_eq!(updated, saved);
        assert_eq!(service.find_all().await.unwrap(), vec![saved]);
    }

    #[tokio::test]
    async fn missing_category_is_not_found_but_delete_succeeds() {
        let service = CategoryService::new(InMemoryStore::new());

        let err = service.find_by_id(CategoryId::new(5)).await.unwrap_err();
        assert_eq!(err.to_string(), "Category with id: 5 not found");

        let err = service
            .update_by_id(CategoryId::new(5), electronics())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        assert!(service.delete_by_id(CategoryId::new(5)).await.is_ok());
    }
}
