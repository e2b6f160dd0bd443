//! Product service.

use common::ProductId;
use entity_store::{Product, Repository};

use crate::error::{DomainError, EntityKind};

use super::{ProductDto, mapping};

/// Service for managing products.
///
/// The referenced category is carried through by identity; whether it exists
/// is left to the store.
pub struct ProductService<R> {
    repository: R,
}

impl<R: Repository<Product>> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<ProductDto>, DomainError> {
        let products = self.repository.find_all().await?;
        Ok(products.into_iter().map(ProductDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, product_id: ProductId) -> Result<ProductDto, DomainError> {
        self.load(product_id).await.map(ProductDto::from)
    }

    /// Persists a new product. Any identity in `dto` is ignored.
    #[tracing::instrument(skip(self))]
    pub async fn save(&self, mut dto: ProductDto) -> Result<ProductDto, DomainError> {
        dto.product_id = None;
        let saved = self.repository.save(Product::from(dto)).await?;
        Ok(ProductDto::from(saved))
    }

    /// Creates or replaces the product named by `dto`.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, dto: ProductDto) -> Result<ProductDto, DomainError> {
        let saved = self.repository.save(Product::from(dto)).await?;
        Ok(ProductDto::from(saved))
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_by_id(
        &self,
        product_id: ProductId,
        dto: ProductDto,
    ) -> Result<ProductDto, DomainError> {
        let product = mapping::overlay(self.load(product_id).await?, dto);
        let saved = self.repository.save(product).await?;
        Ok(ProductDto::from(saved))
    }

    /// Deletes an existing product.
    ///
    /// Fails with NotFound if no product has this identity.
    #[tracing::instrument(skip(self))]
    pub async fn delete_by_id(&self, product_id: ProductId) -> Result<(), DomainError> {
        let product = self.load(product_id).await?;
        self.repository.delete(&product).await?;
        Ok(())
    }

    async fn load(&self, product_id: ProductId) -> Result<Product, DomainError> {
        self.repository
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Product, product_id))
    }
}
