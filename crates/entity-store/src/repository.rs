use async_trait::async_trait;

use crate::{Cart, Category, Entity, Order, Product, Result};

/// Identity-based CRUD over one entity type.
///
/// All implementations must be thread-safe (Send + Sync). Every call is a
/// single implicit transaction; nothing spans more than one call.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Retrieves every stored entity.
    ///
    /// Entities are returned in ascending identity order.
    async fn find_all(&self) -> Result<Vec<E>>;

    /// Retrieves an entity by identity.
    ///
    /// Returns None if no entity has that identity.
    async fn find_by_id(&self, id: E::Id) -> Result<Option<E>>;

    /// Creates or replaces an entity.
    ///
    /// If the entity carries an identity that is already stored, its mutable
    /// fields are replaced and the identity is kept. Otherwise a new row is
    /// inserted under a freshly generated identity. Returns the entity as
    /// re-read from the store, with relations populated.
    async fn save(&self, entity: E) -> Result<E>;

    /// Deletes the stored row named by the entity's identity.
    async fn delete(&self, entity: &E) -> Result<()>;

    /// Deletes the entity with the given identity.
    ///
    /// Deleting an identity that is not stored is a no-op.
    async fn delete_by_id(&self, id: E::Id) -> Result<()>;
}

/// A store holding the order service's tables.
pub trait OrderStore: Repository<Cart> + Repository<Order> {}

impl<T: Repository<Cart> + Repository<Order> + ?Sized> OrderStore for T {}

/// A store holding the product service's tables.
pub trait CatalogStore: Repository<Category> + Repository<Product> {}

impl<T: Repository<Category> + Repository<Product> + ?Sized> CatalogStore for T {}
