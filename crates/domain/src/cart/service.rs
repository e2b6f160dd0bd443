//! Cart service composing stored carts with their owners.

use common::{CartId, UserId};
use entity_store::{Cart, Repository};
use user_directory::{DirectoryError, User, UserDirectory};

use crate::error::{DomainError, EntityKind};

use super::{CartDto, DirectoryFailurePolicy, mapping};

/// Service for managing carts.
///
/// Every read composes the stored cart with its owner, fetched from the user
/// directory with one call per cart. Writes echo the caller-supplied user
/// without consulting the directory.
pub struct CartService<R, D> {
    repository: R,
    directory: D,
    failure_policy: DirectoryFailurePolicy,
}

impl<R: Repository<Cart>, D: UserDirectory> CartService<R, D> {
    /// Creates a cart service that fails requests when the directory is down.
    pub fn new(repository: R, directory: D) -> Self {
        Self {
            repository,
            directory,
            failure_policy: DirectoryFailurePolicy::default(),
        }
    }

    /// Sets the policy applied when a directory lookup fails.
    pub fn with_failure_policy(mut self, failure_policy: DirectoryFailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// Returns every cart with its user, in store order.
    #[tracing::instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<CartDto>, DomainError> {
        let carts = self.repository.find_all().await?;

        let mut composed = Vec::with_capacity(carts.len());
        for cart in carts {
            composed.push(self.compose(cart).await?);
        }
        Ok(composed)
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, cart_id: CartId) -> Result<CartDto, DomainError> {
        let cart = self.load(cart_id).await?;
        self.compose(cart).await
    }

    /// Persists a new cart. Any identity in `dto` is ignored.
    #[tracing::instrument(skip(self))]
    pub async fn save(&self, mut dto: CartDto) -> Result<CartDto, DomainError> {
        dto.cart_id = None;
        self.persist(dto).await
    }

    /// Creates or replaces the cart named by `dto`, without checking that it
    /// exists.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, dto: CartDto) -> Result<CartDto, DomainError> {
        self.persist(dto).await
    }

    /// Applies `dto` to the stored cart `cart_id` and returns the composed
    /// result.
    ///
    /// The owner is resolved before anything is written, so a failing
    /// directory leaves the stored cart untouched.
    #[tracing::instrument(skip(self))]
    pub async fn update_by_id(
        &self,
        cart_id: CartId,
        dto: CartDto,
    ) -> Result<CartDto, DomainError> {
        let cart = mapping::overlay(self.load(cart_id).await?, dto);
        let user = match cart.user_id {
            Some(user_id) => self.resolve_user(user_id).await?,
            None => None,
        };

        let saved = self.repository.save(cart).await?;

        let mut composed = CartDto::from(saved);
        composed.user = user;
        Ok(composed)
    }

    /// Deletes the cart, whether or not it exists.
    #[tracing::instrument(skip(self))]
    pub async fn delete_by_id(&self, cart_id: CartId) -> Result<(), DomainError> {
        self.repository.delete_by_id(cart_id).await?;
        Ok(())
    }

    async fn load(&self, cart_id: CartId) -> Result<Cart, DomainError> {
        self.repository
            .find_by_id(cart_id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Cart, cart_id))
    }

    async fn persist(&self, mut dto: CartDto) -> Result<CartDto, DomainError> {
        let user = dto.user.take();
        let saved = self.repository.save(Cart::from(dto)).await?;

        let mut persisted = CartDto::from(saved);
        persisted.user = user;
        Ok(persisted)
    }

    async fn compose(&self, cart: Cart) -> Result<CartDto, DomainError> {
        let user = match cart.user_id {
            Some(user_id) => self.resolve_user(user_id).await?,
            None => None,
        };

        let mut composed = CartDto::from(cart);
        composed.user = user;
        Ok(composed)
    }

    async fn resolve_user(&self, user_id: UserId) -> Result<Option<User>, DomainError> {
        let source = match self.directory.fetch(user_id).await {
            Ok(user) => {
                if user.is_none() {
                    tracing::debug!(%user_id, "User directory returned no record");
                }
                return Ok(user);
            }
            Err(source) => source,
        };

        match self.failure_policy {
            DirectoryFailurePolicy::FailRequest => match source {
                DirectoryError::NotFound(_) => Err(DomainError::UserNotFound { user_id }),
                source => Err(DomainError::DirectoryUnavailable { user_id, source }),
            },
            DirectoryFailurePolicy::OmitUser => {
                tracing::warn!(%user_id, error = %source, "Returning cart without its user");
                Ok(None)
            }
        }
    }
}
