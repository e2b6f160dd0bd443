//! Order service.

use common::OrderId;
use entity_store::{Order, Repository};

use crate::error::{DomainError, EntityKind};

use super::{OrderDto, mapping};

/// Service for managing orders.
///
/// The referenced cart is carried through by identity; whether it exists is
/// left to the store.
pub struct OrderService<R> {
    repository: R,
}

impl<R: Repository<Order>> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Returns every order in store order.
    #[tracing::instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<OrderDto>, DomainError> {
        let orders = self.repository.find_all().await?;
        Ok(orders.into_iter().map(OrderDto::from).collect())
    }

    #[tracing::instrument(skip(self))]
    pub async fn find_by_id(&self, order_id: OrderId) -> Result<OrderDto, DomainError> {
        self.load(order_id).await.map(OrderDto::from)
    }

    /// Persists a new order. Any identity in `dto` is ignored.
    #[tracing::instrument(skip(self))]
    pub async fn save(&self, mut dto: OrderDto) -> Result<OrderDto, DomainError> {
        dto.order_id = None;
        let saved = self.repository.save(Order::from(dto)).await?;
        Ok(OrderDto::from(saved))
    }

    /// Creates or replaces the order named by `dto`.
    #[tracing::instrument(skip(self))]
    pub async fn update(&self, dto: OrderDto) -> Result<OrderDto, DomainError> {
        let saved = self.repository.save(Order::from(dto)).await?;
        Ok(OrderDto::from(saved))
    }

    /// Applies `dto` to the stored order `order_id`.
    #[tracing::instrument(skip(self))]
    pub async fn update_by_id(
        &self,
        order_id: OrderId,
        dto: OrderDto,
    ) -> Result<OrderDto, DomainError> {
        let order = mapping::overlay(self.load(order_id).await?, dto);
        let saved = self.repository.save(order).await?;
        Ok(OrderDto::from(saved))
    }

    /// Deletes an existing order.
    ///
    /// Fails with NotFound if no order has this identity.
    #[tracing::instrument(skip(self))]
    pub async fn delete_by_id(&self, order_id: OrderId) -> Result<(), DomainError> {
        let order = self.load(order_id).await?;
        self.repository.delete(&order).await?;
        Ok(())
    }

    async fn load(&self, order_id: OrderId) -> Result<Order, DomainError> {
        self.repository
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| DomainError::not_found(EntityKind::Order, order_id))
    }
}
