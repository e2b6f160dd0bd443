//! Domain error types.

use std::fmt;

use common::UserId;
use entity_store::StoreError;
use thiserror::Error;
use user_directory::DirectoryError;

/// The entity types a domain operation can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Cart,
    Order,
    Category,
    Product,
}

impl EntityKind {
    /// Returns the entity name as used in messages and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Cart => "Cart",
            EntityKind::Order => "Order",
            EntityKind::Category => "Category",
            EntityKind::Product => "Product",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No entity of this kind has the requested identity.
    #[error("{entity} with id: {id} not found")]
    NotFound { entity: EntityKind, id: i32 },

    /// The user directory has no record of a cart's owner.
    #[error("User with id: {user_id} not found")]
    UserNotFound { user_id: UserId },

    /// The user directory could not answer while composing a cart.
    #[error("User directory unavailable for user {user_id}: {source}")]
    DirectoryUnavailable {
        user_id: UserId,
        source: DirectoryError,
    },

    /// An error occurred in the entity store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Creates a NotFound error and counts it.
    pub fn not_found(entity: EntityKind, id: impl Into<i32>) -> Self {
        metrics::counter!("entity_not_found_total", "entity" => entity.as_str()).increment(1);
        DomainError::NotFound {
            entity,
            id: id.into(),
        }
    }
}
