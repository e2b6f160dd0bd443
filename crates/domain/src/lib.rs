//! Domain layer for the order and product services.
//!
//! This crate provides:
//! - Transfer objects exchanged at the HTTP boundary
//! - Mapping between persisted and transfer forms
//! - Cart, Order, Category and Product services
//! - The domain error taxonomy

pub mod cart;
pub mod category;
pub mod error;
pub mod order;
pub mod product;

pub use cart::{CartDto, CartService, DirectoryFailurePolicy, ParsePolicyError};
pub use category::{CategoryDto, CategoryService};
pub use error::{DomainError, EntityKind};
pub use order::{OrderDto, OrderService};
pub use product::{ProductDto, ProductService};
