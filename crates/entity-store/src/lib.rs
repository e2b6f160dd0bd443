pub mod entity;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use entity::{Cart, Category, Entity, Order, Product};
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use repository::{CatalogStore, OrderStore, Repository};
