//! Shared types for the order and product services.

pub mod date_time;
mod types;

pub use types::{CartId, CategoryId, OrderId, ProductId, UserId};
