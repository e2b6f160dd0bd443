//! Products, optionally filed under a category.

mod dto;
mod mapping;
mod service;

pub use dto::ProductDto;
pub use service::ProductService;
