//! Product categories.

mod dto;
mod mapping;
mod service;

pub use dto::CategoryDto;
pub use service::CategoryService;
