//! Orders placed against carts.

mod dto;
mod mapping;
mod service;

pub use dto::OrderDto;
pub use service::OrderService;
