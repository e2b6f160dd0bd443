//! Carts, composed with their owner from the user directory.

mod dto;
mod mapping;
mod policy;
mod service;

pub use dto::CartDto;
pub use policy::{DirectoryFailurePolicy, ParsePolicyError};
pub use service::CartService;
