//! Remote user directory
//!
//! Carts reference their owner by user id only. The owning record lives in a
//! separate user service and is fetched fresh on every composition; nothing
//! here is cached or persisted locally.

pub mod error;
pub mod http;
pub mod memory;
pub mod user;

pub use error::DirectoryError;
pub use http::HttpUserDirectory;
pub use memory::InMemoryUserDirectory;
pub use user::User;

use async_trait::async_trait;
use common::UserId;

/// Looks up users by identity.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetches the user with the given identity.
    ///
    /// Returns `Ok(None)` when the directory answers successfully with an
    /// empty body and `DirectoryError::NotFound` when it reports that no such
    /// user exists. Any failure to obtain an answer is also an error.
    async fn fetch(&self, user_id: UserId) -> Result<Option<User>, DirectoryError>;
}
