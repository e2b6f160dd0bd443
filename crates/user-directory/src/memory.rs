//! In-memory user directory for tests and local runs.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use common::UserId;

use crate::{DirectoryError, User, UserDirectory};

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    users: HashMap<UserId, Option<User>>,
    calls: Vec<UserId>,
    unavailable: bool,
}

/// In-memory user directory that records every lookup.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the directory with `user` registered under its own id.
    pub fn with_user(self, user: User) -> Self {
        self.insert(user);
        self
    }

    /// Registers a user. Users without an id are ignored.
    pub fn insert(&self, user: User) {
        if let Some(user_id) = user.user_id {
            self.state
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .users
                .insert(user_id, Some(user));
        }
    }

    /// Makes `user_id` answer successfully with no record, like an empty
    /// response body from the user service.
    pub fn insert_empty(&self, user_id: UserId) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .users
            .insert(user_id, None);
    }

    /// Makes every subsequent fetch fail as if the directory were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .unavailable = unavailable;
    }

    /// Returns the number of fetches made so far.
    pub fn call_count(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
            .len()
    }

    /// Returns the requested ids in call order.
    pub fn calls(&self) -> Vec<UserId> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .calls
            .clone()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn fetch(&self, user_id: UserId) -> Result<Option<User>, DirectoryError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.calls.push(user_id);

        if state.unavailable {
            return Err(DirectoryError::Unavailable(
                "connection refused".to_string(),
            ));
        }

        state
            .users
            .get(&user_id)
            .cloned()
            .ok_or(DirectoryError::NotFound(user_id))
    }
}
