use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::auth::{error::AuthError, repo::UserStore, repo_types::User};

/// In-process [`UserStore`] backing `AppState::fake()` and the tests.
///
/// The existence check and the insert run under one lock, so duplicate
/// registrations cannot interleave.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Out-of-band account state change; nothing in the HTTP surface calls this.
    pub fn set_active(&self, id: i64, active: bool) -> Result<(), AuthError> {
        let mut users = self.lock()?;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AuthError::NotFound)?;
        user.is_active = active;
        user.updated_at = OffsetDateTime::now_utc();
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, AuthError> {
        self.users
            .lock()
            .map_err(|_| AuthError::storage("user store lock poisoned"))
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, username: &str, password_hash: &str) -> Result<User, AuthError> {
        let mut users = self.lock()?;
        if users.iter().any(|u| u.username == username) {
            return Err(AuthError::DuplicateUsername);
        }
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: users.len() as i64 + 1,
            username: username.to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: now,
            updated_at: now,
            is_active: true,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<User, AuthError> {
        self.lock()?
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(AuthError::NotFound)
    }

    async fn find_by_id(&self, id: i64) -> Result<User, AuthError> {
        self.lock()?
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(AuthError::NotFound)
    }

    async fn exists(&self, username: &str) -> Result<bool, AuthError> {
        Ok(self.lock()?.iter().any(|u| u.username == username))
    }
}
