use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use super::{entity::User, errors::RepoError, repo::UserRepository};

/// In-process store with the same uniqueness and id rules as the `users` table.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> Result<usize, RepoError> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, RepoError> {
        self.users
            .lock()
            .map_err(|e| RepoError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let users = self.lock()?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn save(&self, user: &User) -> Result<i64, RepoError> {
        let mut users = self.lock()?;

        if users
            .iter()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(RepoError::Duplicate);
        }

        if user.is_new() {
            let id = users.len() as i64 + 1;
            users.push(User { id, ..user.clone() });
            return Ok(id);
        }

        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepoError::MissingId)?;
        *stored = user.clone();
        Ok(user.id)
    }
}
