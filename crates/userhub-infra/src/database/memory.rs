//! In-memory user repository - used as fallback when no database is
//! configured, and by tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use userhub_core::domain::User;
use userhub_core::error::RepoError;
use userhub_core::ports::{UserFilter, UserRepository};

/// HashMap-backed user store with the same query semantics as the
/// PostgreSQL repository. Data is lost on process restart.
pub struct InMemoryUserRepository {
    store: RwLock<HashMap<i64, User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn matches_filter(user: &User, filter: &UserFilter) -> bool {
    if let Some(name) = non_blank(&filter.user_name) {
        if !user.user_name.contains(name) {
            return false;
        }
    }
    if let Some(role) = non_blank(&filter.role) {
        if user.role.as_str() != role {
            return false;
        }
    }
    if let Some(email) = non_blank(&filter.email_id) {
        if !user.email_id.contains(email) {
            return false;
        }
    }
    if let Some(mobile) = non_blank(&filter.mobile_num) {
        if !user.mobile_num.contains(mobile) {
            return false;
        }
    }
    true
}

fn sorted_by_id(mut users: Vec<User>) -> Vec<User> {
    users.sort_by_key(|u| u.id);
    users
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.user_name == user_name).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let store = self.store.read().await;
        Ok(sorted_by_id(store.values().cloned().collect()))
    }

    async fn find_page(&self, skip: u64, take: u64) -> Result<Vec<User>, RepoError> {
        let all = self.find_all().await?;
        Ok(all
            .into_iter()
            .skip(skip as usize)
            .take(take as usize)
            .collect())
    }

    async fn find_filtered(
        &self,
        filter: &UserFilter,
        skip: Option<u64>,
        take: Option<u64>,
    ) -> Result<Vec<User>, RepoError> {
        let store = self.store.read().await;
        let mut matched = sorted_by_id(
            store
                .values()
                .filter(|u| matches_filter(u, filter))
                .cloned()
                .collect(),
        );

        if let Some(skip) = skip {
            matched = matched.into_iter().skip(skip as usize).collect();
        }
        if let Some(take) = take {
            matched.truncate(take as usize);
        }

        Ok(matched)
    }

    async fn insert(&self, mut user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if store.values().any(|u| u.user_name == user.user_name) {
            return Err(RepoError::Constraint("user name is already taken".to_string()));
        }

        user.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;

        if !store.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        if store
            .values()
            .any(|u| u.id != user.id && u.user_name == user.user_name)
        {
            return Err(RepoError::Constraint("user name is already taken".to_string()));
        }

        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }

    async fn user_name_exists(
        &self,
        user_name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, RepoError> {
        let store = self.store.read().await;
        Ok(store
            .values()
            .any(|u| u.user_name == user_name && Some(u.id) != exclude_id))
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.store.read().await.len() as u64)
    }

    async fn count_filtered(&self, filter: &UserFilter) -> Result<u64, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().filter(|u| matches_filter(u, filter)).count() as u64)
    }
}
