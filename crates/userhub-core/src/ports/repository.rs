use async_trait::async_trait;

use crate::domain::User;
use crate::error::RepoError;

/// Optional predicates for filtered user queries.
///
/// `user_name`, `email_id` and `mobile_num` are substring matches; `role`
/// matches the stored role string exactly. Blank strings are treated the
/// same as absent predicates.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub user_name: Option<String>,
    pub role: Option<String>,
    pub email_id: Option<String>,
    pub mobile_num: Option<String>,
}

/// User repository port. Listings are ordered by ascending id.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError>;

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, RepoError>;

    async fn find_all(&self) -> Result<Vec<User>, RepoError>;

    async fn find_page(&self, skip: u64, take: u64) -> Result<Vec<User>, RepoError>;

    async fn find_filtered(
        &self,
        filter: &UserFilter,
        skip: Option<u64>,
        take: Option<u64>,
    ) -> Result<Vec<User>, RepoError>;

    /// Insert a new user; the returned entity carries the assigned id.
    async fn insert(&self, user: User) -> Result<User, RepoError>;

    async fn update(&self, user: User) -> Result<User, RepoError>;

    async fn delete(&self, id: i64) -> Result<(), RepoError>;

    async fn user_name_exists(
        &self,
        user_name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;

    async fn count_filtered(&self, filter: &UserFilter) -> Result<u64, RepoError>;
}
