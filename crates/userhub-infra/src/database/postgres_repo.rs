//! PostgreSQL repository implementation.

use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};

use userhub_core::domain::User;
use userhub_core::error::RepoError;
use userhub_core::ports::{UserFilter, UserRepository};

use super::entity::user::{self, Entity as UserEntity};

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Apply the optional filter predicates: substring match on user name,
/// email and mobile; exact match on the stored role string.
fn apply_filter(mut query: Select<UserEntity>, filter: &UserFilter) -> Select<UserEntity> {
    if let Some(name) = non_blank(&filter.user_name) {
        query = query.filter(user::Column::UserName.contains(name));
    }
    if let Some(role) = non_blank(&filter.role) {
        query = query.filter(user::Column::Role.eq(role));
    }
    if let Some(email) = non_blank(&filter.email_id) {
        query = query.filter(user::Column::EmailId.contains(email));
    }
    if let Some(mobile) = non_blank(&filter.mobile_num) {
        query = query.filter(user::Column::MobileNum.contains(mobile));
    }
    query
}

fn map_db_err(e: sea_orm::DbErr) -> RepoError {
    let message = e.to_string();
    if message.contains("duplicate") || message.contains("unique") {
        RepoError::Constraint("user name is already taken".to_string())
    } else {
        RepoError::Query(message)
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_user_name(&self, user_name: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::UserName.eq(user_name))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_page(&self, skip: u64, take: u64) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .offset(skip)
            .limit(take)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_filtered(
        &self,
        filter: &UserFilter,
        skip: Option<u64>,
        take: Option<u64>,
    ) -> Result<Vec<User>, RepoError> {
        let mut query = apply_filter(UserEntity::find(), filter).order_by_asc(user::Column::Id);

        if let Some(skip) = skip {
            query = query.offset(skip);
        }
        if let Some(take) = take {
            query = query.limit(take);
        }

        let result = query.all(&self.db).await.map_err(map_db_err)?;
        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut active: user::ActiveModel = user.into();
        active.id = NotSet;

        let model = active.insert(&self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let active: user::ActiveModel = user.into();
        let model = active.update(&self.db).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => RepoError::NotFound,
            other => map_db_err(other),
        })?;

        Ok(model.into())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn user_name_exists(
        &self,
        user_name: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, RepoError> {
        let mut query = UserEntity::find().filter(user::Column::UserName.eq(user_name));

        if let Some(id) = exclude_id {
            query = query.filter(user::Column::Id.ne(id));
        }

        let count = query.count(&self.db).await.map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        UserEntity::find().count(&self.db).await.map_err(map_db_err)
    }

    async fn count_filtered(&self, filter: &UserFilter) -> Result<u64, RepoError> {
        apply_filter(UserEntity::find(), filter)
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }
}
