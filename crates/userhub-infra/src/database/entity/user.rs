//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use userhub_core::domain::Role;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub user_name: String,
    pub password_hash: String,
    pub full_name: String,
    /// "Admin" / "ReadOnly", stored as text.
    pub role: String,
    pub email_id: String,
    pub mobile_num: String,
    pub profile_pic_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for userhub_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_name: model.user_name,
            password_hash: model.password_hash,
            full_name: model.full_name,
            role: Role::parse_or_default(&model.role),
            email_id: model.email_id,
            mobile_num: model.mobile_num,
            profile_pic_url: model.profile_pic_url,
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel. The id stays set;
/// inserts reset it so the store assigns one.
impl From<userhub_core::domain::User> for ActiveModel {
    fn from(user: userhub_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            user_name: Set(user.user_name),
            password_hash: Set(user.password_hash),
            full_name: Set(user.full_name),
            role: Set(user.role.to_string()),
            email_id: Set(user.email_id),
            mobile_num: Set(user.mobile_num),
            profile_pic_url: Set(user.profile_pic_url),
            created_at: Set(user.created_at.into()),
        }
    }
}
