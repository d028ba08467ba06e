//! `admin_users` table.

use sea_orm::entity::prelude::*;

use crate::domain::AdminUserRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "admin_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&AdminUserRecord> for Model {
    fn from(record: &AdminUserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username.clone(),
            password_hash: record.password_hash.clone(),
            role: record.role.clone(),
            created_at: record.created_at,
        }
    }
}
