//! `roles` table.

use sea_orm::entity::prelude::*;

use crate::domain::RoleRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub department: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&RoleRecord> for Model {
    fn from(record: &RoleRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            department: record.department.clone(),
            created_at: record.created_at,
        }
    }
}
