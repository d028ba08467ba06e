//! `projects` table.

use sea_orm::entity::prelude::*;

use crate::domain::ProjectRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub client: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub status: String,
    pub priority: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::allocation::Entity")]
    Allocation,
}

impl Related<super::allocation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Allocation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&ProjectRecord> for Model {
    fn from(record: &ProjectRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            client: record.client.clone(),
            start_date: record.start_date,
            end_date: record.end_date,
            status: record.status.clone(),
            priority: record.priority().to_string(),
            created_at: record.created_at,
        }
    }
}
