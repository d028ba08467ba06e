//! `allocations` table.

use sea_orm::entity::prelude::*;

use crate::domain::AllocationRecord;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "allocations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub team_member_id: Uuid,
    pub project_id: Uuid,
    pub month: String,
    pub year: i32,
    #[sea_orm(column_type = "Double")]
    pub percentage: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team_member::Entity",
        from = "Column::TeamMemberId",
        to = "super::team_member::Column::Id"
    )]
    TeamMember,
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id"
    )]
    Project,
}

impl Related<super::team_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMember.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&AllocationRecord> for Model {
    fn from(record: &AllocationRecord) -> Self {
        Self {
            id: record.id,
            team_member_id: record.team_member_id,
            project_id: record.project_id,
            month: record.month.clone(),
            year: record.year,
            percentage: record.percentage,
            created_at: record.created_at,
        }
    }
}
