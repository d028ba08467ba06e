//! Table store - transactional access to the five tracker tables.
//!
//! The runner only sees the [`TableStore`] trait. [`Persistence`] implements
//! it on a SeaORM connection, wrapping the delete pass and the insert pass in
//! one transaction each. An uncommitted transaction is rolled back, so a
//! failed insert leaves the tables as the delete pass left them.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, TransactionTrait,
};

use super::entities::{admin_user, allocation, project, role, team_member};
use crate::domain::{Snapshot, TableCounts};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Table store trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Delete every row of the five tables and commit. Returns rows deleted per table.
    ///
    /// Allocations are deleted before the tables they reference.
    async fn clear_all(&self) -> AppResult<TableCounts>;

    /// Insert every snapshot record, one row each, and commit once at the end.
    /// Returns rows inserted per table.
    ///
    /// The first failing row aborts the pass and nothing from it is committed.
    async fn insert_snapshot(&self, snapshot: &Snapshot) -> AppResult<TableCounts>;

    /// Current row count of each table
    async fn counts(&self) -> AppResult<TableCounts>;
}

/// SeaORM implementation of [`TableStore`], borrowing the open connection
pub struct Persistence<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> Persistence<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TableStore for Persistence<'_> {
    async fn clear_all(&self) -> AppResult<TableCounts> {
        let txn = self.db.begin().await?;
        let result = delete_rows(&txn).await;
        finish(txn, result).await
    }

    async fn insert_snapshot(&self, snapshot: &Snapshot) -> AppResult<TableCounts> {
        let txn = self.db.begin().await?;
        let result = insert_rows(&txn, snapshot).await;
        finish(txn, result).await
    }

    async fn counts(&self) -> AppResult<TableCounts> {
        Ok(TableCounts {
            team_members: team_member::Entity::find().count(self.db).await?,
            projects: project::Entity::find().count(self.db).await?,
            roles: role::Entity::find().count(self.db).await?,
            allocations: allocation::Entity::find().count(self.db).await?,
            admin_users: admin_user::Entity::find().count(self.db).await?,
        })
    }
}

/// Commit on success, roll back on error.
async fn finish<T>(txn: DatabaseTransaction, result: Result<T, DbErr>) -> AppResult<T> {
    match result {
        Ok(value) => {
            txn.commit().await.map_err(AppError::from)?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("Transaction rollback failed: {}", rollback_err);
            }
            Err(AppError::from(e))
        }
    }
}

async fn delete_rows<C: ConnectionTrait>(conn: &C) -> Result<TableCounts, DbErr> {
    // Order matters only for allocations; see DELETE_ORDER
    let allocations = delete_all::<allocation::Entity, _>(conn).await?;
    let team_members = delete_all::<team_member::Entity, _>(conn).await?;
    let projects = delete_all::<project::Entity, _>(conn).await?;
    let roles = delete_all::<role::Entity, _>(conn).await?;
    let admin_users = delete_all::<admin_user::Entity, _>(conn).await?;

    Ok(TableCounts {
        team_members,
        projects,
        roles,
        allocations,
        admin_users,
    })
}

async fn delete_all<E, C>(conn: &C) -> Result<u64, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let result = E::delete_many().exec(conn).await?;
    tracing::debug!(
        table = E::default().table_name(),
        rows = result.rows_affected,
        "Deleted rows"
    );
    Ok(result.rows_affected)
}

async fn insert_rows<C: ConnectionTrait>(conn: &C, snapshot: &Snapshot) -> Result<TableCounts, DbErr> {
    let team_members = insert_each(
        conn,
        snapshot
            .team_members
            .iter()
            .map(|r| team_member::Model::from(r).into_active_model())
            .collect(),
    )
    .await?;
    tracing::info!("Inserted {} team members", team_members);

    let projects = insert_each(
        conn,
        snapshot
            .projects
            .iter()
            .map(|r| project::Model::from(r).into_active_model())
            .collect(),
    )
    .await?;
    tracing::info!("Inserted {} projects", projects);

    let roles = insert_each(
        conn,
        snapshot
            .roles
            .iter()
            .map(|r| role::Model::from(r).into_active_model())
            .collect(),
    )
    .await?;
    tracing::info!("Inserted {} roles", roles);

    let allocations = insert_each(
        conn,
        snapshot
            .allocations
            .iter()
            .map(|r| allocation::Model::from(r).into_active_model())
            .collect(),
    )
    .await?;
    tracing::info!("Inserted {} allocations", allocations);

    let admin_users = insert_each(
        conn,
        snapshot
            .admin_users
            .iter()
            .map(|r| admin_user::Model::from(r).into_active_model())
            .collect(),
    )
    .await?;
    tracing::info!("Inserted {} admin users", admin_users);

    Ok(TableCounts {
        team_members,
        projects,
        roles,
        allocations,
        admin_users,
    })
}

/// One INSERT per row, in order.
async fn insert_each<A, C>(conn: &C, rows: Vec<A>) -> Result<u64, DbErr>
where
    A: ActiveModelTrait + Send,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    let mut inserted = 0;
    for row in rows {
        inserted += <A::Entity as EntityTrait>::insert(row)
            .exec_without_returning(conn)
            .await?;
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, NaiveDate};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction};
    use uuid::Uuid;

    use super::*;
    use crate::domain::{
        AdminUserRecord, AllocationRecord, ProjectRecord, RoleRecord, TeamMemberRecord,
    };

    fn affected(rows: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected: rows,
        }
    }

    /// SQL text of each logged transaction
    fn statements(log: Vec<Transaction>) -> Vec<Vec<String>> {
        log.iter()
            .map(|txn| txn.statements().iter().map(|s| s.sql.clone()).collect())
            .collect()
    }

    fn snapshot() -> Snapshot {
        let created_at = DateTime::parse_from_rfc3339("2025-06-22T10:30:00+00:00").unwrap();
        let member_id = Uuid::new_v4();
        let project_id = Uuid::new_v4();
        Snapshot {
            team_members: vec![TeamMemberRecord {
                id: member_id,
                name: "Ayesha".to_string(),
                email: None,
                role: "Engineer".to_string(),
                department: None,
                status: None,
                created_at,
            }],
            projects: vec![ProjectRecord {
                id: project_id,
                name: "Portal".to_string(),
                client: "Acme".to_string(),
                start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                end_date: None,
                status: "Active".to_string(),
                priority: None,
                created_at,
            }],
            roles: vec![RoleRecord {
                id: Uuid::new_v4(),
                name: "Engineer".to_string(),
                department: Some("Delivery".to_string()),
                created_at,
            }],
            allocations: vec![AllocationRecord {
                id: Uuid::new_v4(),
                team_member_id: member_id,
                project_id,
                month: "September".to_string(),
                year: 2025,
                percentage: 50.0,
                created_at,
            }],
            admin_users: vec![AdminUserRecord {
                id: Uuid::new_v4(),
                username: "admin".to_string(),
                password_hash: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
                role: "super_admin".to_string(),
                created_at,
            }],
        }
    }

    #[tokio::test]
    async fn clear_all_deletes_allocations_first_and_commits() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([affected(4), affected(2), affected(1), affected(3), affected(1)])
            .into_connection();

        let deleted = Persistence::new(&conn).clear_all().await.unwrap();

        assert_eq!(
            deleted,
            TableCounts {
                team_members: 2,
                projects: 1,
                roles: 3,
                allocations: 4,
                admin_users: 1,
            }
        );

        let log = statements(conn.into_transaction_log());
        assert_eq!(log.len(), 1);
        let txn = &log[0];
        assert_eq!(txn.len(), 7);
        assert_eq!(txn[0], "BEGIN");
        assert!(txn[1].contains(r#"DELETE FROM "allocations""#));
        assert!(txn[2].contains(r#"DELETE FROM "team_members""#));
        assert!(txn[3].contains(r#"DELETE FROM "projects""#));
        assert_eq!(txn[6], "COMMIT");
    }

    #[tokio::test]
    async fn insert_snapshot_writes_every_table_in_one_transaction() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([affected(1), affected(1), affected(1), affected(1), affected(1)])
            .into_connection();

        let inserted = Persistence::new(&conn)
            .insert_snapshot(&snapshot())
            .await
            .unwrap();

        assert_eq!(
            inserted,
            TableCounts {
                team_members: 1,
                projects: 1,
                roles: 1,
                allocations: 1,
                admin_users: 1,
            }
        );

        let log = statements(conn.into_transaction_log());
        assert_eq!(log.len(), 1);
        let txn = &log[0];
        assert_eq!(txn.first().map(String::as_str), Some("BEGIN"));
        assert!(txn[1].contains(r#"INSERT INTO "team_members""#));
        assert!(txn[2].contains(r#"INSERT INTO "projects""#));
        assert!(txn[3].contains(r#"INSERT INTO "roles""#));
        assert!(txn[4].contains(r#"INSERT INTO "allocations""#));
        assert!(txn[4].contains(r#""team_member_id""#));
        assert!(txn[5].contains(r#"INSERT INTO "admin_users""#));
        assert_eq!(txn.last().map(String::as_str), Some("COMMIT"));
    }

    #[tokio::test]
    async fn failed_insert_rolls_back_before_admin_users() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([affected(1), affected(1), affected(1)])
            .append_exec_errors([DbErr::Custom("violates foreign key constraint".into())])
            .into_connection();

        let err = Persistence::new(&conn)
            .insert_snapshot(&snapshot())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
        assert!(err.to_string().contains("foreign key"));

        let log = statements(conn.into_transaction_log());
        assert_eq!(log.len(), 1);
        let txn = &log[0];
        assert_eq!(txn.first().map(String::as_str), Some("BEGIN"));
        assert!(txn[4].contains(r#"INSERT INTO "allocations""#));
        assert_eq!(txn.last().map(String::as_str), Some("ROLLBACK"));
        assert!(!txn.iter().any(|sql| sql.contains("admin_users")));
        assert!(!txn.iter().any(|sql| sql == "COMMIT"));
    }

    #[tokio::test]
    async fn delete_pass_commits_before_insert_pass_begins() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([affected(0), affected(0), affected(0), affected(0), affected(0)])
            .append_exec_results([affected(1), affected(1), affected(1), affected(1), affected(1)])
            .into_connection();
        let store = Persistence::new(&conn);

        store.clear_all().await.unwrap();
        store.insert_snapshot(&snapshot()).await.unwrap();

        let log = statements(conn.into_transaction_log());
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].last().map(String::as_str), Some("COMMIT"));
        assert!(log[0].iter().all(|sql| !sql.starts_with("INSERT")));
        assert_eq!(log[1].first().map(String::as_str), Some("BEGIN"));
        assert!(log[1].iter().all(|sql| !sql.starts_with("DELETE")));
    }
}
