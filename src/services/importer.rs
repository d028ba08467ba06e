//! Importer - replaces the tracker tables' contents with a snapshot.
//!
//! The run is strictly sequential: report what was loaded, clear the tables,
//! insert the snapshot, then re-count. Any error ends the run at that step.

use std::sync::Arc;

use crate::config::DELETE_ORDER;
use crate::domain::{table_label, Snapshot, TableCounts};
use crate::errors::AppResult;
use crate::infra::TableStore;

/// What a completed run did, table by table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportReport {
    /// Records in the snapshot
    pub loaded: TableCounts,
    /// Rows removed by the delete pass
    pub deleted: TableCounts,
    /// Rows written by the insert pass
    pub inserted: TableCounts,
    /// Row counts queried after the insert pass committed
    pub verified: TableCounts,
}

impl ImportReport {
    /// True when every table ended up with exactly the snapshot's records
    pub fn is_consistent(&self) -> bool {
        self.loaded.mismatches(&self.verified).is_empty()
    }
}

pub struct Importer<'a> {
    store: Arc<dyn TableStore + 'a>,
}

impl<'a> Importer<'a> {
    pub fn new(store: Arc<dyn TableStore + 'a>) -> Self {
        Self { store }
    }

    /// Replace the contents of all five tables with `snapshot`.
    pub async fn run(&self, snapshot: &Snapshot) -> AppResult<ImportReport> {
        let loaded = snapshot.counts();
        log_counts("Data loaded", &loaded);

        tracing::info!("Clearing existing data ({})", DELETE_ORDER.join(", "));
        let deleted = self.store.clear_all().await?;
        tracing::info!("Data cleared ({} rows)", deleted.total());

        tracing::info!("Inserting {} records", loaded.total());
        let inserted = self.store.insert_snapshot(snapshot).await?;
        tracing::info!("All data migrated ({} rows)", inserted.total());

        let verified = self.store.counts().await?;
        for mismatch in loaded.mismatches(&verified) {
            tracing::warn!(
                "{} holds {} rows, snapshot had {}",
                mismatch.table,
                mismatch.actual,
                mismatch.expected
            );
        }

        Ok(ImportReport {
            loaded,
            deleted,
            inserted,
            verified,
        })
    }

    /// Current row counts, without changing anything.
    pub async fn counts(&self) -> AppResult<TableCounts> {
        self.store.counts().await
    }
}

/// Log one line per table under a heading.
pub fn log_counts(heading: &str, counts: &TableCounts) {
    tracing::info!("{}:", heading);
    for (table, count) in counts.rows() {
        tracing::info!("  - {}: {}", table_label(table), count);
    }
}

#[cfg(test)]
mod tests {
    use mockall::Sequence;

    use super::*;
    use crate::errors::AppError;
    use crate::infra::MockTableStore;

    fn empty_snapshot() -> Snapshot {
        Snapshot {
            team_members: vec![],
            projects: vec![],
            roles: vec![],
            allocations: vec![],
            admin_users: vec![],
        }
    }

    #[tokio::test]
    async fn run_clears_then_inserts_then_counts() {
        let mut store = MockTableStore::new();
        let mut seq = Sequence::new();

        store
            .expect_clear_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| {
                Ok(TableCounts {
                    allocations: 7,
                    ..TableCounts::default()
                })
            });
        store
            .expect_insert_snapshot()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(TableCounts::default()));
        store
            .expect_counts()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(TableCounts::default()));

        let report = Importer::new(Arc::new(store))
            .run(&empty_snapshot())
            .await
            .unwrap();

        assert_eq!(report.deleted.allocations, 7);
        assert!(report.is_consistent());
    }

    #[tokio::test]
    async fn failed_clear_skips_insert_and_verification() {
        let mut store = MockTableStore::new();
        store
            .expect_clear_all()
            .returning(|| Err(AppError::Database(sea_orm::DbErr::Custom("locked".into()))));
        store.expect_insert_snapshot().never();
        store.expect_counts().never();

        let err = Importer::new(Arc::new(store))
            .run(&empty_snapshot())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn failed_insert_skips_verification() {
        let mut store = MockTableStore::new();
        store
            .expect_clear_all()
            .returning(|| Ok(TableCounts::default()));
        store
            .expect_insert_snapshot()
            .returning(|_| Err(AppError::Database(sea_orm::DbErr::Custom("fk".into()))));
        store.expect_counts().never();

        let result = Importer::new(Arc::new(store)).run(&empty_snapshot()).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn count_mismatch_is_reported_not_raised() {
        let mut store = MockTableStore::new();
        store
            .expect_clear_all()
            .returning(|| Ok(TableCounts::default()));
        store
            .expect_insert_snapshot()
            .returning(|_| Ok(TableCounts::default()));
        store.expect_counts().returning(|| {
            Ok(TableCounts {
                roles: 3,
                ..TableCounts::default()
            })
        });

        let report = Importer::new(Arc::new(store))
            .run(&empty_snapshot())
            .await
            .unwrap();

        assert!(!report.is_consistent());
        assert_eq!(report.verified.roles, 3);
    }

    #[tokio::test]
    async fn counts_only_reads() {
        let mut store = MockTableStore::new();
        store.expect_clear_all().never();
        store.expect_insert_snapshot().never();
        store.expect_counts().times(1).returning(|| {
            Ok(TableCounts {
                team_members: 12,
                ..TableCounts::default()
            })
        });

        let counts = Importer::new(Arc::new(store)).counts().await.unwrap();

        assert_eq!(counts.team_members, 12);
    }
}
