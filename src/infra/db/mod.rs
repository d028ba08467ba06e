//! Database connection and schema management.

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};
use sea_orm_migration::MigratorTrait;

use crate::config::{Config, MAX_DB_CONNECTIONS};
use crate::errors::{AppError, AppResult};

pub mod migrations;

use migrations::Migrator;

/// Database wrapper for connection management.
///
/// Holds a pool capped at a single connection. Dropping the wrapper releases
/// it; [`Database::close`] does so explicitly and reports failures.
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the connection described by `config`. Schema migrations are not run.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ConnectOptions::new(config.database_url().to_owned());
        options
            .max_connections(MAX_DB_CONNECTIONS)
            .min_connections(1)
            .connect_timeout(config.connect_timeout())
            .sqlx_logging(config.sql_logging);

        let connection = SeaDatabase::connect(options)
            .await
            .map_err(AppError::Connection)?;

        tracing::debug!("Database connection established");
        Ok(Self { connection })
    }

    /// Get a reference to the database connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Run pending migrations.
    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Rollback the last migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Get migration status (list all migrations with applied status).
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        use sea_orm::{EntityName, EntityTrait, QueryOrder};
        use sea_orm_migration::seaql_migrations;

        // A database that never ran a migration has no tracking table yet
        if !self.has_table(seaql_migrations::Entity.table_name()).await? {
            return Ok(Migrator::migrations()
                .iter()
                .map(|m| (m.name().to_string(), false))
                .collect());
        }

        let applied: std::collections::HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        let migrations: Vec<(String, bool)> = Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let is_applied = applied.contains(&name);
                (name, is_applied)
            })
            .collect();

        Ok(migrations)
    }

    /// Drop every table and run all migrations fresh.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Release the connection.
    pub async fn close(self) -> AppResult<()> {
        self.connection.close().await.map_err(AppError::from)?;
        tracing::debug!("Database connection closed");
        Ok(())
    }

    async fn has_table(&self, table: &str) -> Result<bool, DbErr> {
        let row = self
            .connection
            .query_one(Statement::from_sql_and_values(
                self.connection.get_database_backend(),
                "SELECT to_regclass($1) IS NOT NULL AS present",
                [table.into()],
            ))
            .await?;

        Ok(row
            .and_then(|r| r.try_get::<bool>("", "present").ok())
            .unwrap_or(false))
    }
}
