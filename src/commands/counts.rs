//! Counts command - report row counts without changing anything.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::Importer;

/// Execute the counts command
pub async fn execute(config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    tracing::info!("Connected to PostgreSQL");

    let counts = Importer::new(Arc::new(Persistence::new(db.connection())))
        .counts()
        .await?;

    println!("\nRow counts:");
    print!("{}", counts);
    println!("  Total: {}", counts.total());

    db.close().await
}
