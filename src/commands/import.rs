//! Import command - load a Supabase export into the tracker tables.
//!
//! ## Usage
//!
//! ```bash
//! # Import ./supabase_data.json
//! tracker-migrate import
//!
//! # Check an export without connecting
//! tracker-migrate import --input export.json --dry-run
//!
//! # Create the tables first on an empty database
//! tracker-migrate import --apply-schema
//! ```

use std::sync::Arc;

use crate::cli::args::ImportArgs;
use crate::config::Config;
use crate::domain::Snapshot;
use crate::errors::AppResult;
use crate::infra::{Database, Persistence};
use crate::services::{log_counts, Importer};

/// Execute the import command
pub async fn execute(args: ImportArgs, config: Config) -> AppResult<()> {
    if args.dry_run {
        let snapshot = Snapshot::load(&args.input)?;
        log_counts("Data loaded", &snapshot.counts());
        tracing::info!("Dry run, database left untouched");
        return Ok(());
    }

    let db = Database::connect(&config).await?;
    tracing::info!("Connected to PostgreSQL");

    let snapshot = Snapshot::load(&args.input)?;
    tracing::debug!("Loaded {}", args.input.display());

    if args.apply_schema {
        tracing::info!("Applying pending schema migrations...");
        db.run_migrations().await?;
    }

    let report = Importer::new(Arc::new(Persistence::new(db.connection())))
        .run(&snapshot)
        .await?;

    println!("\nVerifying data:");
    print!("{}", report.verified);

    db.close().await?;
    tracing::info!("Migration complete");
    Ok(())
}
