//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_INPUT_PATH;

/// Load a Supabase export of the project tracker into PostgreSQL
#[derive(Parser, Debug)]
#[command(name = "tracker-migrate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replace the tracker tables' contents with a JSON export
    Import(ImportArgs),

    /// Print the current row count of each tracker table
    Counts,

    /// Manage the tracker schema
    Schema(SchemaArgs),
}

/// Arguments for the import command
#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Path of the JSON export
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH, env = "MIGRATION_INPUT")]
    pub input: PathBuf,

    /// Load and summarize the export without touching the database
    #[arg(long)]
    pub dry_run: bool,

    /// Apply pending schema migrations before importing
    #[arg(long, conflicts_with = "dry_run")]
    pub apply_schema: bool,
}

/// Arguments for the schema command
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    #[command(subcommand)]
    pub action: SchemaAction,
}

/// Schema migration actions
#[derive(Subcommand, Debug)]
pub enum SchemaAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Drop all tables and re-run every migration
    Fresh,
}
