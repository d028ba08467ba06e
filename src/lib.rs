//! tracker-migrate - load a Supabase export of the project tracker into PostgreSQL
//!
//! The import deletes every row of the five tracker tables (team members,
//! projects, roles, allocations, admin users) and re-inserts them from a JSON
//! snapshot, then reports per-table row counts.
//!
//! # Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Environment settings and constants
//! - **domain**: The export document and row counts
//! - **services**: The import run
//! - **infra**: Database connection, schema migrations, entities, table store
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Create the tables
//! tracker-migrate schema up
//!
//! # Import ./supabase_data.json
//! tracker-migrate import
//!
//! # Row counts
//! tracker-migrate counts
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{Snapshot, TableCounts};
pub use errors::{AppError, AppResult};
pub use services::{ImportReport, Importer};
