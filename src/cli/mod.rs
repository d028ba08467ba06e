//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `import` - Load a Supabase export into the tracker tables
//! - `counts` - Report current row counts
//! - `schema` - Schema migrations

pub mod args;

pub use args::{Cli, Commands};
