//! Infrastructure layer - PostgreSQL access
//!
//! - Connection management and schema migrations (`db`)
//! - SeaORM entities for the five tracker tables (`entities`)
//! - Transactional table store used by the import (`store`)

pub mod db;
pub mod entities;
pub mod store;

pub use db::Database;
pub use store::{Persistence, TableStore};

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockTableStore;
