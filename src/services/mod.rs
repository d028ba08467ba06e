//! Services layer - application use cases
//!
//! Services depend on infrastructure traits, never on SeaORM directly.

mod importer;

pub use importer::{log_counts, ImportReport, Importer};
