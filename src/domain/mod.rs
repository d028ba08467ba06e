//! Domain layer - the export document and what is reported about it
//!
//! No database types live here; `infra` maps these records onto tables.

pub mod counts;
pub mod snapshot;

pub use counts::{table_label, CountMismatch, TableCounts};
pub use snapshot::{
    AdminUserRecord, AllocationRecord, ProjectRecord, RoleRecord, Snapshot, TeamMemberRecord,
};
