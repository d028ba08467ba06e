//! Per-table row counts.

use std::fmt;

use crate::config::{
    INSERT_ORDER, TABLE_ADMIN_USERS, TABLE_ALLOCATIONS, TABLE_PROJECTS, TABLE_ROLES,
    TABLE_TEAM_MEMBERS,
};

/// Row (or record) count for each of the five tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub team_members: u64,
    pub projects: u64,
    pub roles: u64,
    pub allocations: u64,
    pub admin_users: u64,
}

/// A table whose count differs between two reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountMismatch {
    pub table: &'static str,
    pub expected: u64,
    pub actual: u64,
}

impl TableCounts {
    /// Count for a table name; `None` for names outside the five tables.
    pub fn get(&self, table: &str) -> Option<u64> {
        match table {
            TABLE_TEAM_MEMBERS => Some(self.team_members),
            TABLE_PROJECTS => Some(self.projects),
            TABLE_ROLES => Some(self.roles),
            TABLE_ALLOCATIONS => Some(self.allocations),
            TABLE_ADMIN_USERS => Some(self.admin_users),
            _ => None,
        }
    }

    /// `(table, count)` pairs in insertion order
    pub fn rows(&self) -> [(&'static str, u64); 5] {
        INSERT_ORDER.map(|table| (table, self.get(table).unwrap_or_default()))
    }

    pub fn total(&self) -> u64 {
        self.rows().iter().map(|(_, n)| n).sum()
    }

    /// Tables where `actual` disagrees with `self`
    pub fn mismatches(&self, actual: &TableCounts) -> Vec<CountMismatch> {
        self.rows()
            .into_iter()
            .zip(actual.rows())
            .filter(|((_, expected), (_, found))| expected != found)
            .map(|((table, expected), (_, found))| CountMismatch {
                table,
                expected,
                actual: found,
            })
            .collect()
    }
}

/// Human-readable label used in reports
pub fn table_label(table: &str) -> &'static str {
    match table {
        TABLE_TEAM_MEMBERS => "Team Members",
        TABLE_PROJECTS => "Projects",
        TABLE_ROLES => "Roles",
        TABLE_ALLOCATIONS => "Allocations",
        TABLE_ADMIN_USERS => "Admin Users",
        _ => "Unknown",
    }
}

impl fmt::Display for TableCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (table, count) in self.rows() {
            writeln!(f, "  - {}: {}", table_label(table), count)?;
        }
        Ok(())
    }
}
