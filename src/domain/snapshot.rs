//! The Supabase export, decoded.
//!
//! A snapshot holds the five collections exactly as exported. Field names
//! follow the export (snake_case per record, camelCase at the top level);
//! the two substitutions the destination needs are exposed as accessors.
//! Nullable columns must still be present as keys; only `status` and
//! `priority` may be left out.

use std::path::Path;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use super::counts::TableCounts;
use crate::config::{DEFAULT_MEMBER_STATUS, DEFAULT_PROJECT_PRIORITY};
use crate::errors::{AppError, AppResult};

/// Whole export document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub team_members: Vec<TeamMemberRecord>,
    pub projects: Vec<ProjectRecord>,
    pub roles: Vec<RoleRecord>,
    pub allocations: Vec<AllocationRecord>,
    pub admin_users: Vec<AdminUserRecord>,
}

impl Snapshot {
    /// Read and decode an export file.
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| AppError::InputRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&bytes, path)
    }

    /// Decode an export already in memory. `origin` is only used in errors.
    pub fn parse(bytes: &[u8], origin: impl AsRef<Path>) -> AppResult<Self> {
        serde_json::from_slice(bytes).map_err(|source| AppError::InputParse {
            path: origin.as_ref().to_path_buf(),
            source,
        })
    }

    /// Number of records per collection
    pub fn counts(&self) -> TableCounts {
        TableCounts {
            team_members: self.team_members.len() as u64,
            projects: self.projects.len() as u64,
            roles: self.roles.len() as u64,
            allocations: self.allocations.len() as u64,
            admin_users: self.admin_users.len() as u64,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamMemberRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(deserialize_with = "Option::deserialize")]
    pub email: Option<String>,
    pub role: String,
    #[serde(deserialize_with = "Option::deserialize")]
    pub department: Option<String>,
    /// Absent and `null` both fall back to [`DEFAULT_MEMBER_STATUS`]
    #[serde(default)]
    pub status: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl TeamMemberRecord {
    pub fn status(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_MEMBER_STATUS)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    pub id: Uuid,
    pub name: String,
    pub client: String,
    pub start_date: NaiveDate,
    #[serde(deserialize_with = "Option::deserialize")]
    pub end_date: Option<NaiveDate>,
    pub status: String,
    /// Absent and `null` both fall back to [`DEFAULT_PROJECT_PRIORITY`]
    #[serde(default)]
    pub priority: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

impl ProjectRecord {
    pub fn priority(&self) -> &str {
        self.priority.as_deref().unwrap_or(DEFAULT_PROJECT_PRIORITY)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(deserialize_with = "Option::deserialize")]
    pub department: Option<String>,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AllocationRecord {
    pub id: Uuid,
    /// Exported as `user_id`; later exports already used `team_member_id`
    #[serde(rename = "user_id", alias = "team_member_id")]
    pub team_member_id: Uuid,
    pub project_id: Uuid,
    pub month: String,
    pub year: i32,
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub percentage: f64,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminUserRecord {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<FixedOffset>,
}

/// Supabase serializes `numeric` columns as strings.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Numeric {
        Number(f64),
        Text(String),
    }

    match Numeric::deserialize(deserializer)? {
        Numeric::Number(n) => Ok(n),
        Numeric::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid numeric string {:?}", s))),
    }
}
