//! SeaORM entity definitions
//!
//! One entity per destination table. Each converts from the matching export
//! record; that conversion is the only place record fields meet columns.

pub mod admin_user;
pub mod allocation;
pub mod project;
pub mod role;
pub mod team_member;
