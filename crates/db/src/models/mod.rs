//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Insert / update DTOs built by the HTTP layer from parsed form input

pub mod care_task;
pub mod growth_entry;
pub mod plant;
pub mod session;
pub mod user;
