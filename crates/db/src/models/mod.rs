//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - Plain DTOs for inserts and conditional updates

pub mod lock;
pub mod transaction;
