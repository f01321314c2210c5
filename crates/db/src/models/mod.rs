//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Where updates exist, an update DTO with the writable fields

pub mod integration;
pub mod product;
pub mod store;
pub mod sync_log;
pub mod transaction;
pub mod transaction_product;
