//! Shared domain types and dependency-free sync logic.
//!
//! This crate has no internal dependencies so it can be used by the
//! database layer, the sync engine, the API server, and any future CLI
//! tooling alike.

pub mod error;
pub mod money;
pub mod paging;
pub mod sync;
pub mod types;
