//! Square Connect API client.
//!
//! Read-only access to the Square catalog, locations, payments, and
//! orders endpoints, plus the [`Platform`] trait the sync engine
//! consumes so tests can substitute a fake platform.

pub mod api;
pub mod models;

pub use api::{Platform, SquareApi, SquareApiError};
