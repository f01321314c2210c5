//! Catalog and transaction synchronization engine.
//!
//! Reconciles the Square catalog and payment history with the internal
//! store database under idempotent-upsert semantics. Two independent
//! entry points -- [`catalog::import_catalog`] and
//! [`transactions::sync_transactions`] -- both tolerate per-record
//! failures and append one audit row per run through [`recorder`].

pub mod catalog;
pub mod error;
pub mod recorder;
pub mod resolver;
pub mod transactions;

pub use catalog::{import_catalog, CatalogImportReport};
pub use error::SyncError;
pub use transactions::{sync_transactions, DateRange, TransactionSyncReport};
