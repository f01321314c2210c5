//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod integration_repo;
pub mod product_repo;
pub mod store_repo;
pub mod sync_log_repo;
pub mod transaction_product_repo;
pub mod transaction_repo;

pub use integration_repo::IntegrationRepo;
pub use product_repo::ProductRepo;
pub use store_repo::StoreRepo;
pub use sync_log_repo::SyncLogRepo;
pub use transaction_product_repo::TransactionProductRepo;
pub use transaction_repo::TransactionRepo;
