//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or a connection inside a transaction) as the first
//! argument.

pub mod lock_repo;
pub mod transaction_repo;

pub use lock_repo::LockRepo;
pub use transaction_repo::TransactionRepo;
