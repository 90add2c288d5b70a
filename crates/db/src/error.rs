use lovelock_core::types::LockId;

/// Name of the primary key constraint on `locks.id`.
pub const LOCKS_PRIMARY_KEY: &str = "pk_locks";

/// PostgreSQL error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Failure of a lock write that claims a lock number.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The lock number was claimed by a concurrent writer. Retryable.
    #[error("Lock #{lock_id} is already taken")]
    IdTaken { lock_id: LockId },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Whether `err` is a unique violation of `constraint`.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
