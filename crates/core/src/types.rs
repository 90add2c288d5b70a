/// Database primary keys for append-only tables are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Lock numbers are PostgreSQL INTEGER, drawn from `[MIN_LOCK_ID, MAX_LOCK_ID]`.
pub type LockId = i32;

/// Users are owned by the external auth provider and identified by UUID.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Lowest lock number on the bridge.
pub const MIN_LOCK_ID: LockId = 1;

/// Highest lock number on the bridge.
pub const MAX_LOCK_ID: LockId = 1_000_000;

/// Whether `id` lies within the lock number space.
pub fn is_valid_lock_id(id: LockId) -> bool {
    (MIN_LOCK_ID..=MAX_LOCK_ID).contains(&id)
}
