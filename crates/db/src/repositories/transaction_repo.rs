//! Repository for the append-only `transactions` table.
//!
//! Rows are only ever inserted, and only from inside the lock writer's
//! database transaction. There is no update or delete.

use lovelock_core::types::LockId;
use sqlx::{PgConnection, PgPool};

use crate::models::transaction::{NewTransaction, Transaction};

/// Column list for `transactions` queries.
const COLUMNS: &str = "\
    id, lock_id, buyer_id, seller_id, transaction_type_id, \
    amount, commission, created_at";

pub struct TransactionRepo;

impl TransactionRepo {
    /// Append a transaction row for `lock_id` on an open connection.
    pub async fn insert(
        conn: &mut PgConnection,
        lock_id: LockId,
        input: &NewTransaction,
    ) -> Result<Transaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO transactions \
                 (lock_id, buyer_id, seller_id, transaction_type_id, amount, commission) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(lock_id)
            .bind(input.buyer_id)
            .bind(input.seller_id)
            .bind(input.transaction_type.id())
            .bind(input.amount)
            .bind(input.commission)
            .fetch_one(&mut *conn)
            .await
    }

    /// Most recent transactions across all locks, newest first.
    pub async fn list_recent(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions \
             ORDER BY id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
