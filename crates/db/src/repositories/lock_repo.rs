//! Repository for the `locks` table.
//!
//! Reads are never cached: every availability check and allocation works
//! from a fresh query. Writes that claim a lock number also append the
//! matching `transactions` row inside the same database transaction.

use std::collections::HashSet;

use lovelock_core::status::LockStatus;
use lovelock_core::types::{LockId, UserId};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres};

use crate::error::{is_unique_violation, WriteError, LOCKS_PRIMARY_KEY};
use crate::models::lock::{CreateLock, ExpectedListing, Lock, TransferLock};
use crate::models::transaction::{NewTransaction, Transaction};
use crate::repositories::TransactionRepo;

/// Column list for `locks` queries.
const COLUMNS: &str = "\
    id, owner_id, zone, skin, content_text, author_name, media_type, media_url, \
    is_private, status_id, price, resale_price, golden_price, views, \
    created_at, updated_at";

/// Provides reads and lifecycle writes for locks.
pub struct LockRepo;

impl LockRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find a lock by its number.
    pub async fn find_by_id(pool: &PgPool, id: LockId) -> Result<Option<Lock>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locks WHERE id = $1");
        sqlx::query_as::<_, Lock>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every lock number that has a row, read fresh from the table.
    pub async fn list_ids(pool: &PgPool) -> Result<HashSet<LockId>, sqlx::Error> {
        let ids = sqlx::query_scalar::<_, LockId>("SELECT id FROM locks")
            .fetch_all(pool)
            .await?;
        Ok(ids.into_iter().collect())
    }

    /// Locks owned by a user, lowest number first.
    pub async fn list_by_owner(pool: &PgPool, owner_id: UserId) -> Result<Vec<Lock>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locks WHERE owner_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, Lock>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Locks that can be bought right now, cheapest first.
    ///
    /// Includes owner listings (`For_Sale`) and priced golden assets
    /// (`Reserved_Admin`).
    pub async fn list_listed(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Lock>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM locks \
             WHERE (status_id = $1 AND resale_price IS NOT NULL) \
                OR (status_id = $2 AND golden_price IS NOT NULL) \
             ORDER BY COALESCE(resale_price, golden_price) ASC, id ASC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Lock>(&query)
            .bind(LockStatus::ForSale.id())
            .bind(LockStatus::ReservedAdmin.id())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Bump the view counter and return the updated row.
    ///
    /// A view is not an edit, so `updated_at` is left alone.
    pub async fn increment_views(pool: &PgPool, id: LockId) -> Result<Option<Lock>, sqlx::Error> {
        let query = format!(
            "UPDATE locks SET views = views + 1 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lock>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Purchase writes (lock + transaction, atomically)
    // -----------------------------------------------------------------------

    /// Insert a newly purchased lock together with its purchase transaction.
    ///
    /// The lock number is claimed by the primary key: if another writer got
    /// there first, the insert fails with [`WriteError::IdTaken`] and nothing
    /// is written.
    pub async fn create_with_purchase(
        pool: &PgPool,
        input: &CreateLock,
        payment: &NewTransaction,
    ) -> Result<(Lock, Transaction), WriteError> {
        let mut tx = pool.begin().await?;

        let config = &input.configuration;
        let query = format!(
            "INSERT INTO locks \
                 (id, owner_id, zone, skin, content_text, author_name, \
                  media_type, media_url, is_private, status_id, price) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        let lock = sqlx::query_as::<_, Lock>(&query)
            .bind(input.id)
            .bind(input.owner_id)
            .bind(&config.zone)
            .bind(&config.skin)
            .bind(&config.content_text)
            .bind(&config.author_name)
            .bind(&config.media_type)
            .bind(&config.media_url)
            .bind(config.is_private)
            .bind(LockStatus::Active.id())
            .bind(config.price)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e, LOCKS_PRIMARY_KEY) {
                    WriteError::IdTaken { lock_id: input.id }
                } else {
                    WriteError::Database(e)
                }
            })?;

        let transaction = TransactionRepo::insert(&mut *tx, lock.id, payment).await?;
        commit(tx, lock.id).await?;

        Ok((lock, transaction))
    }

    /// Hand a listed lock to a new owner together with its resale transaction.
    ///
    /// The update only applies while the row still has the expected status,
    /// listing price, and seller. If the listing changed or was bought in the
    /// meantime, nothing is written and [`WriteError::IdTaken`] is returned.
    ///
    /// Without a new configuration the buyer keeps the lock's look and
    /// visibility, but the seller's attached media is dropped.
    pub async fn transfer_with_purchase(
        pool: &PgPool,
        lock_id: LockId,
        seller_id: Option<UserId>,
        expected: ExpectedListing,
        input: &TransferLock,
        payment: &NewTransaction,
    ) -> Result<(Lock, Transaction), WriteError> {
        let mut tx = pool.begin().await?;

        let guard = "WHERE id = $1 \
                       AND status_id = $2 \
                       AND COALESCE(resale_price, golden_price) = $3 \
                       AND owner_id IS NOT DISTINCT FROM $4";

        let lock = match &input.configuration {
            Some(config) => {
                let query = format!(
                    "UPDATE locks SET \
                         owner_id = $5, status_id = $6, \
                         resale_price = NULL, golden_price = NULL, \
                         zone = $7, skin = $8, content_text = $9, author_name = $10, \
                         media_type = $11, media_url = $12, is_private = $13, price = $14, \
                         updated_at = now() \
                     {guard} \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Lock>(&query)
                    .bind(lock_id)
                    .bind(expected.status.id())
                    .bind(expected.price)
                    .bind(seller_id)
                    .bind(input.owner_id)
                    .bind(LockStatus::Active.id())
                    .bind(&config.zone)
                    .bind(&config.skin)
                    .bind(&config.content_text)
                    .bind(&config.author_name)
                    .bind(&config.media_type)
                    .bind(&config.media_url)
                    .bind(config.is_private)
                    .bind(config.price)
                    .fetch_optional(&mut *tx)
                    .await?
            }
            None => {
                let query = format!(
                    "UPDATE locks SET \
                         owner_id = $5, status_id = $6, \
                         resale_price = NULL, golden_price = NULL, \
                         content_text = COALESCE($7, content_text), \
                         author_name = COALESCE($8, author_name), \
                         media_type = 'none', media_url = NULL, \
                         updated_at = now() \
                     {guard} \
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Lock>(&query)
                    .bind(lock_id)
                    .bind(expected.status.id())
                    .bind(expected.price)
                    .bind(seller_id)
                    .bind(input.owner_id)
                    .bind(LockStatus::Active.id())
                    .bind(&input.content_text)
                    .bind(&input.author_name)
                    .fetch_optional(&mut *tx)
                    .await?
            }
        };

        let Some(lock) = lock else {
            return Err(WriteError::IdTaken { lock_id });
        };

        let transaction = TransactionRepo::insert(&mut *tx, lock.id, payment).await?;
        commit(tx, lock.id).await?;

        Ok((lock, transaction))
    }

    // -----------------------------------------------------------------------
    // Owner lifecycle writes
    // -----------------------------------------------------------------------

    /// List an active lock for sale. Returns `None` if the lock is not
    /// active or not owned by `owner_id`.
    pub async fn set_listing(
        pool: &PgPool,
        id: LockId,
        owner_id: UserId,
        price: Decimal,
    ) -> Result<Option<Lock>, sqlx::Error> {
        let query = format!(
            "UPDATE locks SET status_id = $1, resale_price = $2, updated_at = now() \
             WHERE id = $3 AND owner_id = $4 AND status_id = $5 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lock>(&query)
            .bind(LockStatus::ForSale.id())
            .bind(price)
            .bind(id)
            .bind(owner_id)
            .bind(LockStatus::Active.id())
            .fetch_optional(pool)
            .await
    }

    /// Withdraw a listing. Returns `None` if the lock is not listed by
    /// `owner_id`.
    pub async fn cancel_listing(
        pool: &PgPool,
        id: LockId,
        owner_id: UserId,
    ) -> Result<Option<Lock>, sqlx::Error> {
        let query = format!(
            "UPDATE locks SET status_id = $1, resale_price = NULL, updated_at = now() \
             WHERE id = $2 AND owner_id = $3 AND status_id = $4 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lock>(&query)
            .bind(LockStatus::Active.id())
            .bind(id)
            .bind(owner_id)
            .bind(LockStatus::ForSale.id())
            .fetch_optional(pool)
            .await
    }

    /// Release a lock (breakup): clear the owner and any listing.
    pub async fn release(
        pool: &PgPool,
        id: LockId,
        owner_id: UserId,
    ) -> Result<Option<Lock>, sqlx::Error> {
        let query = format!(
            "UPDATE locks SET \
                 status_id = $1, owner_id = NULL, resale_price = NULL, updated_at = now() \
             WHERE id = $2 AND owner_id = $3 AND status_id IN ($4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lock>(&query)
            .bind(LockStatus::BrokenHeart.id())
            .bind(id)
            .bind(owner_id)
            .bind(LockStatus::Active.id())
            .bind(LockStatus::ForSale.id())
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Operator golden assets
    // -----------------------------------------------------------------------

    /// Create or reprice an operator-held golden asset.
    ///
    /// Returns `None` if the number already belongs to someone else.
    pub async fn upsert_golden(
        pool: &PgPool,
        id: LockId,
        price: Decimal,
    ) -> Result<Option<Lock>, sqlx::Error> {
        let query = format!(
            "INSERT INTO locks (id, status_id, golden_price) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET \
                 golden_price = EXCLUDED.golden_price, updated_at = now() \
             WHERE locks.status_id = EXCLUDED.status_id AND locks.owner_id IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lock>(&query)
            .bind(id)
            .bind(LockStatus::ReservedAdmin.id())
            .bind(price)
            .fetch_optional(pool)
            .await
    }

    /// Remove an unsold golden asset listing. Returns `true` if a row was deleted.
    pub async fn delete_golden(pool: &PgPool, id: LockId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM locks \
             WHERE id = $1 AND status_id = $2 AND owner_id IS NULL \
               AND NOT EXISTS (SELECT 1 FROM transactions t WHERE t.lock_id = locks.id)",
        )
        .bind(id)
        .bind(LockStatus::ReservedAdmin.id())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Commit a lock write, logging loudly if the commit itself fails.
///
/// A failed commit rolls back both the lock and its transaction row, so no
/// lock is left without its audit entry.
async fn commit(tx: sqlx::Transaction<'_, Postgres>, lock_id: LockId) -> Result<(), sqlx::Error> {
    tx.commit().await.map_err(|e| {
        tracing::error!(lock_id, error = %e, "Failed to commit lock write");
        e
    })
}
