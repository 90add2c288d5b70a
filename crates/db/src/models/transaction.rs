//! Transaction log entity model and insert DTO.

use lovelock_core::status::{StatusId, TransactionType};
use lovelock_core::types::{DbId, LockId, Timestamp, UserId};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the append-only `transactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Transaction {
    pub id: DbId,
    pub lock_id: LockId,
    pub buyer_id: UserId,
    pub seller_id: Option<UserId>,
    pub transaction_type_id: StatusId,
    pub amount: Decimal,
    pub commission: Decimal,
    pub created_at: Timestamp,
}

/// DTO for logging a value movement. The lock id is supplied by the writer.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub buyer_id: UserId,
    pub seller_id: Option<UserId>,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub commission: Decimal,
}
