//! Lock entity model and write DTOs.

use lovelock_core::availability::LockState;
use lovelock_core::error::CoreError;
use lovelock_core::status::{LockStatus, StatusId};
use lovelock_core::types::{LockId, Timestamp, UserId};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `locks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lock {
    pub id: LockId,
    pub owner_id: Option<UserId>,
    pub zone: String,
    pub skin: String,
    pub content_text: String,
    pub author_name: String,
    pub media_type: String,
    pub media_url: Option<String>,
    pub is_private: bool,
    pub status_id: StatusId,
    pub price: Decimal,
    pub resale_price: Option<Decimal>,
    pub golden_price: Option<Decimal>,
    pub views: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Lock {
    /// Typed status. Fails only if the lookup table and enum disagree.
    pub fn status(&self) -> Result<LockStatus, CoreError> {
        LockStatus::from_id(self.status_id).ok_or_else(|| {
            CoreError::Internal(format!(
                "Lock #{} has unknown status id {}",
                self.id, self.status_id
            ))
        })
    }

    /// The availability-relevant view of this row.
    pub fn state(&self) -> Result<LockState, CoreError> {
        Ok(LockState {
            status: self.status()?,
            resale_price: self.resale_price,
            golden_price: self.golden_price,
        })
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == Some(user_id)
    }
}

/// Everything the buyer configures on a lock.
#[derive(Debug, Clone)]
pub struct LockConfiguration {
    pub zone: String,
    pub skin: String,
    pub content_text: String,
    pub author_name: String,
    pub media_type: String,
    pub media_url: Option<String>,
    pub is_private: bool,
    /// Configuration price paid.
    pub price: Decimal,
}

/// DTO for inserting a freshly purchased lock.
#[derive(Debug, Clone)]
pub struct CreateLock {
    pub id: LockId,
    pub owner_id: UserId,
    pub configuration: LockConfiguration,
}

/// DTO for handing a listed lock to a new owner.
#[derive(Debug, Clone)]
pub struct TransferLock {
    pub owner_id: UserId,
    /// Full replacement configuration (configurator purchase of a listed number).
    pub configuration: Option<LockConfiguration>,
    /// Message replacement for a plain marketplace buy; ignored when
    /// `configuration` is set.
    pub content_text: Option<String>,
    pub author_name: Option<String>,
}

/// The listing a transfer expects to find. The transfer only applies while
/// the row still carries exactly this status and price.
#[derive(Debug, Clone, Copy)]
pub struct ExpectedListing {
    pub status: LockStatus,
    pub price: Decimal,
}
