//! Lock number availability.
//!
//! The decision is pure: the caller reads the current row (if any) from the
//! store immediately before asking, and the answer is advisory. Nothing is
//! held between the check and a later purchase; the write path re-checks.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::golden::ReservedIds;
use crate::status::LockStatus;
use crate::types::{is_valid_lock_id, LockId};

/// The parts of a stored lock row that decide availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockState {
    pub status: LockStatus,
    pub resale_price: Option<Decimal>,
    pub golden_price: Option<Decimal>,
}

impl LockState {
    /// Price at which the lock can currently be bought, if it is listed.
    ///
    /// Only `For_Sale` rows with a resale price and `Reserved_Admin` rows with
    /// a golden price are listed.
    pub fn listing_price(&self) -> Option<Decimal> {
        match self.status {
            LockStatus::ForSale => self.resale_price,
            LockStatus::ReservedAdmin => self.golden_price,
            LockStatus::Active | LockStatus::BrokenHeart | LockStatus::Available => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    /// No row and not reserved.
    Free,
    /// Listed for resale (or a golden asset listed by the operator).
    Resale,
    Taken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub available: bool,
    pub status: AvailabilityStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl Availability {
    pub fn free() -> Self {
        Self {
            available: true,
            status: AvailabilityStatus::Free,
            price: None,
        }
    }

    pub fn resale(price: Decimal) -> Self {
        Self {
            available: true,
            status: AvailabilityStatus::Resale,
            price: Some(price),
        }
    }

    pub fn taken() -> Self {
        Self {
            available: false,
            status: AvailabilityStatus::Taken,
            price: None,
        }
    }
}

/// Decide whether `lock_id` can be bought given its current row.
///
/// Reserved membership overrides the absence of a row: an unlisted golden
/// number is `taken`, never `free`. Ids outside the lock range are `taken`.
pub fn resolve_availability(
    lock_id: LockId,
    row: Option<&LockState>,
    reserved: &ReservedIds,
) -> Availability {
    if !is_valid_lock_id(lock_id) {
        return Availability::taken();
    }

    match row {
        None if reserved.contains(lock_id) => Availability::taken(),
        None => Availability::free(),
        Some(state) => match state.listing_price() {
            Some(price) => Availability::resale(price),
            None => Availability::taken(),
        },
    }
}
