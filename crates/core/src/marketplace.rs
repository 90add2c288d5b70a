//! Resale marketplace rules: lifecycle transitions, listing prices, and
//! settlement of commissions.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::CoreError;
use crate::pricing::{cents, round_cents};
use crate::status::LockStatus;

/// Default platform cut of a resale, in percent.
pub const DEFAULT_COMMISSION_PERCENT: u32 = 10;

/// Lowest allowed listing price (1.00).
pub fn min_listing_price() -> Decimal {
    cents(100)
}

/// Highest allowed listing price (1,000,000.00).
pub fn max_listing_price() -> Decimal {
    cents(100_000_000)
}

/// Convert a whole percentage into a rate (`10` -> `0.10`).
pub fn commission_rate(percent: u32) -> Decimal {
    Decimal::new(i64::from(percent), 2)
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Owner or buyer actions that move a lock through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockAction {
    /// Owner puts an active lock on the marketplace.
    List,
    /// Owner withdraws a marketplace listing.
    CancelListing,
    /// Owner releases the lock (breakup).
    Release,
    /// A buyer acquires a listed lock.
    Buy,
}

impl LockAction {
    fn verb(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::CancelListing => "cancel the listing of",
            Self::Release => "release",
            Self::Buy => "buy",
        }
    }
}

/// Validate `action` against the current status and return the next status.
pub fn ensure_transition(current: LockStatus, action: LockAction) -> Result<LockStatus, CoreError> {
    use LockStatus::*;

    let next = match (action, current) {
        (LockAction::List, Active) => Some(ForSale),
        (LockAction::CancelListing, ForSale) => Some(Active),
        (LockAction::Release, Active | ForSale) => Some(BrokenHeart),
        (LockAction::Buy, ForSale | ReservedAdmin) => Some(Active),
        _ => None,
    };

    next.ok_or_else(|| {
        CoreError::Conflict(format!(
            "Cannot {} a lock with status {current}",
            action.verb()
        ))
    })
}

/// Validate a listing price chosen by an owner or the operator.
pub fn validate_listing_price(price: Decimal) -> Result<Decimal, CoreError> {
    if price.round_dp(2) != price {
        return Err(CoreError::Validation(
            "Listing price must have at most two decimal places".into(),
        ));
    }
    if price < min_listing_price() || price > max_listing_price() {
        return Err(CoreError::Validation(format!(
            "Listing price must be between {} and {}, got {price}",
            min_listing_price(),
            max_listing_price()
        )));
    }
    Ok(price)
}

// ---------------------------------------------------------------------------
// Settlement
// ---------------------------------------------------------------------------

/// How a payment is split between the platform and the seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub amount: Decimal,
    pub commission: Decimal,
    pub seller_proceeds: Decimal,
}

/// First sale of a fresh lock: the platform keeps everything.
pub fn settle_primary(price: Decimal) -> Settlement {
    Settlement {
        amount: price,
        commission: price,
        seller_proceeds: Decimal::ZERO,
    }
}

/// Sale of a listed lock.
///
/// `configuration_price` is any new configuration paid on top of the listing
/// (zero for a plain marketplace buy) and always goes to the platform. When
/// there is no seller (an operator-held golden asset) the platform keeps the
/// whole amount; otherwise it takes `rate` of the listing price.
pub fn settle_resale(
    configuration_price: Decimal,
    listing_price: Decimal,
    has_seller: bool,
    rate: Decimal,
) -> Settlement {
    let amount = configuration_price + listing_price;
    if !has_seller {
        return Settlement {
            amount,
            commission: amount,
            seller_proceeds: Decimal::ZERO,
        };
    }

    let cut = round_cents(listing_price * rate);
    Settlement {
        amount,
        commission: configuration_price + cut,
        seller_proceeds: listing_price - cut,
    }
}
