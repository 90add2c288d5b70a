//! Purchase orchestration: availability, allocation, and the atomic write.
//!
//! Every decision re-reads the store first. Correctness under concurrency
//! rests on the primary key of `locks` and the conditional transfer update;
//! this module only decides what to do when a write loses a race.

use std::collections::HashSet;

use lovelock_core::allocation::{allocate_random, AllocationError};
use lovelock_core::availability::{resolve_availability, AvailabilityStatus};
use lovelock_core::golden::ReservedIds;
use lovelock_core::marketplace::{commission_rate, settle_primary, settle_resale};
use lovelock_core::purchase::{NumberChoice, PurchaseOrder};
use lovelock_core::status::TransactionType;
use lovelock_core::types::{LockId, UserId};
use lovelock_db::models::lock::{CreateLock, ExpectedListing, Lock, LockConfiguration, TransferLock};
use lovelock_db::models::transaction::NewTransaction;
use lovelock_db::repositories::LockRepo;
use lovelock_db::WriteError;
use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Buy a lock as described by `order` for `buyer_id`.
pub async fn purchase_lock(
    state: &AppState,
    buyer_id: UserId,
    order: &PurchaseOrder,
) -> AppResult<Lock> {
    purchase_lock_with(state, buyer_id, order, allocate_random).await
}

/// [`purchase_lock`] with the random-number picker supplied by the caller.
///
/// `allocator` is called once per round with the ids read at the start of
/// that round. It is not called for custom numbers.
pub async fn purchase_lock_with<A>(
    state: &AppState,
    buyer_id: UserId,
    order: &PurchaseOrder,
    allocator: A,
) -> AppResult<Lock>
where
    A: FnMut(&HashSet<LockId>, &ReservedIds) -> Option<LockId>,
{
    match order.number {
        NumberChoice::Custom(lock_id) => purchase_custom(state, buyer_id, order, lock_id).await,
        NumberChoice::Random => purchase_random(state, buyer_id, order, allocator).await,
    }
}

fn configuration(order: &PurchaseOrder, price: Decimal) -> LockConfiguration {
    LockConfiguration {
        zone: order.zone.as_str().to_string(),
        skin: order.skin.as_str().to_string(),
        content_text: order.content_text.clone(),
        author_name: order.author_name.clone(),
        media_type: order.media_type.as_str().to_string(),
        media_url: order.media_url.clone(),
        is_private: order.is_private,
        price,
    }
}

fn primary_payment(buyer_id: UserId, price: Decimal) -> NewTransaction {
    let settlement = settle_primary(price);
    NewTransaction {
        buyer_id,
        seller_id: None,
        transaction_type: TransactionType::Purchase,
        amount: settlement.amount,
        commission: settlement.commission,
    }
}

// ---------------------------------------------------------------------------
// Custom number
// ---------------------------------------------------------------------------

async fn purchase_custom(
    state: &AppState,
    buyer_id: UserId,
    order: &PurchaseOrder,
    lock_id: LockId,
) -> AppResult<Lock> {
    let price = order.configuration_price();
    let row = LockRepo::find_by_id(&state.pool, lock_id).await?;
    let row_state = row.as_ref().map(Lock::state).transpose()?;
    let availability = resolve_availability(lock_id, row_state.as_ref(), &state.reserved);

    match (availability.status, availability.price, row) {
        (AvailabilityStatus::Free, _, _) => {
            let input = CreateLock {
                id: lock_id,
                owner_id: buyer_id,
                configuration: configuration(order, price),
            };
            let (lock, _) = LockRepo::create_with_purchase(
                &state.pool,
                &input,
                &primary_payment(buyer_id, price),
            )
            .await?;
            tracing::info!(lock_id, buyer_id = %buyer_id, %price, "Custom lock purchased");
            Ok(lock)
        }
        (AvailabilityStatus::Resale, Some(listing_price), Some(current)) => {
            buy_listed_with_configuration(state, buyer_id, order, current, listing_price).await
        }
        (_, _, None) if state.reserved.contains(lock_id) => {
            Err(AllocationError::ReservedNumber { lock_id }.into())
        }
        _ => Err(AllocationError::NumberTaken { lock_id }.into()),
    }
}

/// Take over a listed lock with a fresh configuration. The buyer pays the
/// configuration price on top of the listing price.
async fn buy_listed_with_configuration(
    state: &AppState,
    buyer_id: UserId,
    order: &PurchaseOrder,
    current: Lock,
    listing_price: Decimal,
) -> AppResult<Lock> {
    if current.is_owned_by(buyer_id) {
        return Err(AllocationError::NumberTaken { lock_id: current.id }.into());
    }

    let config_price = order.configuration_price();
    let settlement = settle_resale(
        config_price,
        listing_price,
        current.owner_id.is_some(),
        commission_rate(state.config.commission_percent),
    );
    let expected = ExpectedListing {
        status: current.status()?,
        price: listing_price,
    };
    let transfer = TransferLock {
        owner_id: buyer_id,
        configuration: Some(configuration(order, config_price)),
        content_text: None,
        author_name: None,
    };
    let payment = NewTransaction {
        buyer_id,
        seller_id: current.owner_id,
        transaction_type: TransactionType::Resale,
        amount: settlement.amount,
        commission: settlement.commission,
    };

    let (lock, _) = LockRepo::transfer_with_purchase(
        &state.pool,
        current.id,
        current.owner_id,
        expected,
        &transfer,
        &payment,
    )
    .await?;

    tracing::info!(
        lock_id = lock.id,
        buyer_id = %buyer_id,
        amount = %settlement.amount,
        commission = %settlement.commission,
        "Listed lock purchased with new configuration"
    );
    Ok(lock)
}

// ---------------------------------------------------------------------------
// Random number
// ---------------------------------------------------------------------------

async fn purchase_random<A>(
    state: &AppState,
    buyer_id: UserId,
    order: &PurchaseOrder,
    mut allocator: A,
) -> AppResult<Lock>
where
    A: FnMut(&HashSet<LockId>, &ReservedIds) -> Option<LockId>,
{
    let price = order.configuration_price();
    let attempts = state.config.allocation_retries.max(1);

    for attempt in 1..=attempts {
        let existing = LockRepo::list_ids(&state.pool).await?;
        let lock_id = allocator(&existing, &state.reserved).ok_or(AllocationError::SoldOut)?;

        let input = CreateLock {
            id: lock_id,
            owner_id: buyer_id,
            configuration: configuration(order, price),
        };
        match LockRepo::create_with_purchase(
            &state.pool,
            &input,
            &primary_payment(buyer_id, price),
        )
        .await
        {
            Ok((lock, _)) => {
                tracing::info!(
                    lock_id,
                    buyer_id = %buyer_id,
                    %price,
                    attempt,
                    "Random lock purchased"
                );
                return Ok(lock);
            }
            Err(WriteError::IdTaken { lock_id }) => {
                tracing::warn!(
                    lock_id,
                    attempt,
                    "Allocated number was claimed concurrently, retrying"
                );
            }
            Err(WriteError::Database(e)) => return Err(AppError::Database(e)),
        }
    }

    tracing::warn!(attempts, "Random allocation exhausted its retries");
    Err(AllocationError::RetriesExhausted { attempts }.into())
}
