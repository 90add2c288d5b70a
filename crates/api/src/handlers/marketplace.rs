//! Handlers for the resale marketplace: listing, withdrawal, release and
//! purchase of listed locks.

use axum::extract::{Path, Query, State};
use axum::Json;
use lovelock_core::error::CoreError;
use lovelock_core::marketplace::{
    commission_rate, ensure_transition, settle_resale, validate_listing_price, LockAction,
};
use lovelock_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use lovelock_core::purchase::{MAX_AUTHOR_NAME_LENGTH, MAX_CONTENT_LENGTH};
use lovelock_core::status::TransactionType;
use lovelock_core::types::LockId;
use lovelock_db::models::lock::{ExpectedListing, Lock, TransferLock};
use lovelock_db::models::transaction::NewTransaction;
use lovelock_db::repositories::LockRepo;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::LockView;

#[derive(Debug, Deserialize)]
pub struct ListingRequest {
    pub price: Decimal,
}

/// Optional message replacement when buying a listed lock.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct BuyRequest {
    #[validate(length(min = 1, max = MAX_CONTENT_LENGTH))]
    pub content_text: Option<String>,
    #[validate(length(min = 1, max = MAX_AUTHOR_NAME_LENGTH))]
    pub author_name: Option<String>,
}

async fn find_lock(state: &AppState, id: LockId) -> AppResult<Lock> {
    LockRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lock", id }))
}

/// Load a lock and check that `user` owns it and may perform `action`.
async fn owned_lock(
    state: &AppState,
    user: &AuthUser,
    id: LockId,
    action: LockAction,
) -> AppResult<Lock> {
    let lock = find_lock(state, id).await?;
    if !lock.is_owned_by(user.user_id) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "You do not own lock #{id}"
        ))));
    }
    ensure_transition(lock.status()?, action)?;
    Ok(lock)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn changed_concurrently(id: LockId) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Lock #{id} changed while the request was processed"
    )))
}

/// POST /api/v1/locks/{id}/listing
pub async fn create_listing(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<LockId>,
    ValidJson(input): ValidJson<ListingRequest>,
) -> AppResult<Json<DataResponse<Lock>>> {
    let price = validate_listing_price(input.price)?;
    owned_lock(&state, &user, id, LockAction::List).await?;

    let lock = LockRepo::set_listing(&state.pool, id, user.user_id, price)
        .await?
        .ok_or_else(|| changed_concurrently(id))?;

    tracing::info!(lock_id = id, %price, "Lock listed for resale");
    Ok(Json(DataResponse { data: lock }))
}

/// DELETE /api/v1/locks/{id}/listing
pub async fn cancel_listing(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<LockId>,
) -> AppResult<Json<DataResponse<Lock>>> {
    owned_lock(&state, &user, id, LockAction::CancelListing).await?;

    let lock = LockRepo::cancel_listing(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| changed_concurrently(id))?;

    tracing::info!(lock_id = id, "Lock listing withdrawn");
    Ok(Json(DataResponse { data: lock }))
}

/// POST /api/v1/locks/{id}/release
pub async fn release(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<LockId>,
) -> AppResult<Json<DataResponse<Lock>>> {
    owned_lock(&state, &user, id, LockAction::Release).await?;

    let lock = LockRepo::release(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| changed_concurrently(id))?;

    tracing::info!(lock_id = id, "Lock released");
    Ok(Json(DataResponse { data: lock }))
}

/// POST /api/v1/locks/{id}/buy
pub async fn buy(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<LockId>,
    ValidJson(input): ValidJson<BuyRequest>,
) -> AppResult<Json<DataResponse<Lock>>> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let current = find_lock(&state, id).await?;
    let status = current.status()?;
    ensure_transition(status, LockAction::Buy)?;
    let listing_price = current
        .state()?
        .listing_price()
        .ok_or_else(|| CoreError::Conflict(format!("Lock #{id} is not listed")))?;
    if current.is_owned_by(user.user_id) {
        return Err(AppError::Core(CoreError::Conflict(
            "You cannot buy your own lock".into(),
        )));
    }

    let settlement = settle_resale(
        Decimal::ZERO,
        listing_price,
        current.owner_id.is_some(),
        commission_rate(state.config.commission_percent),
    );
    let transfer = TransferLock {
        owner_id: user.user_id,
        configuration: None,
        content_text: non_blank(input.content_text),
        author_name: non_blank(input.author_name),
    };
    let payment = NewTransaction {
        buyer_id: user.user_id,
        seller_id: current.owner_id,
        transaction_type: TransactionType::Resale,
        amount: settlement.amount,
        commission: settlement.commission,
    };

    let (lock, _) = LockRepo::transfer_with_purchase(
        &state.pool,
        id,
        current.owner_id,
        ExpectedListing {
            status,
            price: listing_price,
        },
        &transfer,
        &payment,
    )
    .await?;

    tracing::info!(
        lock_id = id,
        buyer_id = %user.user_id,
        amount = %settlement.amount,
        seller_proceeds = %settlement.seller_proceeds,
        "Listed lock sold"
    );
    Ok(Json(DataResponse { data: lock }))
}

/// GET /api/v1/marketplace
pub async fn list(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<LockView>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let locks = LockRepo::list_listed(&state.pool, limit, offset).await?;
    let views = LockView::many(locks, viewer.user_id())?;
    Ok(Json(DataResponse { data: views }))
}
