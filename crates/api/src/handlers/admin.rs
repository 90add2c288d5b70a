//! Operator endpoints: golden asset listings and the transaction audit log.
//!
//! All handlers require an operator role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use lovelock_core::error::CoreError;
use lovelock_core::marketplace::validate_listing_price;
use lovelock_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use lovelock_core::types::LockId;
use lovelock_db::models::lock::Lock;
use lovelock_db::models::transaction::Transaction;
use lovelock_db::repositories::{LockRepo, TransactionRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::handlers::marketplace::ListingRequest;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// PUT /api/v1/admin/golden/{id}
///
/// Lists (or re-prices) a reserved number as a golden asset.
pub async fn put_golden(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<LockId>,
    ValidJson(input): ValidJson<ListingRequest>,
) -> AppResult<Json<DataResponse<Lock>>> {
    if !state.reserved.contains(id) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Lock #{id} is not a reserved number"
        ))));
    }
    let price = validate_listing_price(input.price)?;

    let lock = LockRepo::upsert_golden(&state.pool, id, price)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "Lock #{id} is owned and cannot be listed as a golden asset"
            )))
        })?;

    tracing::info!(lock_id = id, %price, admin_id = %admin.user_id, "Golden asset listed");
    Ok(Json(DataResponse { data: lock }))
}

/// DELETE /api/v1/admin/golden/{id}
///
/// Withdraws an unsold golden asset listing.
pub async fn delete_golden(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<LockId>,
) -> AppResult<StatusCode> {
    let deleted = LockRepo::delete_golden(&state.pool, id).await?;
    if deleted {
        tracing::info!(lock_id = id, admin_id = %admin.user_id, "Golden asset withdrawn");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Golden asset",
            id,
        }))
    }
}

/// GET /api/v1/admin/transactions
pub async fn list_transactions(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Transaction>>>> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(params.offset);

    let transactions = TransactionRepo::list_recent(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: transactions }))
}
