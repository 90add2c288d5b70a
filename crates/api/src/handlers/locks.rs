//! Handlers for the `/locks` resource and the configurator helpers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lovelock_core::availability::{resolve_availability, Availability};
use lovelock_core::error::CoreError;
use lovelock_core::pricing::{price_breakdown, MediaType, PriceBreakdown, Skin, Zone};
use lovelock_core::purchase::{validate_purchase, PurchaseRequest};
use lovelock_core::types::{is_valid_lock_id, LockId};
use lovelock_db::models::lock::Lock;
use lovelock_db::repositories::LockRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::purchase::purchase_lock;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::views::LockView;

/// Option selection priced by the quote endpoint.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub zone: String,
    pub skin: String,
    #[serde(default = "default_media_type")]
    pub media_type: String,
    #[serde(default)]
    pub custom_number: bool,
    #[serde(default)]
    pub is_private: bool,
}

fn default_media_type() -> String {
    MediaType::None.as_str().to_string()
}

/// POST /api/v1/locks
pub async fn purchase(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(input): ValidJson<PurchaseRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Lock>>)> {
    let order = validate_purchase(&input)?;
    let lock = purchase_lock(&state, user.user_id, &order).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: lock })))
}

/// POST /api/v1/locks/quote
pub async fn quote(
    ValidJson(input): ValidJson<QuoteRequest>,
) -> AppResult<Json<DataResponse<PriceBreakdown>>> {
    let zone: Zone = input.zone.parse()?;
    let skin: Skin = input.skin.parse()?;
    let media: MediaType = input.media_type.parse()?;

    let breakdown = price_breakdown(zone, skin, media, input.custom_number, input.is_private);
    Ok(Json(DataResponse { data: breakdown }))
}

/// GET /api/v1/locks/{id}/availability
pub async fn availability(
    State(state): State<AppState>,
    Path(id): Path<LockId>,
) -> AppResult<Json<DataResponse<Availability>>> {
    if !is_valid_lock_id(id) {
        return Ok(Json(DataResponse {
            data: Availability::taken(),
        }));
    }

    let row = LockRepo::find_by_id(&state.pool, id).await?;
    let row_state = row.as_ref().map(Lock::state).transpose()?;
    let data = resolve_availability(id, row_state.as_ref(), &state.reserved);
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/locks/{id}
///
/// Each read counts as a view.
pub async fn get_by_id(
    State(state): State<AppState>,
    viewer: MaybeAuthUser,
    Path(id): Path<LockId>,
) -> AppResult<Json<DataResponse<LockView>>> {
    let lock = LockRepo::increment_views(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Lock", id }))?;
    let view = LockView::new(lock, viewer.user_id())?;
    Ok(Json(DataResponse { data: view }))
}

/// GET /api/v1/locks/mine
pub async fn list_mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Lock>>>> {
    let locks = LockRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: locks }))
}

/// GET /api/v1/golden
pub async fn list_golden(State(state): State<AppState>) -> Json<DataResponse<Vec<LockId>>> {
    Json(DataResponse {
        data: state.reserved.sorted(),
    })
}
