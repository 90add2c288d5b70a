//! Route definitions for the `/locks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{locks, marketplace};
use crate::state::AppState;

/// Routes mounted at `/locks`.
///
/// ```text
/// POST   /                     -> purchase
/// POST   /quote                -> quote
/// GET    /mine                 -> list_mine
/// GET    /{id}                 -> get_by_id
/// GET    /{id}/availability    -> availability
/// POST   /{id}/listing         -> create_listing
/// DELETE /{id}/listing         -> cancel_listing
/// POST   /{id}/release         -> release
/// POST   /{id}/buy             -> buy
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(locks::purchase))
        .route("/quote", post(locks::quote))
        .route("/mine", get(locks::list_mine))
        .route("/{id}", get(locks::get_by_id))
        .route("/{id}/availability", get(locks::availability))
        .route(
            "/{id}/listing",
            post(marketplace::create_listing).delete(marketplace::cancel_listing),
        )
        .route("/{id}/release", post(marketplace::release))
        .route("/{id}/buy", post(marketplace::buy))
}
