//! Route definitions for the `/admin` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require an operator role (enforced by handler extractors).
///
/// ```text
/// PUT    /golden/{id}     -> put_golden
/// DELETE /golden/{id}     -> delete_golden
/// GET    /transactions    -> list_transactions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/golden/{id}",
            put(admin::put_golden).delete(admin::delete_golden),
        )
        .route("/transactions", get(admin::list_transactions))
}
