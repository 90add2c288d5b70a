//! Route definitions for the `/marketplace` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::marketplace;
use crate::state::AppState;

/// Routes mounted at `/marketplace`.
///
/// ```text
/// GET /    -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(marketplace::list))
}
