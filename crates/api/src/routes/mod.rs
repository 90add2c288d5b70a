pub mod admin;
pub mod health;
pub mod locks;
pub mod marketplace;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /locks                          purchase (POST, auth)
/// /locks/quote                    price breakdown (POST)
/// /locks/mine                     caller's locks (auth)
/// /locks/{id}                     public view, counts a view
/// /locks/{id}/availability        availability check
/// /locks/{id}/listing             list (POST), withdraw (DELETE), owner only
/// /locks/{id}/release             release (POST), owner only
/// /locks/{id}/buy                 buy a listed lock (POST, auth)
///
/// /marketplace                    listed locks, cheapest first
/// /golden                         reserved numbers
///
/// /admin/golden/{id}              list or re-price (PUT), withdraw (DELETE)
/// /admin/transactions             audit log, newest first
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/locks", locks::router())
        .nest("/marketplace", marketplace::router())
        .route("/golden", get(handlers::locks::list_golden))
        .nest("/admin", admin::router())
}
