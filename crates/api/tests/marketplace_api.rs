//! HTTP-level integration tests for the resale marketplace and the operator
//! golden asset endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, custom_purchase_body, delete_auth, get, get_auth, post_json_auth,
    put_json_auth, token_for,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Buy lock `id` for a fresh user and return that user's id.
async fn bought_lock(pool: &PgPool, id: i32) -> Uuid {
    let owner = Uuid::new_v4();
    let app = common::build_test_app(pool.clone());
    let response =
        post_json_auth(app, "/api/v1/locks", &token_for(owner), custom_purchase_body(id)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    owner
}

async fn list_for_sale(pool: &PgPool, id: i32, owner: Uuid, price: &str) -> StatusCode {
    let app = common::build_test_app(pool.clone());
    post_json_auth(
        app,
        &format!("/api/v1/locks/{id}/listing"),
        &token_for(owner),
        serde_json::json!({"price": price}),
    )
    .await
    .status()
}

async fn resale_commission(pool: &PgPool, id: i32) -> (String, String) {
    let (amount, commission): (rust_decimal::Decimal, rust_decimal::Decimal) = sqlx::query_as(
        "SELECT amount, commission FROM transactions \
         WHERE lock_id = $1 AND transaction_type_id = 2",
    )
    .bind(id)
    .fetch_one(pool)
    .await
    .unwrap();
    (amount.to_string(), commission.to_string())
}

// ---------------------------------------------------------------------------
// Listing lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_appears_in_marketplace_and_availability(pool: PgPool) {
    let owner = bought_lock(&pool, 2006).await;
    assert_eq!(list_for_sale(&pool, 2006, owner, "50.00").await, StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/marketplace").await).await;
    let listed = json["data"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], 2006);
    assert_eq!(listed[0]["status"], "For_Sale");
    assert_eq!(listed[0]["listing_price"], "50.00");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/locks/2006/availability").await).await;
    assert_eq!(json["data"]["available"], true);
    assert_eq!(json["data"]["status"], "resale");
    assert_eq!(json["data"]["price"], "50.00");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_owner_can_list(pool: PgPool) {
    bought_lock(&pool, 2011).await;

    let status = list_for_sale(&pool, 2011, Uuid::new_v4(), "50.00").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_twice_conflicts(pool: PgPool) {
    let owner = bought_lock(&pool, 2002).await;
    assert_eq!(list_for_sale(&pool, 2002, owner, "50.00").await, StatusCode::OK);
    assert_eq!(list_for_sale(&pool, 2002, owner, "60.00").await, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_listing_price_is_validated(pool: PgPool) {
    let owner = bought_lock(&pool, 2003).await;
    for price in ["0.50", "12.345", "1000000.01"] {
        assert_eq!(
            list_for_sale(&pool, 2003, owner, price).await,
            StatusCode::BAD_REQUEST,
            "price {price}"
        );
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unparseable_listing_price_is_validation_error(pool: PgPool) {
    let owner = bought_lock(&pool, 2007).await;
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/locks/2007/listing",
        &token_for(owner),
        serde_json::json!({"price": "fifty"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cancel_listing(pool: PgPool) {
    let owner = bought_lock(&pool, 2004).await;
    list_for_sale(&pool, 2004, owner, "50.00").await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, "/api/v1/locks/2004/listing", &token_for(owner)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status_id"], 1);
    assert_eq!(json["data"]["resale_price"], serde_json::Value::Null);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/marketplace").await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_release_breaks_the_lock(pool: PgPool) {
    let owner = bought_lock(&pool, 2005).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/locks/2005/release",
        &token_for(owner),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status_id"], 4);
    assert_eq!(json["data"]["owner_id"], serde_json::Value::Null);

    // A broken lock is neither listable nor available.
    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/locks/2005/availability").await).await;
    assert_eq!(json["data"]["status"], "taken");

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/locks/mine", &token_for(owner)).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Buying listed locks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_buy_listed_lock(pool: PgPool) {
    let seller = bought_lock(&pool, 2100).await;
    list_for_sale(&pool, 2100, seller, "50.00").await;
    let buyer = Uuid::new_v4();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/locks/2100/buy",
        &token_for(buyer),
        serde_json::json!({"content_text": "Our turn now"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["owner_id"], buyer.to_string());
    assert_eq!(json["data"]["status_id"], 1);
    assert_eq!(json["data"]["content_text"], "Our turn now");
    assert_eq!(json["data"]["author_name"], "Jules");

    let (amount, commission) = resale_commission(&pool, 2100).await;
    assert_eq!(amount, "50.00");
    assert_eq!(commission, "5.00");

    // The sold listing cannot be bought again.
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/locks/2100/buy",
        &token_for(Uuid::new_v4()),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cannot_buy_own_listing(pool: PgPool) {
    let seller = bought_lock(&pool, 2101).await;
    list_for_sale(&pool, 2101, seller, "50.00").await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/locks/2101/buy",
        &token_for(seller),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_cannot_buy_unlisted_lock(pool: PgPool) {
    bought_lock(&pool, 2102).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/locks/2102/buy",
        &token_for(Uuid::new_v4()),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_configurator_purchase_of_listed_number(pool: PgPool) {
    let seller = bought_lock(&pool, 2103).await;
    list_for_sale(&pool, 2103, seller, "19.99").await;
    let buyer = Uuid::new_v4();

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/locks",
        &token_for(buyer),
        custom_purchase_body(2103),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["owner_id"], buyer.to_string());
    assert_eq!(json["data"]["price"], "19.98");

    // 19.98 configuration + 19.99 listing; platform keeps the configuration
    // price plus 10% of the listing (2.00).
    let (amount, commission) = resale_commission(&pool, 2103).await;
    assert_eq!(amount, "39.97");
    assert_eq!(commission, "21.98");
}

// ---------------------------------------------------------------------------
// Golden assets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_golden_endpoints_require_admin(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        "/api/v1/admin/golden/777",
        &token_for(Uuid::new_v4()),
        serde_json::json!({"price": "777.00"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/admin/transactions").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_golden_asset_can_be_listed_and_bought(pool: PgPool) {
    let admin = admin_token();

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        "/api/v1/admin/golden/777",
        &admin,
        serde_json::json!({"price": "777.00"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status_id"], 3);
    assert_eq!(json["data"]["golden_price"], "777.00");

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/locks/777/availability").await).await;
    assert_eq!(json["data"]["status"], "resale");
    assert_eq!(json["data"]["price"], "777.00");

    let buyer = Uuid::new_v4();
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/locks",
        &token_for(buyer),
        custom_purchase_body(777),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["owner_id"], buyer.to_string());
    assert_eq!(json["data"]["golden_price"], serde_json::Value::Null);

    // No seller: the platform keeps the whole amount.
    let (amount, commission) = resale_commission(&pool, 777).await;
    assert_eq!(amount, "796.98");
    assert_eq!(commission, "796.98");

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/admin/transactions", &admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["lock_id"], 777);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_golden_listing_rejects_unreserved_number(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = put_json_auth(
        app,
        "/api/v1/admin/golden/42",
        &admin_token(),
        serde_json::json!({"price": "42.00"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_golden_listing_can_be_withdrawn(pool: PgPool) {
    let admin = admin_token();

    let app = common::build_test_app(pool.clone());
    put_json_auth(
        app,
        "/api/v1/admin/golden/1000",
        &admin,
        serde_json::json!({"price": "100.00"}),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, "/api/v1/admin/golden/1000", &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/locks/1000/availability").await).await;
    assert_eq!(json["data"]["status"], "taken");

    let app = common::build_test_app(pool);
    let response = delete_auth(app, "/api/v1/admin/golden/1000", &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
