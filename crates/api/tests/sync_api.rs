//! HTTP-level integration tests for the `/sync` API endpoints.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the
//! router. Only requests rejected before the external platform is
//! contacted are exercised here; importer behaviour against a fake
//! platform lives in the sync crate's own test suite.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;
use sqlx::PgPool;

use fidly_db::models::integration::CreateIntegration;
use fidly_db::models::store::CreateStore;
use fidly_db::models::sync_log::CreateSyncLog;
use fidly_db::repositories::{IntegrationRepo, StoreRepo, SyncLogRepo};

async fn seed_store(pool: &PgPool) -> i64 {
    StoreRepo::create(
        pool,
        &CreateStore {
            name: "Test store".to_string(),
        },
    )
    .await
    .expect("store insert")
    .id
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/sync/square/catalog with empty access token returns 400
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn catalog_import_rejects_empty_access_token(pool: PgPool) {
    let store_id = seed_store(&pool).await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/sync/square/catalog",
        json!({ "store_id": store_id, "access_token": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(
        body["error"].as_str().unwrap().contains("access_token"),
        "error should name the missing field, got: {}",
        body["error"]
    );
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/sync/square/catalog with zero store id returns 400
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn catalog_import_rejects_zero_store_id(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/sync/square/catalog",
        json!({ "store_id": 0, "access_token": "EAAAEtoken" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/sync/square/catalog for a nonexistent store returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn catalog_import_unknown_store_returns_404(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/sync/square/catalog",
        json!({ "store_id": 999_999, "access_token": "EAAAEtoken" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Test: POST /api/v1/sync/square/transactions with empty location returns 400
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn transaction_sync_rejects_empty_location(pool: PgPool) {
    let store_id = seed_store(&pool).await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/sync/square/transactions",
        json!({
            "store_id": store_id,
            "access_token": "EAAAEtoken",
            "location_id": "",
            "begin_time": "2024-03-01T00:00:00Z",
            "end_time": "2024-03-31T23:59:59Z",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(
        body["error"].as_str().unwrap().contains("location_id"),
        "error should name the missing field, got: {}",
        body["error"]
    );
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/sync/logs for a nonexistent store returns 404
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn sync_logs_unknown_store_returns_404(pool: PgPool) {
    let app = build_test_app(pool);

    let response = get(app, "/api/v1/sync/logs?store_id=999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: GET /api/v1/sync/logs returns seeded runs, newest first
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn sync_logs_listed_for_store(pool: PgPool) {
    let store_id = seed_store(&pool).await;

    let integration = IntegrationRepo::create(
        &pool,
        &CreateIntegration {
            store_id,
            provider: "square".to_string(),
            access_token: Some("EAAAEtest".to_string()),
        },
    )
    .await
    .expect("integration insert");

    for status in ["success", "partial"] {
        SyncLogRepo::create(
            &pool,
            &CreateSyncLog {
                integration_id: Some(integration.id),
                sync_type: "catalog_import".to_string(),
                status: status.to_string(),
                records_synced: 3,
                error_details: None,
            },
        )
        .await
        .expect("log insert");
    }

    let app = build_test_app(pool);
    let response = get(app, &format!("/api/v1/sync/logs?store_id={store_id}")).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let data = body["data"].as_array().expect("data should be an array");
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["sync_type"], "catalog_import");
}
