mod common;

use std::sync::Arc;

use axum::{
    body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sheetdash_api::config::AppConfig;
use sheetdash_api::services::refresh::RefreshService;
use sheetdash_api::sheets::sources;
use sheetdash_api::AppState;
use tower::ServiceExt;
use wiremock::MockServer;

use common::{
    ingest_for, mount_sheet, GP_TABLE, ORDER_HEADER_TABLE, ORDER_LINE_ITEM_TABLE, RESERVE_TABLE,
};

fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        log_level: "info".to_string(),
        log_json: false,
        http_timeout_secs: 5,
        cors_allowed_origins: None,
        cors_allow_any_origin: false,
    }
}

async fn test_app(server: &MockServer, refreshed: bool) -> Router {
    let refresh = Arc::new(RefreshService::new(ingest_for(server)));
    if refreshed {
        refresh.refresh_once().await;
    }
    let state = AppState {
        config: test_config(),
        refresh,
    };
    Router::new()
        .nest("/api/v1", sheetdash_api::api_v1_routes())
        .with_state(state)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    request_json(app, Method::GET, uri).await
}

async fn request_json(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request succeeds");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    let json: Value = serde_json::from_slice(&bytes).expect("parse response body");
    (status, json)
}

async fn mount_all_sheets(server: &MockServer) {
    mount_sheet(server, &sources::RESERVE_ORDERS, RESERVE_TABLE).await;
    mount_sheet(server, &sources::GROSS_PROFIT, GP_TABLE).await;
    mount_sheet(server, &sources::ORDER_HEADERS, ORDER_HEADER_TABLE).await;
    mount_sheet(server, &sources::ORDER_LINE_ITEMS, ORDER_LINE_ITEM_TABLE).await;
}

#[tokio::test]
async fn data_endpoints_answer_503_before_first_snapshot() {
    let server = MockServer::start().await;
    let app = test_app(&server, false).await;

    let (status, json) = get_json(&app, "/api/v1/reserve-orders").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"], "Service Unavailable");

    // Status stays reachable and reports loading.
    let (status, json) = get_json(&app, "/api/v1/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "loading");
}

#[tokio::test]
async fn kpis_reflect_the_joined_snapshot() {
    let server = MockServer::start().await;
    mount_all_sheets(&server).await;
    let app = test_app(&server, true).await;

    let (status, json) = get_json(&app, "/api/v1/orders/kpis").await;
    assert_eq!(status, StatusCode::OK);
    let kpis = &json["data"];
    // SO-1 $1,000.50 + SO-2 250
    assert_eq!(kpis["total_amount"], "1250.50");
    assert_eq!(kpis["order_count"], 2);
    assert_eq!(kpis["total_quantity"], 9);
}

#[tokio::test]
async fn product_sales_default_sort_is_quantity_descending() {
    let server = MockServer::start().await;
    mount_all_sheets(&server).await;
    let app = test_app(&server, true).await;

    let (status, json) = get_json(&app, "/api/v1/analytics/product-sales").await;
    assert_eq!(status, StatusCode::OK);
    let items = json["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["product_code"], "P-1");
    assert_eq!(items[0]["total_quantity"], 8);
    assert_eq!(items[0]["order_count"], 1);
    assert_eq!(items[1]["product_code"], "P-2");
}

#[tokio::test]
async fn unknown_sort_field_is_a_validation_error() {
    let server = MockServer::start().await;
    mount_all_sheets(&server).await;
    let app = test_app(&server, true).await;

    let (status, _) = get_json(&app, "/api/v1/analytics/product-sales?sort_by=bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get_json(&app, "/api/v1/reserve-orders?sort_by=amount&sort_order=sideways")
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pivot_and_rankings_are_served() {
    let server = MockServer::start().await;
    mount_all_sheets(&server).await;
    let app = test_app(&server, true).await;

    let (status, json) = get_json(&app, "/api/v1/analytics/country-segment-pivot").await;
    assert_eq!(status, StatusCode::OK);
    let columns = json["data"]["columns"].as_array().unwrap();
    // Two real segments plus the catch-all bucket.
    assert_eq!(columns.len(), 3);
    assert_eq!(columns.last().unwrap()["segment"], "Others");

    let (status, json) = get_json(&app, "/api/v1/analytics/top-segments").await;
    assert_eq!(status, StatusCode::OK);
    let ranked = json["data"].as_array().unwrap();
    assert_eq!(ranked[0]["segment"], "Mining");

    let (status, json) = get_json(&app, "/api/v1/analytics/top-products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"][0]["display_name"], "Centrifuge (P-1)");
}

#[tokio::test]
async fn manual_refresh_reports_its_outcome() {
    let server = MockServer::start().await;
    mount_all_sheets(&server).await;
    let app = test_app(&server, false).await;

    let (status, json) = request_json(&app, Method::POST, "/api/v1/refresh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], "refreshed");

    let (_, json) = get_json(&app, "/api/v1/status").await;
    assert_eq!(json["data"]["status"], "ready");
}

#[tokio::test]
async fn reserve_orders_support_paging() {
    let server = MockServer::start().await;
    mount_all_sheets(&server).await;
    let app = test_app(&server, true).await;

    let (status, json) = get_json(&app, "/api/v1/reserve-orders?page=1&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["items"][0]["party_name"], "Acme Ltd");
}
