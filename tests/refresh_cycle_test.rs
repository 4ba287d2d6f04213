mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use sheetdash_api::errors::ServiceError;
use sheetdash_api::services::refresh::{RefreshOutcome, RefreshService, RefreshStatus};
use sheetdash_api::sheets::sources;
use wiremock::MockServer;

use common::{
    ingest_for, mount_catch_all_failure, mount_sheet, mount_sheet_once, EMPTY_TABLE, GP_TABLE,
    ORDER_HEADER_TABLE, ORDER_LINE_ITEM_TABLE, RESERVE_TABLE,
};

async fn mount_all_sheets(server: &MockServer) {
    mount_sheet(server, &sources::RESERVE_ORDERS, RESERVE_TABLE).await;
    mount_sheet(server, &sources::GROSS_PROFIT, GP_TABLE).await;
    mount_sheet(server, &sources::ORDER_HEADERS, ORDER_HEADER_TABLE).await;
    mount_sheet(server, &sources::ORDER_LINE_ITEMS, ORDER_LINE_ITEM_TABLE).await;
}

#[tokio::test]
async fn successful_cycle_publishes_a_ready_snapshot() {
    let server = MockServer::start().await;
    mount_all_sheets(&server).await;
    let service = RefreshService::new(ingest_for(&server));

    assert_eq!(service.refresh_once().await, RefreshOutcome::Refreshed);

    let report = service.status().await;
    assert_eq!(report.status, RefreshStatus::Ready);
    assert!(report.last_updated.is_some());
    assert!(report.last_error.is_none());

    let snapshot = service.snapshot().await.unwrap();
    assert_eq!(snapshot.reserve_orders.len(), 1);
    assert_eq!(snapshot.gp_records.len(), 2);
    assert_eq!(snapshot.combined_orders.len(), 2);
}

#[tokio::test]
async fn failed_cycle_keeps_the_previous_snapshot() {
    let server = MockServer::start().await;
    // Each sheet answers exactly once; later requests hit the failing
    // catch-all.
    mount_sheet_once(&server, &sources::RESERVE_ORDERS, RESERVE_TABLE, None).await;
    mount_sheet_once(&server, &sources::GROSS_PROFIT, GP_TABLE, None).await;
    mount_sheet_once(&server, &sources::ORDER_HEADERS, ORDER_HEADER_TABLE, None).await;
    mount_sheet_once(&server, &sources::ORDER_LINE_ITEMS, ORDER_LINE_ITEM_TABLE, None).await;
    mount_catch_all_failure(&server, 500).await;

    let service = RefreshService::new(ingest_for(&server));

    assert_eq!(service.refresh_once().await, RefreshOutcome::Refreshed);
    let first = service.snapshot().await.unwrap();

    assert_eq!(service.refresh_once().await, RefreshOutcome::Failed);

    // Stale-but-available: the old snapshot is still served.
    let report = service.status().await;
    assert_eq!(report.status, RefreshStatus::StaleError);
    assert!(report.last_error.is_some());
    assert_eq!(report.last_updated, Some(first.fetched_at));

    let second = service.snapshot().await.unwrap();
    assert_eq!(second.reserve_orders.len(), first.reserve_orders.len());
    assert_eq!(second.fetched_at, first.fetched_at);
}

#[tokio::test]
async fn first_cycle_failure_stays_loading_with_an_error() {
    let server = MockServer::start().await;
    mount_catch_all_failure(&server, 503).await;

    let service = RefreshService::new(ingest_for(&server));
    assert_eq!(service.refresh_once().await, RefreshOutcome::Failed);

    let report = service.status().await;
    assert_eq!(report.status, RefreshStatus::Loading);
    assert!(report.last_updated.is_none());
    assert!(report.last_error.is_some());

    let err = service.snapshot().await.unwrap_err();
    assert_matches!(err, ServiceError::NotReady(_));
}

#[tokio::test]
async fn recovery_clears_the_stale_flag() {
    let server = MockServer::start().await;
    mount_catch_all_failure(&server, 500).await;

    let service = RefreshService::new(ingest_for(&server));
    assert_eq!(service.refresh_once().await, RefreshOutcome::Failed);

    // The upstream comes back.
    server.reset().await;
    mount_all_sheets(&server).await;

    assert_eq!(service.refresh_once().await, RefreshOutcome::Refreshed);
    let report = service.status().await;
    assert_eq!(report.status, RefreshStatus::Ready);
    assert!(report.last_error.is_none());
}

#[tokio::test]
async fn overlapping_triggers_are_ignored_not_queued() {
    let server = MockServer::start().await;
    let delay = Some(Duration::from_millis(250));
    mount_sheet_once(&server, &sources::RESERVE_ORDERS, EMPTY_TABLE, delay).await;
    mount_sheet_once(&server, &sources::GROSS_PROFIT, EMPTY_TABLE, delay).await;
    mount_sheet_once(&server, &sources::ORDER_HEADERS, EMPTY_TABLE, delay).await;
    mount_sheet_once(&server, &sources::ORDER_LINE_ITEMS, EMPTY_TABLE, delay).await;

    let service = Arc::new(RefreshService::new(ingest_for(&server)));

    let background = {
        let service = service.clone();
        tokio::spawn(async move { service.refresh_once().await })
    };

    // Give the background cycle time to take the guard, then trigger again.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(service.refresh_once().await, RefreshOutcome::AlreadyInFlight);

    assert_eq!(background.await.unwrap(), RefreshOutcome::Refreshed);
    assert_eq!(service.status().await.status, RefreshStatus::Ready);
}
