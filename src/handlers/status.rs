use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::errors::ServiceError;
use crate::services::refresh::{RefreshOutcome, StatusReport};
use crate::{ApiResponse, AppState};

pub fn status_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(get_status))
        .route("/refresh", post(trigger_refresh))
}

/// Loading/error/last-updated tuple for the current snapshot.
#[utoipa::path(
    get,
    path = "/api/v1/status",
    responses(
        (status = 200, description = "Pipeline status retrieved successfully", body = ApiResponse<StatusReport>)
    ),
    tag = "Status"
)]
pub async fn get_status(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StatusReport>>, ServiceError> {
    Ok(Json(ApiResponse::success(state.refresh.status().await)))
}

/// Manual refresh affordance.
///
/// Always answers 200 with the outcome; a trigger during an in-flight cycle
/// reports `already_in_flight` and a failed cycle reports `failed` while the
/// previous snapshot stays served.
#[utoipa::path(
    post,
    path = "/api/v1/refresh",
    responses(
        (status = 200, description = "Refresh cycle outcome", body = ApiResponse<RefreshOutcome>)
    ),
    tag = "Status"
)]
pub async fn trigger_refresh(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<RefreshOutcome>>, ServiceError> {
    let outcome = state.refresh.refresh_once().await;
    Ok(Json(ApiResponse::success(outcome)))
}
