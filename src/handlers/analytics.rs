use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::errors::ServiceError;
use crate::services::aggregates::{
    country_segment_pivot, product_sales_summary, sort_product_summaries,
    top_products_by_quantity, top_segments_by_gp, CountrySegmentPivot, ProductQuantityRank,
    ProductSaleSortKey, ProductSaleSummary, SegmentGpRank, TOP_N,
};
use crate::{ApiResponse, AppState, ListQuery, PaginatedResponse};

use super::{paginate, parse_direction};

/// Build the analytics Router scoped under `/api/v1/analytics`.
pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/product-sales", get(get_product_sales))
        .route("/top-products", get(get_top_products))
        .route("/top-segments", get(get_top_segments))
        .route("/country-segment-pivot", get(get_country_segment_pivot))
}

/// Per-product sales summary, sorted by the caller-selected key.
///
/// Defaults to total quantity descending, the order the dashboard table
/// opens with.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/product-sales",
    params(ListQuery),
    responses(
        (status = 200, description = "Product sales summary retrieved successfully", body = ApiResponse<PaginatedResponse<ProductSaleSummary>>),
        (status = 400, description = "Unknown sort key", body = crate::errors::ErrorResponse),
        (status = 503, description = "No snapshot available yet", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_product_sales(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<ProductSaleSummary>>>, ServiceError> {
    let snapshot = state.refresh.snapshot().await?;

    let key = match query.sort_by.as_deref() {
        None => ProductSaleSortKey::default(),
        Some(raw) => ProductSaleSortKey::parse(raw).ok_or_else(|| {
            ServiceError::ValidationError(format!("unknown sort field '{raw}'"))
        })?,
    };
    let direction = parse_direction(&query)?;

    let mut summaries = product_sales_summary(&snapshot.combined_orders);
    sort_product_summaries(&mut summaries, key, direction);
    Ok(Json(ApiResponse::success(paginate(&summaries, &query))))
}

/// Top products by quantity sold.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/top-products",
    responses(
        (status = 200, description = "Top products retrieved successfully", body = ApiResponse<Vec<ProductQuantityRank>>),
        (status = 503, description = "No snapshot available yet", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_top_products(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ProductQuantityRank>>>, ServiceError> {
    let snapshot = state.refresh.snapshot().await?;
    Ok(Json(ApiResponse::success(top_products_by_quantity(
        &snapshot.combined_orders,
        TOP_N,
    ))))
}

/// Top segments by summed gross profit.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/top-segments",
    responses(
        (status = 200, description = "Top segments retrieved successfully", body = ApiResponse<Vec<SegmentGpRank>>),
        (status = 503, description = "No snapshot available yet", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_top_segments(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SegmentGpRank>>>, ServiceError> {
    let snapshot = state.refresh.snapshot().await?;
    Ok(Json(ApiResponse::success(top_segments_by_gp(
        &snapshot.gp_records,
        TOP_N,
    ))))
}

/// Country × segment gross-profit pivot for the stacked chart.
#[utoipa::path(
    get,
    path = "/api/v1/analytics/country-segment-pivot",
    responses(
        (status = 200, description = "Pivot retrieved successfully", body = ApiResponse<CountrySegmentPivot>),
        (status = 503, description = "No snapshot available yet", body = crate::errors::ErrorResponse)
    ),
    tag = "Analytics"
)]
pub async fn get_country_segment_pivot(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CountrySegmentPivot>>, ServiceError> {
    let snapshot = state.refresh.snapshot().await?;
    Ok(Json(ApiResponse::success(country_segment_pivot(
        &snapshot.gp_records,
    ))))
}
