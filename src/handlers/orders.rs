use std::cmp::Ordering;

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::errors::ServiceError;
use crate::models::order::CombinedOrder;
use crate::services::aggregates::{order_kpis, OrderKpis, SortDirection};
use crate::{ApiResponse, AppState, ListQuery, PaginatedResponse};

use super::{paginate, parse_direction};

pub fn orders_routes() -> Router<AppState> {
    Router::new()
        .route("/orders/combined", get(list_combined_orders))
        .route("/orders/kpis", get(get_order_kpis))
}

/// List combined orders (header + line items) from the current snapshot.
#[utoipa::path(
    get,
    path = "/api/v1/orders/combined",
    params(ListQuery),
    responses(
        (status = 200, description = "Combined orders retrieved successfully", body = ApiResponse<PaginatedResponse<CombinedOrder>>),
        (status = 503, description = "No snapshot available yet", body = crate::errors::ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn list_combined_orders(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<CombinedOrder>>>, ServiceError> {
    let snapshot = state.refresh.snapshot().await?;
    let mut orders = snapshot.combined_orders.clone();
    if let Some(sort_by) = query.sort_by.as_deref() {
        let direction = parse_direction(&query)?;
        sort_combined_orders(&mut orders, sort_by, direction)?;
    }
    Ok(Json(ApiResponse::success(paginate(&orders, &query))))
}

/// Headline figures for the order dashboard cards.
#[utoipa::path(
    get,
    path = "/api/v1/orders/kpis",
    responses(
        (status = 200, description = "Order KPIs retrieved successfully", body = ApiResponse<OrderKpis>),
        (status = 503, description = "No snapshot available yet", body = crate::errors::ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn get_order_kpis(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<OrderKpis>>, ServiceError> {
    let snapshot = state.refresh.snapshot().await?;
    Ok(Json(ApiResponse::success(order_kpis(
        &snapshot.combined_orders,
    ))))
}

fn sort_combined_orders(
    orders: &mut [CombinedOrder],
    sort_by: &str,
    direction: SortDirection,
) -> Result<(), ServiceError> {
    let compare: fn(&CombinedOrder, &CombinedOrder) -> Ordering = match sort_by {
        "date" => |a, b| a.header.date.cmp(&b.header.date),
        "fy" => |a, b| a.header.fy.cmp(&b.header.fy),
        "sales_person" => |a, b| a.header.sales_person.cmp(&b.header.sales_person),
        "segment" => |a, b| a.header.segment.cmp(&b.header.segment),
        "country" => |a, b| a.header.country.cmp(&b.header.country),
        "order_no" => |a, b| a.header.order_no.cmp(&b.header.order_no),
        "amount" => |a, b| a.header.amount.cmp(&b.header.amount),
        "product_count" => |a, b| a.product_count.cmp(&b.product_count),
        other => {
            return Err(ServiceError::ValidationError(format!(
                "unknown sort field '{other}'"
            )))
        }
    };
    orders.sort_by(|a, b| match direction {
        SortDirection::Ascending => compare(a, b),
        SortDirection::Descending => compare(a, b).reverse(),
    });
    Ok(())
}
