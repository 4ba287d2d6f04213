use std::cmp::Ordering;

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::errors::ServiceError;
use crate::models::reserve_order::ReserveOrder;
use crate::services::aggregates::SortDirection;
use crate::{ApiResponse, AppState, ListQuery, PaginatedResponse};

use super::{paginate, parse_direction};

pub fn reserve_routes() -> Router<AppState> {
    Router::new().route("/reserve-orders", get(list_reserve_orders))
}

/// List reserve orders from the current snapshot.
#[utoipa::path(
    get,
    path = "/api/v1/reserve-orders",
    params(ListQuery),
    responses(
        (status = 200, description = "Reserve orders retrieved successfully", body = ApiResponse<PaginatedResponse<ReserveOrder>>),
        (status = 503, description = "No snapshot available yet", body = crate::errors::ErrorResponse)
    ),
    tag = "Reserve"
)]
pub async fn list_reserve_orders(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<ReserveOrder>>>, ServiceError> {
    let snapshot = state.refresh.snapshot().await?;
    let mut orders = snapshot.reserve_orders.clone();
    if let Some(sort_by) = query.sort_by.as_deref() {
        let direction = parse_direction(&query)?;
        sort_reserve_orders(&mut orders, sort_by, direction)?;
    }
    Ok(Json(ApiResponse::success(paginate(&orders, &query))))
}

fn sort_reserve_orders(
    orders: &mut [ReserveOrder],
    sort_by: &str,
    direction: SortDirection,
) -> Result<(), ServiceError> {
    let compare: fn(&ReserveOrder, &ReserveOrder) -> Ordering = match sort_by {
        "date" => |a, b| a.date.cmp(&b.date),
        "order_fy" => |a, b| a.order_fy.cmp(&b.order_fy),
        "party_name" => |a, b| a.party_name.cmp(&b.party_name),
        "amount" => |a, b| a.amount.cmp(&b.amount),
        "reserve" => |a, b| a.reserve.cmp(&b.reserve),
        "total" => |a, b| a.total.cmp(&b.total),
        "order_no" => |a, b| a.order_no.cmp(&b.order_no),
        "segment" => |a, b| a.segment.cmp(&b.segment),
        "req_reserve_12" => |a, b| a.req_reserve_12.cmp(&b.req_reserve_12),
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
