use std::cmp::Ordering;

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

use crate::errors::ServiceError;
use crate::models::gp_record::GpRecord;
use crate::services::aggregates::SortDirection;
use crate::{ApiResponse, AppState, ListQuery, PaginatedResponse};

use super::{paginate, parse_direction};

pub fn gross_profit_routes() -> Router<AppState> {
    Router::new().route("/gp-records", get(list_gp_records))
}

/// List gross-profit records from the current snapshot.
#[utoipa::path(
    get,
    path = "/api/v1/gp-records",
    params(ListQuery),
    responses(
        (status = 200, description = "Gross-profit records retrieved successfully", body = ApiResponse<PaginatedResponse<GpRecord>>),
        (status = 503, description = "No snapshot available yet", body = crate::errors::ErrorResponse)
    ),
    tag = "Gross Profit"
)]
pub async fn list_gp_records(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<GpRecord>>>, ServiceError> {
    let snapshot = state.refresh.snapshot().await?;
    let mut records = snapshot.gp_records.clone();
    if let Some(sort_by) = query.sort_by.as_deref() {
        let direction = parse_direction(&query)?;
        sort_gp_records(&mut records, sort_by, direction)?;
    }
    Ok(Json(ApiResponse::success(paginate(&records, &query))))
}

fn sort_gp_records(
    records: &mut [GpRecord],
    sort_by: &str,
    direction: SortDirection,
) -> Result<(), ServiceError> {
    let compare: fn(&GpRecord, &GpRecord) -> Ordering = match sort_by {
        "country" => |a, b| a.country.cmp(&b.country),
        "segment" => |a, b| a.segment.cmp(&b.segment),
        "bonhorffer_code" => |a, b| a.bonhorffer_code.cmp(&b.bonhorffer_code),
        "export_value" => |a, b| a.export_value.cmp(&b.export_value),
        "import_value" => |a, b| a.import_value.cmp(&b.import_value),
        "gp" => |a, b| a.gp.cmp(&b.gp),
        other => {
            return Err(ServiceError::ValidationError(format!(
                "unknown sort field '{other}'"
            )))
        }
    };
    records.sort_by(|a, b| match direction {
        SortDirection::Ascending => compare(a, b),
        SortDirection::Descending => compare(a, b).reverse(),
    });
    Ok(())
}
