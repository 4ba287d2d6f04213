use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::errors::ErrorResponse;
use crate::models::gp_record::GpRecord;
use crate::models::order::{CombinedOrder, OrderHeader, OrderLineItem};
use crate::models::reserve_order::ReserveOrder;
use crate::services::aggregates::{
    CountrySegmentPivot, OrderKpis, PivotColumn, PivotRow, ProductQuantityRank,
    ProductSaleSummary, SegmentGpRank,
};
use crate::services::refresh::{RefreshOutcome, RefreshStatus, StatusReport};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sheetdash API",
        version = "0.1.0",
        description = r#"
# Sheetdash API

Read-only dashboard backend over spreadsheet-hosted business feeds.

A background worker polls four sheet-backed sources every 60 seconds,
normalizes their rows, joins order headers with their line items, and
replaces an in-memory snapshot atomically. Every endpoint serves that
snapshot; none of them reach upstream on the request path.

## Staleness model

- Before the first successful cycle, data endpoints answer `503`.
- After it, the last good snapshot keeps being served even while background
  cycles fail; `GET /api/v1/status` carries the staleness signal.

## Pagination and sorting

List endpoints accept `page`, `limit`, `sort_by` and `sort_order`
(`asc`/`desc`). Sorting is stable: rows that compare equal keep their
source order.
"#
    ),
    paths(
        crate::handlers::reserve::list_reserve_orders,
        crate::handlers::gross_profit::list_gp_records,
        crate::handlers::orders::list_combined_orders,
        crate::handlers::orders::get_order_kpis,
        crate::handlers::analytics::get_product_sales,
        crate::handlers::analytics::get_top_products,
        crate::handlers::analytics::get_top_segments,
        crate::handlers::analytics::get_country_segment_pivot,
        crate::handlers::status::get_status,
        crate::handlers::status::trigger_refresh,
    ),
    components(schemas(
        ErrorResponse,
        ReserveOrder,
        GpRecord,
        OrderHeader,
        OrderLineItem,
        CombinedOrder,
        ProductSaleSummary,
        ProductQuantityRank,
        SegmentGpRank,
        PivotColumn,
        PivotRow,
        CountrySegmentPivot,
        OrderKpis,
        RefreshStatus,
        RefreshOutcome,
        StatusReport,
    )),
    tags(
        (name = "Reserve", description = "Reserve order feed"),
        (name = "Gross Profit", description = "Country-wise gross-profit feed"),
        (name = "Orders", description = "Combined order analysis feed"),
        (name = "Analytics", description = "Derived aggregate views"),
        (name = "Status", description = "Snapshot status and manual refresh"),
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
