//! Shared helpers for wiring mock sheet endpoints.

#![allow(dead_code)]

use std::time::Duration;

use sheetdash_api::services::ingest::IngestService;
use sheetdash_api::sheets::client::SheetsClient;
use sheetdash_api::sheets::sources::SheetSource;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Wrap a JSON payload in the callback envelope the gviz endpoint emits.
pub fn gviz_body(table_json: &str) -> String {
    format!("/*O_o*/\ngoogle.visualization.Query.setResponse({table_json});")
}

/// Serve `table_json` for one sheet, an unlimited number of times.
pub async fn mount_sheet(server: &MockServer, source: &SheetSource, table_json: &str) {
    Mock::given(method("GET"))
        .and(path(format!(
            "/spreadsheets/d/{}/gviz/tq",
            source.spreadsheet_id
        )))
        .and(query_param("sheet", source.sheet))
        .respond_with(ResponseTemplate::new(200).set_body_string(gviz_body(table_json)))
        .mount(server)
        .await;
}

/// Serve `table_json` for one sheet exactly once, with an optional delay.
pub async fn mount_sheet_once(
    server: &MockServer,
    source: &SheetSource,
    table_json: &str,
    delay: Option<Duration>,
) {
    let mut template = ResponseTemplate::new(200).set_body_string(gviz_body(table_json));
    if let Some(delay) = delay {
        template = template.set_delay(delay);
    }
    Mock::given(method("GET"))
        .and(path(format!(
            "/spreadsheets/d/{}/gviz/tq",
            source.spreadsheet_id
        )))
        .and(query_param("sheet", source.sheet))
        .respond_with(template)
        .up_to_n_times(1)
        .mount(server)
        .await;
}

/// Every otherwise-unmatched sheet request fails with the given status.
pub async fn mount_catch_all_failure(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn ingest_for(server: &MockServer) -> IngestService {
    let client = SheetsClient::with_base_url(server.uri(), Duration::from_secs(5))
        .expect("client should build");
    IngestService::new(client)
}

pub const EMPTY_TABLE: &str = r#"{"table":{"rows":[]}}"#;

/// Order-header table with two orders; SO-2 has no line items.
pub const ORDER_HEADER_TABLE: &str = r#"{"table":{"rows":[
    {"c":[{"v":"Date(2024,0,10)"},{"v":"FY24"},{"v":"R. Diaz"},{"v":"Mining"},{"v":"Chile"},{"v":"SO-1"},{"v":"$1,000.50"}]},
    {"c":[{"v":"Date(2024,0,11)"},{"v":"FY24"},{"v":"M. Silva"},{"v":"Agro"},{"v":"Peru"},{"v":"SO-2"},{"v":250}]},
    {"c":[{"v":"Date(2024,0,12)"},{"v":"FY24"},{"v":"M. Silva"},{"v":"Agro"},{"v":"Peru"},null,{"v":99}]}
]}}"#;

/// Line items: SO-1 has two items of product P-1 (5 + 3) and one of P-2;
/// one orphan row references an unknown order.
pub const ORDER_LINE_ITEM_TABLE: &str = r#"{"table":{"rows":[
    {"c":[{"v":"SO-1"},{"v":"P-1"},{"v":5},{"v":"Centrifuge"}]},
    {"c":[{"v":"SO-1"},{"v":"P-1"},{"v":3},{"v":"Centrifuge"}]},
    {"c":[{"v":"SO-1"},{"v":"P-2"},{"v":1},{"v":"Incubator"}]},
    {"c":[{"v":"SO-9"},{"v":"P-3"},{"v":7},{"v":"Autoclave"}]}
]}}"#;

pub const RESERVE_TABLE: &str = r#"{"table":{"rows":[
    {"c":[{"v":"Date(2024,0,15)"},{"v":"FY24"},{"v":"Acme Ltd"},{"v":1200.5},{"v":300},{"v":1500.5},{"v":"ORD-1"},{"v":"Mining"},{"v":150}]},
    {"c":[{"v":"Date(2024,0,16)"},{"v":"FY24"},null,{"v":10},{"v":0},{"v":10},{"v":"ORD-2"},{"v":"Agro"},{"v":0}]}
]}}"#;

pub const GP_TABLE: &str = r#"{"table":{"rows":[
    {"c":[{"v":"country"},{"v":"segment"},{"v":"code"},null,{"v":0},{"v":0},{"v":0}]},
    {"c":[{"v":"Chile"},{"v":"Mining"},{"v":"BC-1"},null,{"v":100},{"v":60},{"v":40}]},
    {"c":[{"v":"Peru"},{"v":"Agro"},{"v":"BC-2"},null,{"v":80},{"v":50},{"v":30}]}
]}}"#;
