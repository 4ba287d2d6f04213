use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::models::gp_record::GpRecord;
use crate::models::order::{CombinedOrder, OrderHeader, OrderLineItem};
use crate::models::reserve_order::ReserveOrder;
use crate::sheets::client::SheetsClient;
use crate::sheets::sources;

use super::combine::combine_orders;

/// Fetches each sheet and turns its raw rows into a filtered, typed
/// collection. One instance per process; holds no state beyond the client.
#[derive(Clone)]
pub struct IngestService {
    client: SheetsClient,
}

impl IngestService {
    pub fn new(client: SheetsClient) -> Self {
        Self { client }
    }

    /// Reserve sheet rows that name a real party.
    #[instrument(skip(self))]
    pub async fn fetch_reserve_orders(&self) -> Result<Vec<ReserveOrder>, ServiceError> {
        let rows = self.client.fetch_rows(&sources::RESERVE_ORDERS).await?;
        let orders: Vec<ReserveOrder> = rows
            .iter()
            .map(ReserveOrder::from_row)
            .filter(ReserveOrder::has_required_fields)
            .collect();
        info!(count = orders.len(), "fetched reserve orders");
        Ok(orders)
    }

    /// Gross-profit rows with a real country, stray header rows dropped.
    #[instrument(skip(self))]
    pub async fn fetch_gp_records(&self) -> Result<Vec<GpRecord>, ServiceError> {
        let rows = self.client.fetch_rows(&sources::GROSS_PROFIT).await?;
        let records: Vec<GpRecord> = rows
            .iter()
            .map(GpRecord::from_row)
            .filter(GpRecord::has_required_fields)
            .collect();
        info!(count = records.len(), "fetched gross-profit records");
        Ok(records)
    }

    /// Order headers with a real order number.
    #[instrument(skip(self))]
    pub async fn fetch_order_headers(&self) -> Result<Vec<OrderHeader>, ServiceError> {
        let rows = self.client.fetch_rows(&sources::ORDER_HEADERS).await?;
        let headers: Vec<OrderHeader> = rows
            .iter()
            .map(OrderHeader::from_row)
            .filter(OrderHeader::has_required_fields)
            .collect();
        info!(count = headers.len(), "fetched order headers");
        Ok(headers)
    }

    /// Line items with a real order number.
    #[instrument(skip(self))]
    pub async fn fetch_order_line_items(&self) -> Result<Vec<OrderLineItem>, ServiceError> {
        let rows = self.client.fetch_rows(&sources::ORDER_LINE_ITEMS).await?;
        let items: Vec<OrderLineItem> = rows
            .iter()
            .map(OrderLineItem::from_row)
            .filter(OrderLineItem::has_required_fields)
            .collect();
        info!(count = items.len(), "fetched order line items");
        Ok(items)
    }

    /// Headers and line items fetched concurrently, then joined.
    ///
    /// Both retrievals must settle before the join runs; if either fails the
    /// combined collection is unavailable as a whole and the single error
    /// propagates.
    #[instrument(skip(self))]
    pub async fn fetch_combined_orders(&self) -> Result<Vec<CombinedOrder>, ServiceError> {
        let (headers, line_items) = tokio::try_join!(
            self.fetch_order_headers(),
            self.fetch_order_line_items()
        )?;
        Ok(combine_orders(headers, line_items))
    }
}
