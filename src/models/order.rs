use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::sheets::cell::RowReader;
use crate::sheets::envelope::GvizRow;

use super::field_present;

/// Column positions in the order-header sheet (range A:G).
pub mod header_col {
    pub const DATE: usize = 0;
    pub const FY: usize = 1;
    pub const SALES_PERSON: usize = 2;
    pub const SEGMENT: usize = 3;
    pub const COUNTRY: usize = 4;
    pub const ORDER_NO: usize = 5;
    pub const AMOUNT: usize = 6;
}

/// Column positions in the line-item sheet (range A:D). Quantity sits in
/// column C and the product name in column D.
pub mod line_item_col {
    pub const ORDER_NO: usize = 0;
    pub const PRODUCT_CODE: usize = 1;
    pub const QUANTITY: usize = 2;
    pub const PRODUCT_NAME: usize = 3;
}

/// One order header from the order-analysis feed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderHeader {
    pub date: DateTime<Utc>,
    pub fy: String,
    pub sales_person: String,
    pub segment: String,
    pub country: String,
    pub order_no: String,
    pub amount: Decimal,
}

impl OrderHeader {
    pub fn from_row(row: &GvizRow) -> Self {
        let cells = RowReader::new(row);
        Self {
            date: cells.date(header_col::DATE),
            fy: cells.text(header_col::FY),
            sales_person: cells.text(header_col::SALES_PERSON),
            segment: cells.text(header_col::SEGMENT),
            country: cells.text(header_col::COUNTRY),
            order_no: cells.text(header_col::ORDER_NO),
            amount: cells.currency(header_col::AMOUNT),
        }
    }

    pub fn has_required_fields(&self) -> bool {
        field_present(&self.order_no)
    }
}

/// One product line item, keyed to its order by `order_no`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLineItem {
    pub order_no: String,
    pub product_code: String,
    pub product_name: String,
    pub quantity: i64,
}

impl OrderLineItem {
    pub fn from_row(row: &GvizRow) -> Self {
        let cells = RowReader::new(row);
        Self {
            order_no: cells.text(line_item_col::ORDER_NO),
            product_code: cells.text(line_item_col::PRODUCT_CODE),
            product_name: cells.text(line_item_col::PRODUCT_NAME),
            quantity: cells.quantity(line_item_col::QUANTITY),
        }
    }

    pub fn has_required_fields(&self) -> bool {
        field_present(&self.order_no)
    }
}

/// An order header enriched with its line items.
///
/// Owned exclusively by the join step; rebuilt wholesale on every cycle and
/// never mutated in place. `product_count` always equals `products.len()`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CombinedOrder {
    #[serde(flatten)]
    pub header: OrderHeader,
    pub products: Vec<OrderLineItem>,
    pub product_count: usize,
}
