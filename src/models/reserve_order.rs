use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::sheets::cell::RowReader;
use crate::sheets::envelope::GvizRow;

use super::field_present;

/// Column positions in the reserve sheet (range A:I).
pub mod col {
    pub const DATE: usize = 0;
    pub const ORDER_FY: usize = 1;
    pub const PARTY_NAME: usize = 2;
    pub const AMOUNT: usize = 3;
    pub const RESERVE: usize = 4;
    pub const TOTAL: usize = 5;
    pub const ORDER_NO: usize = 6;
    pub const SEGMENT: usize = 7;
    pub const REQ_RESERVE_12: usize = 8;
}

/// One row of the reserve sheet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReserveOrder {
    pub date: DateTime<Utc>,
    pub order_fy: String,
    pub party_name: String,
    pub amount: Decimal,
    pub reserve: Decimal,
    pub total: Decimal,
    pub order_no: String,
    pub segment: String,
    pub req_reserve_12: Decimal,
}

impl ReserveOrder {
    pub fn from_row(row: &GvizRow) -> Self {
        let cells = RowReader::new(row);
        Self {
            date: cells.date(col::DATE),
            order_fy: cells.text(col::ORDER_FY),
            party_name: cells.text(col::PARTY_NAME),
            amount: cells.number(col::AMOUNT),
            reserve: cells.number(col::RESERVE),
            total: cells.number(col::TOTAL),
            order_no: cells.text(col::ORDER_NO),
            segment: cells.text(col::SEGMENT),
            req_reserve_12: cells.number(col::REQ_RESERVE_12),
        }
    }

    /// Rows without a party name are placeholders and are dropped.
    pub fn has_required_fields(&self) -> bool {
        field_present(&self.party_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn row(json: &str) -> GvizRow {
        serde_json::from_str(json).expect("valid row json")
    }

    #[test]
    fn normalizes_a_full_row() {
        let row = row(
            r#"{"c":[{"v":"Date(2024,0,15)"},{"v":"FY24"},{"v":"Acme Ltd"},{"v":1200.5},{"v":300},{"v":1500.5},{"v":"ORD-1"},{"v":"Mining"},{"v":150}]}"#,
        );
        let order = ReserveOrder::from_row(&row);
        assert_eq!(
            order.date,
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(order.order_fy, "FY24");
        assert_eq!(order.party_name, "Acme Ltd");
        assert_eq!(order.amount, dec!(1200.5));
        assert_eq!(order.reserve, dec!(300));
        assert_eq!(order.total, dec!(1500.5));
        assert_eq!(order.order_no, "ORD-1");
        assert_eq!(order.segment, "Mining");
        assert_eq!(order.req_reserve_12, dec!(150));
    }

    #[test]
    fn sparse_row_gets_defaults() {
        let order = ReserveOrder::from_row(&row(r#"{"c":[null,null,{"v":"Acme"}]}"#));
        assert_eq!(order.order_fy, "N/A");
        assert_eq!(order.amount, Decimal::ZERO);
        assert_eq!(order.order_no, "N/A");
        assert!(order.has_required_fields());
    }

    #[test]
    fn missing_party_name_disqualifies_the_row() {
        assert!(!ReserveOrder::from_row(&row(r#"{"c":[{"v":"Date(2024,0,1)"}]}"#))
            .has_required_fields());
        assert!(!ReserveOrder::from_row(&row(r#"{"c":[null,null,{"v":"  "}]}"#))
            .has_required_fields());
    }
}
