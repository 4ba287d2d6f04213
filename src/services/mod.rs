//! Business logic for the dashboard pipeline: per-sheet ingestion, the
//! header/line-item join, derived aggregate views, and the refresh cycle
//! that owns the current snapshot.

pub mod aggregates;
pub mod combine;
pub mod ingest;
pub mod refresh;

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::models::gp_record::GpRecord;
    use crate::models::order::{OrderHeader, OrderLineItem};

    pub fn header(order_no: &str) -> OrderHeader {
        OrderHeader {
            date: Utc::now(),
            fy: "FY24".to_string(),
            sales_person: "R. Diaz".to_string(),
            segment: "Mining".to_string(),
            country: "Chile".to_string(),
            order_no: order_no.to_string(),
            amount: Decimal::ZERO,
        }
    }

    pub fn header_with_amount(order_no: &str, amount: Decimal) -> OrderHeader {
        OrderHeader {
            amount,
            ..header(order_no)
        }
    }

    pub fn line_item(order_no: &str, product_code: &str, quantity: i64) -> OrderLineItem {
        OrderLineItem {
            order_no: order_no.to_string(),
            product_code: product_code.to_string(),
            product_name: format!("Product {product_code}"),
            quantity,
        }
    }

    pub fn gp(country: &str, segment: &str, gp: Decimal) -> GpRecord {
        GpRecord {
            country: country.to_string(),
            segment: segment.to_string(),
            bonhorffer_code: "BC-1".to_string(),
            export_value: Decimal::ZERO,
            import_value: Decimal::ZERO,
            gp,
        }
    }
}
