use std::collections::HashMap;

use crate::models::order::{CombinedOrder, OrderHeader, OrderLineItem};

/// Attach line items to their order headers.
///
/// Builds a transient index of line items keyed by `order_no`, then walks
/// the headers once: O(headers + line items). Headers keep their source
/// order and each header's products keep the line items' relative order.
/// Headers without items get an empty product list; line items without a
/// matching header are dropped. An empty header collection yields an empty
/// result regardless of line items.
pub fn combine_orders(
    headers: Vec<OrderHeader>,
    line_items: Vec<OrderLineItem>,
) -> Vec<CombinedOrder> {
    if headers.is_empty() {
        return Vec::new();
    }

    let mut items_by_order: HashMap<String, Vec<OrderLineItem>> = HashMap::new();
    for item in line_items {
        items_by_order
            .entry(item.order_no.clone())
            .or_default()
            .push(item);
    }

    headers
        .into_iter()
        .map(|header| {
            let products = items_by_order
                .get(&header.order_no)
                .cloned()
                .unwrap_or_default();
            CombinedOrder {
                product_count: products.len(),
                products,
                header,
            }
        })
        .collect()
}
