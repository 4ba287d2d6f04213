use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::field_present;
use crate::models::gp_record::GpRecord;
use crate::models::order::CombinedOrder;

/// Ranking depth for the top-product and top-segment views.
pub const TOP_N: usize = 10;

/// Number of named segment columns in the country pivot; everything else
/// lands in the catch-all bucket.
pub const PIVOT_TOP_SEGMENTS: usize = 5;

pub const OTHERS_BUCKET: &str = "Others";

/// Stack colors for the pivot columns, assigned by column position. Stable
/// across refreshes as long as the top-segment set is unchanged.
pub const STACK_PALETTE: [&str; 6] = [
    "#2dd4bf", "#3b82f6", "#f59e0b", "#a855f7", "#ec4899", "#64748b",
];

/// Per-product sales statistics derived from the combined orders.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductSaleSummary {
    pub product_code: String,
    pub product_name: String,
    pub total_quantity: i64,
    /// Count of distinct orders containing the product, not a sum.
    pub order_count: i64,
    pub avg_quantity_per_order: Decimal,
    pub percentage_of_total: Decimal,
}

struct ProductAccumulator {
    product_code: String,
    product_name: String,
    total_quantity: i64,
    orders: HashSet<String>,
}

/// Accumulate per-product totals across every line item of every order.
///
/// Output order is the order in which product codes are first encountered;
/// callers apply their own sort afterwards. Ratios are defined as zero when
/// their denominator is zero, never an error or NaN.
pub fn product_sales_summary(orders: &[CombinedOrder]) -> Vec<ProductSaleSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut accumulators: Vec<ProductAccumulator> = Vec::new();

    for order in orders {
        for product in &order.products {
            let slot = match index.get(product.product_code.as_str()) {
                Some(&slot) => slot,
                None => {
                    index.insert(product.product_code.as_str(), accumulators.len());
                    accumulators.push(ProductAccumulator {
                        product_code: product.product_code.clone(),
                        product_name: product.product_name.clone(),
                        total_quantity: 0,
                        orders: HashSet::new(),
                    });
                    accumulators.len() - 1
                }
            };
            accumulators[slot].total_quantity += product.quantity;
            accumulators[slot].orders.insert(order.header.order_no.clone());
        }
    }

    let grand_total: i64 = accumulators.iter().map(|acc| acc.total_quantity).sum();

    accumulators
        .into_iter()
        .map(|acc| {
            let order_count = acc.orders.len() as i64;
            let avg_quantity_per_order = if order_count > 0 {
                Decimal::from(acc.total_quantity) / Decimal::from(order_count)
            } else {
                Decimal::ZERO
            };
            let percentage_of_total = if grand_total > 0 {
                Decimal::from(acc.total_quantity) * Decimal::ONE_HUNDRED
                    / Decimal::from(grand_total)
            } else {
                Decimal::ZERO
            };
            ProductSaleSummary {
                product_code: acc.product_code,
                product_name: acc.product_name,
                total_quantity: acc.total_quantity,
                order_count,
                avg_quantity_per_order,
                percentage_of_total,
            }
        })
        .collect()
}

/// Sort keys the presentation layer may request for the product summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSaleSortKey {
    ProductCode,
    ProductName,
    #[default]
    TotalQuantity,
    OrderCount,
    AvgQuantityPerOrder,
    PercentageOfTotal,
}

impl ProductSaleSortKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "product_code" => Some(Self::ProductCode),
            "product_name" => Some(Self::ProductName),
            "total_quantity" => Some(Self::TotalQuantity),
            "order_count" => Some(Self::OrderCount),
            "avg_quantity_per_order" => Some(Self::AvgQuantityPerOrder),
            "percentage_of_total" => Some(Self::PercentageOfTotal),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" | "ascending" => Some(Self::Ascending),
            "desc" | "descending" => Some(Self::Descending),
            _ => None,
        }
    }
}

/// Stable sort by the caller-selected key; ties keep first-encounter order.
pub fn sort_product_summaries(
    summaries: &mut [ProductSaleSummary],
    key: ProductSaleSortKey,
    direction: SortDirection,
) {
    summaries.sort_by(|a, b| {
        let ordering = match key {
            ProductSaleSortKey::ProductCode => a.product_code.cmp(&b.product_code),
            ProductSaleSortKey::ProductName => a.product_name.cmp(&b.product_name),
            ProductSaleSortKey::TotalQuantity => a.total_quantity.cmp(&b.total_quantity),
            ProductSaleSortKey::OrderCount => a.order_count.cmp(&b.order_count),
            ProductSaleSortKey::AvgQuantityPerOrder => {
                a.avg_quantity_per_order.cmp(&b.avg_quantity_per_order)
            }
            ProductSaleSortKey::PercentageOfTotal => {
                a.percentage_of_total.cmp(&b.percentage_of_total)
            }
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Grouped sums in first-encounter key order.
fn grouped_sums<I>(pairs: I) -> Vec<(String, Decimal)>
where
    I: IntoIterator<Item = (String, Decimal)>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut sums: Vec<(String, Decimal)> = Vec::new();
    for (key, measure) in pairs {
        match index.get(&key) {
            Some(&slot) => sums[slot].1 += measure,
            None => {
                index.insert(key.clone(), sums.len());
                sums.push((key, measure));
            }
        }
    }
    sums
}

/// Top `n` keys by summed measure. The sort is stable, so equal sums keep
/// first-encounter order.
fn rank_top_n(mut sums: Vec<(String, Decimal)>, n: usize) -> Vec<(String, Decimal)> {
    sums.sort_by(|a, b| b.1.cmp(&a.1));
    sums.truncate(n);
    sums
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SegmentGpRank {
    pub segment: String,
    pub gp: Decimal,
}

/// Top segments by summed gross profit; records with an unset segment are
/// excluded before ranking.
pub fn top_segments_by_gp(records: &[GpRecord], n: usize) -> Vec<SegmentGpRank> {
    let sums = grouped_sums(
        records
            .iter()
            .filter(|record| field_present(&record.segment))
            .map(|record| (record.segment.clone(), record.gp)),
    );
    rank_top_n(sums, n)
        .into_iter()
        .map(|(segment, gp)| SegmentGpRank { segment, gp })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductQuantityRank {
    pub product_code: String,
    pub product_name: String,
    /// Chart label of the form `"name (code)"`.
    pub display_name: String,
    pub total_quantity: i64,
}

/// Top products by total quantity across all combined orders.
pub fn top_products_by_quantity(orders: &[CombinedOrder], n: usize) -> Vec<ProductQuantityRank> {
    let mut summaries = product_sales_summary(orders);
    summaries.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
    summaries.truncate(n);
    summaries
        .into_iter()
        .map(|summary| ProductQuantityRank {
            display_name: format!("{} ({})", summary.product_name, summary.product_code),
            product_code: summary.product_code,
            product_name: summary.product_name,
            total_quantity: summary.total_quantity,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PivotColumn {
    pub segment: String,
    /// Palette color for this stack, assigned by column position.
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PivotRow {
    pub country: String,
    /// One value per pivot column, in column order.
    pub values: Vec<Decimal>,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountrySegmentPivot {
    pub columns: Vec<PivotColumn>,
    pub rows: Vec<PivotRow>,
}

/// Country × segment gross-profit pivot.
///
/// Columns are the five segments with the highest global gp plus the
/// `Others` bucket; any segment outside the top five is routed into
/// `Others`, so no gp is lost. Rows are sorted descending by row total.
pub fn country_segment_pivot(records: &[GpRecord]) -> CountrySegmentPivot {
    let scoped: Vec<&GpRecord> = records
        .iter()
        .filter(|record| field_present(&record.segment))
        .collect();

    let segment_sums = grouped_sums(
        scoped
            .iter()
            .map(|record| (record.segment.clone(), record.gp)),
    );
    let top_segments: Vec<String> = rank_top_n(segment_sums, PIVOT_TOP_SEGMENTS)
        .into_iter()
        .map(|(segment, _)| segment)
        .collect();

    let columns: Vec<PivotColumn> = top_segments
        .iter()
        .cloned()
        .chain(std::iter::once(OTHERS_BUCKET.to_string()))
        .enumerate()
        .map(|(position, segment)| PivotColumn {
            segment,
            color: STACK_PALETTE[position % STACK_PALETTE.len()].to_string(),
        })
        .collect();

    let column_index: HashMap<&str, usize> = top_segments
        .iter()
        .enumerate()
        .map(|(position, segment)| (segment.as_str(), position))
        .collect();
    let others_slot = top_segments.len();

    let mut country_index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<PivotRow> = Vec::new();
    for record in &scoped {
        let slot = match country_index.get(record.country.as_str()) {
            Some(&slot) => slot,
            None => {
                country_index.insert(record.country.clone(), rows.len());
                rows.push(PivotRow {
                    country: record.country.clone(),
                    values: vec![Decimal::ZERO; columns.len()],
                    total: Decimal::ZERO,
                });
                rows.len() - 1
            }
        };
        let column = column_index
            .get(record.segment.as_str())
            .copied()
            .unwrap_or(others_slot);
        rows[slot].values[column] += record.gp;
        rows[slot].total += record.gp;
    }

    rows.sort_by(|a, b| b.total.cmp(&a.total));

    CountrySegmentPivot { columns, rows }
}

/// Headline figures for the order dashboard cards.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderKpis {
    pub total_amount: Decimal,
    pub order_count: i64,
    pub total_quantity: i64,
}

pub fn order_kpis(orders: &[CombinedOrder]) -> OrderKpis {
    let total_amount = orders.iter().map(|order| order.header.amount).sum();
    let total_quantity = orders
        .iter()
        .flat_map(|order| &order.products)
        .map(|product| product.quantity)
        .sum();
    OrderKpis {
        total_amount,
        order_count: orders.len() as i64,
        total_quantity,
    }
}
