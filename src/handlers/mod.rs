//! HTTP read accessors over the current snapshot. Sorting and pagination
//! here are pure view parameters; they never feed back into the pipeline.

pub mod analytics;
pub mod gross_profit;
pub mod orders;
pub mod reserve;
pub mod status;

use crate::errors::ServiceError;
use crate::services::aggregates::SortDirection;
use crate::{ListQuery, PaginatedResponse};

const MAX_PAGE_SIZE: u64 = 100;

/// Slice one page out of an in-memory collection.
pub(crate) fn paginate<T: Clone>(items: &[T], query: &ListQuery) -> PaginatedResponse<T> {
    let limit = query.limit.clamp(1, MAX_PAGE_SIZE);
    let page = query.page.max(1);
    let total = items.len() as u64;
    let total_pages = total.div_ceil(limit);
    let start = ((page - 1) * limit) as usize;
    let items = items
        .iter()
        .skip(start)
        .take(limit as usize)
        .cloned()
        .collect();
    PaginatedResponse {
        items,
        total,
        page,
        limit,
        total_pages,
    }
}

pub(crate) fn parse_direction(query: &ListQuery) -> Result<SortDirection, ServiceError> {
    match query.sort_order.as_deref() {
        None => Ok(SortDirection::default()),
        Some(raw) => SortDirection::parse(raw).ok_or_else(|| {
            ServiceError::ValidationError(format!(
                "unknown sort order '{raw}'; use 'asc' or 'desc'"
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: u64, limit: u64) -> ListQuery {
        ListQuery {
            page,
            limit,
            sort_by: None,
            sort_order: None,
        }
    }

    #[test]
    fn paginates_with_partial_last_page() {
        let items: Vec<i32> = (0..25).collect();
        let page = paginate(&items, &query(3, 10));
        assert_eq!(page.items, vec![20, 21, 22, 23, 24]);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn out_of_range_page_is_empty_not_an_error() {
        let items: Vec<i32> = (0..5).collect();
        let page = paginate(&items, &query(9, 10));
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
    }

    #[test]
    fn limit_is_clamped() {
        let items: Vec<i32> = (0..500).collect();
        let page = paginate(&items, &query(1, 10_000));
        assert_eq!(page.items.len(), MAX_PAGE_SIZE as usize);
        let page = paginate(&items, &query(1, 0));
        assert_eq!(page.items.len(), 1);
    }
}
