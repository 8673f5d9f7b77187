//! Page/limit handling for list requests.
//!
//! Out-of-range or unparseable values never fail a request: they are
//! replaced with the defaults.

use serde::Serialize;

/// Page used when the client sends none, or a value below 1.
pub const DEFAULT_PAGE: usize = 1;

/// Limit used when the client sends none, or a value below 1.
pub const DEFAULT_LIMIT: usize = 50;

/// A clamped pagination request. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl PageRequest {
    /// Build a request from raw client values, clamping anything below 1.
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: at_least_one(page).unwrap_or(DEFAULT_PAGE),
            limit: at_least_one(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Parse raw query-string values. Garbage counts as absent.
    #[must_use]
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::new(
            page.and_then(|p| p.trim().parse().ok()),
            limit.and_then(|l| l.trim().parse().ok()),
        )
    }

    /// The 1-based page number.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// The maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Index of the first item on the page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn at_least_one(value: Option<i64>) -> Option<usize> {
    value
        .and_then(|v| usize::try_from(v).ok())
        .filter(|v| *v >= 1)
}

/// One page of results plus the size of the full collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Items on this page.
    pub data: Vec<T>,
    /// The (clamped) page number.
    pub page: usize,
    /// The (clamped) limit.
    pub limit: usize,
    /// Number of items across all pages.
    pub total: usize,
}

impl<T> Page<T> {
    /// Transform the items while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
        }
    }
}

/// Slice `[offset, offset + limit)` out of `items`, clamped to its bounds.
#[must_use]
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len();
    let start = request.offset().min(total);
    let end = start.saturating_add(request.limit()).min(total);

    Page {
        data: items.into_iter().skip(start).take(end - start).collect(),
        page: request.page(),
        limit: request.limit(),
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults() {
        let request = PageRequest::new(None, None);
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 50);
        assert_eq!(request, PageRequest::default());
    }

    #[test]
    fn test_below_one_clamps_to_defaults() {
        let request = PageRequest::new(Some(0), Some(-5));
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 50);
    }

    #[test]
    fn test_parse_garbage() {
        let request = PageRequest::parse(Some("two"), Some(""));
        assert_eq!(request, PageRequest::default());

        let request = PageRequest::parse(Some("+3"), Some(" 7 "));
        assert_eq!(request.page(), 3);
        assert_eq!(request.limit(), 7);
    }

    #[test]
    fn test_second_page_of_one() {
        let page = paginate(vec!["a", "b", "c"], PageRequest::new(Some(2), Some(1)));
        assert_eq!(page.data, vec!["b"]);
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 1);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let page = paginate(vec![1, 2, 3], PageRequest::new(Some(10), Some(2)));
        assert!(page.data.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_huge_values_do_not_overflow() {
        let request = PageRequest::new(Some(i64::MAX), Some(i64::MAX));
        let page = paginate(vec![1, 2, 3], request);
        assert!(page.data.is_empty());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = paginate(vec![1, 2, 3], PageRequest::new(Some(1), Some(2))).map(|n| n * 10);
        assert_eq!(page.data, vec![10, 20]);
        assert_eq!(page.total, 3);
    }

    proptest! {
        #[test]
        fn prop_page_is_contiguous_and_bounded(
            len in 0usize..200,
            page in 1i64..50,
            limit in 1i64..60,
        ) {
            let items: Vec<usize> = (0..len).collect();
            let request = PageRequest::new(Some(page), Some(limit));
            let result = paginate(items.clone(), request);

            prop_assert!(result.data.len() <= request.limit());
            prop_assert_eq!(result.total, len);

            let start = request.offset().min(len);
            prop_assert_eq!(&result.data[..], &items[start..start + result.data.len()]);
        }
    }
}
