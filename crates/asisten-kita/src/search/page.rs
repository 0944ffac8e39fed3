use serde::Serialize;

/// Pagination metadata derived from `(total, limit, offset)` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PageInfo {
    pub fn compute(total: usize, limit: usize, offset: usize) -> Self {
        let limit = limit.max(1);
        Self {
            page: offset / limit + 1,
            total_pages: total.div_ceil(limit),
            has_next_page: offset + limit < total,
            has_prev_page: offset > 0,
        }
    }
}

/// One page of results plus the derived pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    #[serde(flatten)]
    pub info: PageInfo,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize, limit: usize, offset: usize) -> Self {
        Self {
            items,
            total,
            info: PageInfo::compute(total, limit, offset),
        }
    }

    /// Map the page items, keeping total and metadata intact.
    pub fn map<U>(self, transform: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(transform).collect(),
            total: self.total,
            info: self.info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn third_page_of_thirty_documents() {
        let info = PageInfo::compute(30, 12, 24);
        assert_eq!(info.page, 3);
        assert_eq!(info.total_pages, 3);
        assert!(!info.has_next_page);
        assert!(info.has_prev_page);
    }

    #[test]
    fn empty_result_set_has_no_pages() {
        let info = PageInfo::compute(0, 12, 0);
        assert_eq!(info.page, 1);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next_page);
        assert!(!info.has_prev_page);
    }

    #[test]
    fn zero_limit_is_treated_as_one() {
        let info = PageInfo::compute(5, 0, 0);
        assert_eq!(info.total_pages, 5);
        assert!(info.has_next_page);
    }

    proptest! {
        #[test]
        fn derived_values_match_their_closed_forms(
            total in 0usize..10_000,
            limit in 1usize..500,
            offset in 0usize..10_000,
        ) {
            let info = PageInfo::compute(total, limit, offset);
            prop_assert_eq!(info.page, offset / limit + 1);
            prop_assert_eq!(info.total_pages, total.div_ceil(limit));
            prop_assert_eq!(info.has_next_page, offset + limit < total);
            prop_assert_eq!(info.has_prev_page, offset > 0);
        }

        #[test]
        fn last_page_never_reports_a_next_page(
            total in 0usize..10_000,
            limit in 1usize..500,
        ) {
            let last_offset = (total.div_ceil(limit)).saturating_sub(1) * limit;
            let info = PageInfo::compute(total, limit, last_offset);
            prop_assert!(!info.has_next_page);
        }
    }
}
