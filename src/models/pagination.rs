// Offset-based pagination shared by every list endpoint

use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

pub fn default_page() -> i64 {
    DEFAULT_PAGE
}

pub fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Page/limit pair after coercion: page is 1-based with a floor of 1, limit
/// falls back to the default when non-positive and is capped at [`MAX_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(page: i64, limit: i64) -> Self {
        let page = page.max(1);
        let limit = if limit <= 0 {
            DEFAULT_LIMIT
        } else {
            limit.min(MAX_LIMIT)
        };
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Meta block for a result set of `total_items` rows under this page size.
    pub fn meta(&self, total_items: i64) -> PageMeta {
        PageMeta::new(self.page, self.limit, total_items)
    }
}

/// Pagination metadata returned alongside every paginated list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl PageMeta {
    pub fn new(page: i64, limit: i64, total_items: i64) -> Self {
        // ceil(total_items / limit) in integer arithmetic
        let total_pages = if limit > 0 {
            (total_items + limit - 1) / limit
        } else {
            0
        };

        Self {
            page,
            limit,
            total_items,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_coercion() {
        let page = Page::new(0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, DEFAULT_LIMIT);

        let page = Page::new(-5, -20);
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, DEFAULT_LIMIT);

        let page = Page::new(3, 500);
        assert_eq!(page.limit, MAX_LIMIT);
    }

    #[test]
    fn test_offset() {
        assert_eq!(Page::new(1, 10).offset(), 0);
        assert_eq!(Page::new(3, 10).offset(), 20);
        assert_eq!(Page::new(2, 25).offset(), 25);
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(PageMeta::new(1, 10, 0).total_pages, 0);
        assert_eq!(PageMeta::new(1, 10, 1).total_pages, 1);
        assert_eq!(PageMeta::new(1, 10, 10).total_pages, 1);
        assert_eq!(PageMeta::new(1, 10, 11).total_pages, 2);
        assert_eq!(PageMeta::new(1, 10, 35).total_pages, 4);
    }

    #[test]
    fn test_meta_reflects_effective_limit() {
        let meta = Page::new(2, 0).meta(45);
        assert_eq!(meta.limit, DEFAULT_LIMIT);
        assert_eq!(meta.total_pages, 5);
        assert_eq!(meta.page, 2);
    }
}
